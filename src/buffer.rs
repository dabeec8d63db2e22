//! Output accumulator grown one fixed increment at a time.

use crate::{classify, util::PartialBuffer, Error, Result};

/// Unit used both for slicing input and for growing output.
pub const INCREMENT: usize = 16384;

/// Growable output buffer for a single `feed` or `finalize` call.
///
/// The underlying `Vec` is always fully initialized up to `capacity`; `len` counts the bytes
/// a backend actually produced. Growth is linear: each call to
/// [`ensure_room_for_next_increment`](Self::ensure_room_for_next_increment) adds at most one
/// [`INCREMENT`], which bounds the slack to a single increment.
#[derive(Debug, Default)]
pub struct ChunkBuffer {
    inner: PartialBuffer<Vec<u8>>,
}

impl ChunkBuffer {
    /// An empty buffer with no allocation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.inner.written().len()
    }

    /// Whether nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Allocated size, always a multiple of [`INCREMENT`].
    pub fn capacity(&self) -> usize {
        self.inner.get_ref().len()
    }

    /// Grows the buffer by one increment unless `len + INCREMENT` bytes already fit.
    pub fn ensure_room_for_next_increment(&mut self) -> Result<()> {
        let capacity = self.capacity();
        if capacity - self.len() >= INCREMENT {
            return Ok(());
        }

        let requested = capacity + INCREMENT;
        let buffer = self.inner.get_mut();
        buffer
            .try_reserve_exact(INCREMENT)
            .map_err(|_| Error::OutOfMemory { requested })?;
        buffer.resize(requested, 0);

        log::trace!("output buffer grown to {} bytes", requested);
        Ok(())
    }

    /// Number of bytes [`spare_increment`](Self::spare_increment) hands out.
    pub fn spare_len(&self) -> usize {
        self.inner.unwritten().len().min(INCREMENT)
    }

    /// The next (at most) [`INCREMENT`] writable bytes.
    pub fn spare_increment(&mut self) -> &mut [u8] {
        let len = self.spare_len();
        &mut self.inner.unwritten_mut()[..len]
    }

    /// Records that `produced` bytes of the spare increment were written.
    ///
    /// A count larger than what was handed out means the backend's bookkeeping contradicts
    /// the buffer's, which is reported instead of trusted.
    pub fn commit(&mut self, produced: usize) -> Result<()> {
        let spare = self.spare_len();
        if produced > spare {
            return Err(classify::invariant(format!(
                "backend reported {} bytes written into a {} byte increment",
                produced, spare
            )));
        }

        self.inner.advance(produced);
        Ok(())
    }

    /// Drops whole unused increments, leaving `capacity` as the smallest multiple of
    /// [`INCREMENT`] that holds `len` bytes.
    pub fn settle(&mut self) {
        let len = self.len();
        let keep = (len + INCREMENT - 1) / INCREMENT * INCREMENT;
        self.inner.get_mut().truncate(keep);
    }

    /// The written bytes, exactly `len` of them, without the spare allocation behind them.
    pub fn into_vec(self) -> Vec<u8> {
        let len = self.len();
        let mut buffer = self.inner.into_inner();
        buffer.truncate(len);
        buffer.shrink_to_fit();
        buffer
    }
}
