//! The initialize / feed / finalize state machine shared by every codec.

use crate::{
    buffer::{ChunkBuffer, INCREMENT},
    classify,
    codec::{Backend, Codec, Header, Progress},
    Algorithm, Config, Direction, Error, Result,
};

/// Lifecycle of a [`Session`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// Created, but no backend has been constructed yet.
    Uninitialized,
    /// Holding a backend; `feed` and `finalize` are allowed.
    Ready,
    /// `finalize` succeeded. Terminal.
    Finished,
    /// A fatal error released the backend. Terminal.
    Failed,
}

/// One compression or decompression stream.
///
/// A session owns its backend exclusively and releases it exactly once: when `finalize`
/// returns, when a fatal error is reported, or when the session is dropped while still
/// holding it.
///
/// ```
/// use gzbz2::{Algorithm, Config, Direction, Session};
///
/// let mut session = Session::new(Direction::Compress, Algorithm::Gzip);
/// session.initialize(&Config::default())?;
///
/// let mut compressed = session.feed(b"hello ")?;
/// compressed.extend(session.feed(b"world")?);
/// compressed.extend(session.finalize()?);
///
/// assert_eq!(gzbz2::decompress(Algorithm::Gzip, &Config::default(), &compressed)?, b"hello world");
/// # Ok::<(), gzbz2::Error>(())
/// ```
#[derive(Debug)]
pub struct Session<B: Backend = Codec> {
    direction: Direction,
    algorithm: Algorithm,
    state: State,
    backend: Option<B>,
    total_in: u64,
    total_out: u64,
}

impl Session<Codec> {
    /// Creates an uninitialized session for the given direction and algorithm.
    pub fn new(direction: Direction, algorithm: Algorithm) -> Self {
        Self {
            direction,
            algorithm,
            state: State::Uninitialized,
            backend: None,
            total_in: 0,
            total_out: 0,
        }
    }

    /// Validates `config` and constructs the backend.
    ///
    /// On [`Error::InvalidArgument`] nothing is constructed and the session stays
    /// [`State::Uninitialized`].
    pub fn initialize(&mut self, config: &Config) -> Result<()> {
        if self.state != State::Uninitialized {
            return Err(Error::InvalidState {
                operation: "initialize",
                state: self.state,
            });
        }

        self.backend = Some(Codec::begin(self.direction, self.algorithm, config)?);
        self.state = State::Ready;

        log::debug!(
            "{:?} {:?} session initialized with {:?}",
            self.algorithm,
            self.direction,
            config
        );
        Ok(())
    }

    /// The gzip header, once a gzip decompression session has read all of it.
    ///
    /// Unavailable once the backend has been released.
    pub fn gzip_header(&self) -> Option<&Header> {
        self.backend.as_ref().and_then(Codec::gzip_header)
    }
}

impl<B: Backend> Session<B> {
    /// Wraps a backend that is already begun; the session starts [`State::Ready`].
    pub fn with_backend(direction: Direction, algorithm: Algorithm, backend: B) -> Self {
        Self {
            direction,
            algorithm,
            state: State::Ready,
            backend: Some(backend),
            total_in: 0,
            total_out: 0,
        }
    }

    /// Processes `input` and returns the output it produced.
    ///
    /// The returned bytes belong to this call only; the backend may hold some back until a
    /// later `feed` or `finalize`. An empty `input` returns an empty `Vec` without touching
    /// the backend.
    pub fn feed(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        self.expect_state("feed")?;
        if input.is_empty() {
            return Ok(Vec::new());
        }

        let buffer = match self.fill(input) {
            Ok(buffer) => buffer,
            Err(error) => return Err(self.fail(error)),
        };

        self.total_in += input.len() as u64;
        self.total_out += buffer.len() as u64;
        Ok(buffer.into_vec())
    }

    /// Flushes the backend, returning the remaining output including any trailer.
    ///
    /// The backend is released whatever the outcome.
    pub fn finalize(&mut self) -> Result<Vec<u8>> {
        self.expect_state("finalize")?;

        let result = self.drain();
        self.release();

        match result {
            Ok(buffer) => {
                self.state = State::Finished;
                self.total_out += buffer.len() as u64;
                log::debug!(
                    "{:?} {:?} session finished: {} bytes in, {} bytes out",
                    self.algorithm,
                    self.direction,
                    self.total_in,
                    self.total_out
                );
                Ok(buffer.into_vec())
            }
            Err(error) => {
                self.state = State::Failed;
                Err(error)
            }
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Whether this session compresses or decompresses.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The algorithm this session speaks.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Bytes accepted by successful `feed` calls.
    pub fn total_in(&self) -> u64 {
        self.total_in
    }

    /// Bytes returned by successful `feed` and `finalize` calls.
    pub fn total_out(&self) -> u64 {
        self.total_out
    }

    /// The backend, while the session still holds it.
    pub fn backend(&self) -> Option<&B> {
        self.backend.as_ref()
    }

    fn expect_state(&self, operation: &'static str) -> Result<()> {
        if self.state != State::Ready {
            return Err(Error::InvalidState {
                operation,
                state: self.state,
            });
        }
        Ok(())
    }

    fn backend_mut(&mut self) -> Result<&mut B> {
        self.backend
            .as_mut()
            .ok_or_else(|| classify::invariant("ready session holds no backend"))
    }

    fn fill(&mut self, input: &[u8]) -> Result<ChunkBuffer> {
        let backend = self.backend_mut()?;
        let mut buffer = ChunkBuffer::new();

        for piece in input.chunks(INCREMENT) {
            step_to_completion(backend, piece, &mut buffer)?;
        }

        buffer.settle();
        Ok(buffer)
    }

    fn drain(&mut self) -> Result<ChunkBuffer> {
        let backend = self.backend_mut()?;
        let mut buffer = ChunkBuffer::new();

        loop {
            buffer.ensure_room_for_next_increment()?;
            let (progress, produced) = backend.finish(buffer.spare_increment())?;
            buffer.commit(produced)?;
            log::trace!("finish produced {} bytes", produced);

            match progress {
                Progress::Done => break,
                Progress::Continue if produced == 0 => {
                    return Err(classify::invariant(
                        "finish made no progress before the stream ended",
                    ));
                }
                Progress::Continue => {}
            }
        }

        buffer.settle();
        Ok(buffer)
    }

    fn fail(&mut self, error: Error) -> Error {
        if error.is_fatal() {
            log::debug!(
                "{:?} {:?} session failed: {}",
                self.algorithm,
                self.direction,
                error
            );
            self.release();
            self.state = State::Failed;
        }
        error
    }

    fn release(&mut self) {
        if let Some(mut backend) = self.backend.take() {
            backend.release();
        }
    }
}

/// Steps one input piece until all of it is consumed and no output is pending.
fn step_to_completion<B: Backend>(
    backend: &mut B,
    mut input: &[u8],
    buffer: &mut ChunkBuffer,
) -> Result<()> {
    loop {
        buffer.ensure_room_for_next_increment()?;
        let space = buffer.spare_len();

        let (progress, consumed, produced) = backend.step(input, buffer.spare_increment())?;
        buffer.commit(produced)?;
        if consumed > input.len() {
            return Err(classify::invariant(format!(
                "backend consumed {} bytes of a {} byte input",
                consumed,
                input.len()
            )));
        }
        input = &input[consumed..];
        log::trace!("step consumed {} and produced {} bytes", consumed, produced);

        if progress == Progress::Done {
            if !input.is_empty() {
                return Err(classify::invariant(format!(
                    "backend ended the stream with {} input bytes left",
                    input.len()
                )));
            }
            return Ok(());
        }

        if input.is_empty() && produced < space {
            return Ok(());
        }

        if consumed == 0 && produced == 0 {
            return Err(classify::invariant(format!(
                "step made no progress with {} input bytes left",
                input.len()
            )));
        }
    }
}

impl<B: Backend> Drop for Session<B> {
    fn drop(&mut self) {
        if self.backend.is_some() {
            log::warn!(
                "{:?} {:?} session dropped without being finalized",
                self.algorithm,
                self.direction
            );
            self.release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::Cell, rc::Rc};

    /// Copies input to output; optionally lies about how much it wrote.
    #[derive(Debug, Default)]
    struct Echo {
        releases: Rc<Cell<usize>>,
        over_report: bool,
        stall: bool,
    }

    impl Backend for Echo {
        fn step(&mut self, input: &[u8], output: &mut [u8]) -> Result<(Progress, usize, usize)> {
            if self.stall {
                return Ok((Progress::Continue, 0, 0));
            }
            let amount = input.len().min(output.len());
            output[..amount].copy_from_slice(&input[..amount]);
            let produced = if self.over_report {
                output.len() + 1
            } else {
                amount
            };
            Ok((Progress::Continue, amount, produced))
        }

        fn finish(&mut self, _output: &mut [u8]) -> Result<(Progress, usize)> {
            Ok((Progress::Done, 0))
        }

        fn release(&mut self) {
            self.releases.set(self.releases.get() + 1);
        }
    }

    fn session(backend: Echo) -> Session<Echo> {
        Session::with_backend(Direction::Compress, Algorithm::Gzip, backend)
    }

    fn _assert_send<T: Send>() {}

    #[test]
    fn sessions_are_send() {
        _assert_send::<Session>();
    }

    #[test]
    fn finalize_releases_exactly_once() {
        let releases = Rc::new(Cell::new(0));
        let mut session = session(Echo {
            releases: releases.clone(),
            ..Echo::default()
        });

        assert_eq!(session.feed(b"abc").unwrap(), b"abc");
        assert_eq!(session.finalize().unwrap(), Vec::<u8>::new());
        assert_eq!(session.state(), State::Finished);
        drop(session);

        assert_eq!(releases.get(), 1);
    }

    #[test]
    fn drop_releases_an_unfinished_session() {
        let releases = Rc::new(Cell::new(0));
        let mut session = session(Echo {
            releases: releases.clone(),
            ..Echo::default()
        });
        session.feed(b"abc").unwrap();
        drop(session);

        assert_eq!(releases.get(), 1);
    }

    #[test]
    fn impossible_output_size() {
        let releases = Rc::new(Cell::new(0));
        let mut session = session(Echo {
            releases: releases.clone(),
            over_report: true,
            ..Echo::default()
        });

        let error = session.feed(b"abc").unwrap_err();
        assert!(matches!(error, Error::InternalInvariant { .. }));
        assert!(error.is_fatal());
        assert_eq!(session.state(), State::Failed);
        assert_eq!(releases.get(), 1);

        assert!(matches!(
            session.finalize(),
            Err(Error::InvalidState {
                state: State::Failed,
                ..
            })
        ));
        assert_eq!(releases.get(), 1);
    }

    #[test]
    fn stalled_backend() {
        let mut session = session(Echo {
            stall: true,
            ..Echo::default()
        });

        let error = session.feed(b"abc").unwrap_err();
        assert!(matches!(error, Error::InternalInvariant { .. }));
        assert_eq!(session.state(), State::Failed);
    }

    #[test]
    fn empty_feed_does_not_touch_the_backend() {
        let mut session = session(Echo {
            stall: true,
            ..Echo::default()
        });

        assert_eq!(session.feed(&[]).unwrap(), Vec::<u8>::new());
        assert_eq!(session.state(), State::Ready);
    }

    #[test]
    fn capacity_is_the_smallest_covering_multiple() {
        for &size in &[1, INCREMENT - 1, INCREMENT, 3 * INCREMENT + 7] {
            let mut session = session(Echo::default());
            let input = vec![7; size];

            let buffer = session.fill(&input).unwrap();
            let expected = (size + INCREMENT - 1) / INCREMENT * INCREMENT;
            assert_eq!(buffer.capacity(), expected, "input of {} bytes", size);
            assert_eq!(buffer.into_vec(), input);
        }
    }

    #[test]
    fn counters_track_successful_calls() {
        let mut session = session(Echo::default());
        session.feed(&[1; 10]).unwrap();
        session.feed(&[2; 5]).unwrap();
        session.finalize().unwrap();

        assert_eq!(session.total_in(), 15);
        assert_eq!(session.total_out(), 15);
    }

    #[test]
    fn initialize_twice() {
        let mut session = Session::new(Direction::Decompress, Algorithm::Bzip2);
        session.initialize(&Config::default()).unwrap();

        let error = session.initialize(&Config::default()).unwrap_err();
        assert!(matches!(
            error,
            Error::InvalidState {
                operation: "initialize",
                state: State::Ready,
            }
        ));
        assert_eq!(session.state(), State::Ready);
    }
}
