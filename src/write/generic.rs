use crate::{util::PartialBuffer, Algorithm, Config, Direction, Session};
use std::io::{self, Write};

/// Any session in front of any writer.
///
/// Output the writer has not yet accepted is kept and delivered before any new input is fed,
/// so a failed `write` never loses bytes the session already produced.
#[derive(Debug)]
pub struct Writer<W> {
    writer: W,
    session: Session,
    pending: PartialBuffer<Vec<u8>>,
}

impl<W: Write> Writer<W> {
    /// Initializes a session with `config`; its output goes to `writer`.
    pub fn new(
        writer: W,
        direction: Direction,
        algorithm: Algorithm,
        config: &Config,
    ) -> io::Result<Self> {
        let mut session = Session::new(direction, algorithm);
        session.initialize(config)?;
        Ok(Self {
            writer,
            session,
            pending: PartialBuffer::default(),
        })
    }

    /// Hands pending output to the writer until all of it is accepted.
    fn drain(&mut self) -> io::Result<()> {
        while !self.pending.unwritten().is_empty() {
            match self.writer.write(self.pending.unwritten()) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::WriteZero,
                        "failed to write buffered output",
                    ));
                }
                Ok(written) => self.pending.advance(written),
                Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
                Err(error) => return Err(error),
            }
        }
        Ok(())
    }

    /// Finalizes the session, writes what it returns and hands back the writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.drain()?;
        self.pending = self.session.finalize()?.into();
        self.drain()?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W> Writer<W> {
    /// Acquires a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Acquires a mutable reference to the underlying writer.
    ///
    /// Note that care must be taken to avoid tampering with the state of the writer which
    /// may otherwise confuse the output stream.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// The session doing the work.
    pub fn session(&self) -> &Session {
        &self.session
    }
}

impl<W: Write> Write for Writer<W> {
    /// Returns an error only when none of `buf` was fed to the session.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        self.drain()?;
        self.pending = self.session.feed(buf)?.into();

        // `buf` is in the session now; a failure here resurfaces on the next call.
        if let Err(error) = self.drain() {
            log::debug!(
                "{} bytes of output held back: {}",
                self.pending.unwritten().len(),
                error
            );
        }
        Ok(buf.len())
    }

    /// Delivers pending output and flushes the underlying writer; the session keeps whatever
    /// it is buffering.
    fn flush(&mut self) -> io::Result<()> {
        self.drain()?;
        self.writer.flush()
    }
}
