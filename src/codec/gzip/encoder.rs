use super::{CM_DEFLATE, MAGIC, OS_UNKNOWN};
use crate::{
    classify,
    codec::{FlateEncoder, Progress},
    util::PartialBuffer,
    Result,
};

use flate2::{Compression, Crc};

#[derive(Debug)]
enum State {
    Header(PartialBuffer<Vec<u8>>),
    Encoding,
    Footer(PartialBuffer<Vec<u8>>),
    Done,
}

/// gzip compressor: a fixed 10-byte header, a raw deflate body and a CRC-32/ISIZE trailer.
#[derive(Debug)]
pub struct GzipEncoder {
    inner: FlateEncoder,
    crc: Crc,
    state: State,
}

fn header(level: Compression) -> Vec<u8> {
    let level_byte = if level.level() >= Compression::best().level() {
        0x02
    } else if level.level() <= Compression::fast().level() {
        0x04
    } else {
        0x00
    };

    vec![
        MAGIC[0], MAGIC[1], CM_DEFLATE, 0, 0, 0, 0, 0, level_byte, OS_UNKNOWN,
    ]
}

impl GzipEncoder {
    pub(crate) fn new(level: Compression) -> Self {
        Self {
            inner: FlateEncoder::new(level),
            crc: Crc::new(),
            state: State::Header(header(level).into()),
        }
    }

    fn footer(&self) -> Vec<u8> {
        let mut footer = Vec::with_capacity(super::FOOTER_LEN);
        footer.extend_from_slice(&self.crc.sum().to_le_bytes());
        footer.extend_from_slice(&self.crc.amount().to_le_bytes());
        footer
    }

    /// Compress `input` into `output`.
    ///
    /// Return `Ok((progress, input_consumed, output_produced))`
    pub fn encode(&mut self, input: &[u8], output: &mut [u8]) -> Result<(Progress, usize, usize)> {
        let mut input = PartialBuffer::new(input);
        let mut output = PartialBuffer::new(output);

        if let State::Header(header) = &mut self.state {
            output.copy_unwritten_from(header);
            if !header.unwritten().is_empty() {
                return Ok((Progress::Continue, 0, output.written().len()));
            }
            self.state = State::Encoding;
        }

        match self.state {
            State::Encoding => {
                self.inner.encode(&mut input, &mut output)?;
                self.crc.update(input.written());
            }
            State::Header(_) | State::Footer(_) | State::Done => {
                return Err(classify::invariant("gzip encoder fed after finish began"));
            }
        }

        Ok((
            Progress::Continue,
            input.written().len(),
            output.written().len(),
        ))
    }

    /// Flush the deflate stream and write the trailer.
    ///
    /// Return `Ok((progress, output_produced))`
    pub fn finish(&mut self, output: &mut [u8]) -> Result<(Progress, usize)> {
        let mut output = PartialBuffer::new(output);

        loop {
            match &mut self.state {
                State::Header(header) => {
                    output.copy_unwritten_from(header);
                    if header.unwritten().is_empty() {
                        self.state = State::Encoding;
                    }
                }

                State::Encoding => match self.inner.finish(&mut output)? {
                    Progress::Done => self.state = State::Footer(self.footer().into()),
                    Progress::Continue => {
                        return Ok((Progress::Continue, output.written().len()));
                    }
                },

                State::Footer(footer) => {
                    output.copy_unwritten_from(footer);
                    if footer.unwritten().is_empty() {
                        self.state = State::Done;
                    }
                }

                State::Done => return Ok((Progress::Done, output.written().len())),
            }

            if output.unwritten().is_empty() && !matches!(self.state, State::Done) {
                return Ok((Progress::Continue, output.written().len()));
            }
        }
    }
}
