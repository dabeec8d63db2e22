use super::{header::Parser, Header, FOOTER_LEN};
use crate::{
    classify,
    codec::{FlateDecoder, Progress},
    util::PartialBuffer,
    Result,
};

use flate2::Crc;

#[derive(Debug)]
enum State {
    Header(Parser),
    Decoding,
    Footer(PartialBuffer<Vec<u8>>),
    Done,
}

/// gzip decompressor for a single member.
#[derive(Debug)]
pub struct GzipDecoder {
    inner: FlateDecoder,
    crc: Crc,
    state: State,
    header: Option<Header>,
}

impl GzipDecoder {
    pub(crate) fn new() -> Self {
        Self {
            inner: FlateDecoder::new(),
            crc: Crc::new(),
            state: State::Header(Parser::default()),
            header: None,
        }
    }

    /// The member header, once all of it has been read.
    pub fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    fn check_footer(&self, footer: &[u8]) -> Result<()> {
        let crc = u32::from_le_bytes([footer[0], footer[1], footer[2], footer[3]]);
        let amount = u32::from_le_bytes([footer[4], footer[5], footer[6], footer[7]]);

        if crc != self.crc.sum() {
            return Err(classify::corrupt("CRC computed does not match"));
        }
        if amount != self.crc.amount() {
            return Err(classify::corrupt("amount of bytes read does not match"));
        }
        Ok(())
    }

    fn run(
        &mut self,
        input: &mut PartialBuffer<&[u8]>,
        output: &mut PartialBuffer<&mut [u8]>,
    ) -> Result<Progress> {
        loop {
            match &mut self.state {
                State::Header(parser) => match parser.input(input)? {
                    Some(header) => {
                        log::trace!("gzip header parsed: {:?}", header);
                        self.header = Some(header);
                        self.state = State::Decoding;
                    }
                    None => return Ok(Progress::Continue),
                },

                State::Decoding => {
                    let prior = output.written().len();
                    let progress = self.inner.decode(input, output)?;
                    self.crc.update(&output.written()[prior..]);

                    match progress {
                        Progress::Done => {
                            self.state = State::Footer(vec![0; FOOTER_LEN].into());
                        }
                        Progress::Continue => return Ok(Progress::Continue),
                    }
                }

                State::Footer(footer) => {
                    footer.copy_unwritten_from(input);
                    if !footer.unwritten().is_empty() {
                        return Ok(Progress::Continue);
                    }

                    let footer = std::mem::take(footer.get_mut());
                    self.check_footer(&footer)?;
                    self.state = State::Done;
                }

                State::Done => {
                    if !input.unwritten().is_empty() {
                        return Err(classify::corrupt("trailing data after gzip stream"));
                    }
                    return Ok(Progress::Done);
                }
            }
        }
    }

    /// Decompress `input` into `output`.
    ///
    /// Return `Ok((progress, input_consumed, output_produced))`
    pub fn decode(&mut self, input: &[u8], output: &mut [u8]) -> Result<(Progress, usize, usize)> {
        let mut input = PartialBuffer::new(input);
        let mut output = PartialBuffer::new(output);

        let progress = self.run(&mut input, &mut output)?;

        Ok((progress, input.written().len(), output.written().len()))
    }

    /// Succeeds only if the trailer has been read and verified.
    pub fn finish(&mut self, _output: &mut [u8]) -> Result<(Progress, usize)> {
        match self.state {
            State::Done => Ok((Progress::Done, 0)),
            _ => Err(classify::corrupt("unexpected end of gzip stream")),
        }
    }
}
