use super::{CM_DEFLATE, MAGIC};
use crate::{classify, util::PartialBuffer, Result};

use flate2::Crc;

const FHCRC: u8 = 0x02;
const FEXTRA: u8 = 0x04;
const FNAME: u8 = 0x08;
const FCOMMENT: u8 = 0x10;
const RESERVED: u8 = 0xe0;

/// Longest `FNAME` or `FCOMMENT` accepted, terminator excluded.
const MAX_FIELD_LEN: usize = 64 * 1024;

/// Optional sections, in the order they appear after the fixed header.
const SECTIONS: [u8; 4] = [FEXTRA, FNAME, FCOMMENT, FHCRC];

/// Metadata carried by a gzip member header.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Header {
    /// Modification time of the original file, seconds since the epoch; 0 if absent.
    pub mtime: u32,
    /// Operating system that produced the member.
    pub os: u8,
    /// Contents of the `FEXTRA` field.
    pub extra: Option<Vec<u8>>,
    /// Original file name, without the terminating NUL.
    pub file_name: Option<Vec<u8>>,
    /// File comment, without the terminating NUL.
    pub comment: Option<Vec<u8>>,
}

#[derive(Debug)]
enum State {
    Fixed(PartialBuffer<[u8; 10]>),
    ExtraLen(PartialBuffer<[u8; 2]>),
    Extra(PartialBuffer<Vec<u8>>),
    FileName(Vec<u8>),
    Comment(Vec<u8>),
    Crc(PartialBuffer<[u8; 2]>),
    Done,
}

impl Default for State {
    fn default() -> Self {
        Self::Fixed(PartialBuffer::default())
    }
}

/// Parses a header that may arrive split across any number of calls.
#[derive(Debug)]
pub(crate) struct Parser {
    state: State,
    flags: u8,
    header: Header,
    crc: Crc,
}

impl Default for Parser {
    fn default() -> Self {
        Self {
            state: State::default(),
            flags: 0,
            header: Header::default(),
            crc: Crc::new(),
        }
    }
}

fn next_section(flags: u8, after: Option<u8>) -> State {
    let start = after
        .and_then(|done| SECTIONS.iter().position(|&section| section == done))
        .map_or(0, |index| index + 1);

    match SECTIONS[start..]
        .iter()
        .copied()
        .find(|&section| flags & section != 0)
    {
        Some(FEXTRA) => State::ExtraLen(PartialBuffer::default()),
        Some(FNAME) => State::FileName(Vec::new()),
        Some(FCOMMENT) => State::Comment(Vec::new()),
        Some(_) => State::Crc(PartialBuffer::default()),
        None => State::Done,
    }
}

/// Copies header bytes into `target`, feeding them to the header CRC. Returns true when full.
fn fill<B: AsRef<[u8]> + AsMut<[u8]>>(
    crc: &mut Crc,
    target: &mut PartialBuffer<B>,
    input: &mut PartialBuffer<&[u8]>,
) -> bool {
    let prior = input.written().len();
    target.copy_unwritten_from(input);
    crc.update(&input.written()[prior..]);
    target.unwritten().is_empty()
}

/// Consumes up to and including a NUL terminator. Returns true once it has been seen.
fn fill_terminated(
    crc: &mut Crc,
    target: &mut Vec<u8>,
    input: &mut PartialBuffer<&[u8]>,
) -> Result<bool> {
    let available = input.unwritten();
    let (taken, terminated) = match memchr::memchr(0, available) {
        Some(end) => (end, true),
        None => (available.len(), false),
    };

    if target.len() + taken > MAX_FIELD_LEN {
        return Err(classify::corrupt("gzip header field too long"));
    }

    target.extend_from_slice(&available[..taken]);
    let consumed = if terminated { taken + 1 } else { taken };
    crc.update(&available[..consumed]);
    input.advance(consumed);
    Ok(terminated)
}

impl Parser {
    fn parse_fixed(&mut self, fixed: [u8; 10]) -> Result<()> {
        if fixed[0..2] != MAGIC {
            return Err(classify::corrupt("invalid gzip header"));
        }
        if fixed[2] != CM_DEFLATE {
            return Err(classify::corrupt(format!(
                "unknown gzip compression method {}",
                fixed[2]
            )));
        }
        if fixed[3] & RESERVED != 0 {
            return Err(classify::corrupt("reserved gzip header flags set"));
        }

        self.flags = fixed[3];
        self.header.mtime = u32::from_le_bytes([fixed[4], fixed[5], fixed[6], fixed[7]]);
        self.header.os = fixed[9];
        Ok(())
    }

    /// Return `Ok(Some(header))` once the whole header has been consumed, `Ok(None)` if more
    /// bytes are needed.
    pub(crate) fn input(&mut self, input: &mut PartialBuffer<&[u8]>) -> Result<Option<Header>> {
        loop {
            match &mut self.state {
                State::Fixed(data) => {
                    if fill(&mut self.crc, data, input) {
                        let fixed = *data.get_ref();
                        self.parse_fixed(fixed)?;
                        self.state = next_section(self.flags, None);
                    }
                }

                State::ExtraLen(data) => {
                    if fill(&mut self.crc, data, input) {
                        let len = u16::from_le_bytes(*data.get_ref());
                        self.state = State::Extra(vec![0; usize::from(len)].into());
                    }
                }

                State::Extra(data) => {
                    if fill(&mut self.crc, data, input) {
                        self.header.extra = Some(std::mem::take(data.get_mut()));
                        self.state = next_section(self.flags, Some(FEXTRA));
                    }
                }

                State::FileName(name) => {
                    if fill_terminated(&mut self.crc, name, input)? {
                        self.header.file_name = Some(std::mem::take(name));
                        self.state = next_section(self.flags, Some(FNAME));
                    }
                }

                State::Comment(comment) => {
                    if fill_terminated(&mut self.crc, comment, input)? {
                        self.header.comment = Some(std::mem::take(comment));
                        self.state = next_section(self.flags, Some(FCOMMENT));
                    }
                }

                State::Crc(data) => {
                    data.copy_unwritten_from(input);
                    if data.unwritten().is_empty() {
                        let expected = u16::from_le_bytes(*data.get_ref());
                        let actual = (self.crc.sum() & 0xffff) as u16;
                        if expected != actual {
                            return Err(classify::corrupt("gzip header CRC does not match"));
                        }
                        self.state = State::Done;
                    }
                }

                State::Done => return Ok(Some(std::mem::take(&mut self.header))),
            }

            if input.unwritten().is_empty() && !matches!(self.state, State::Done) {
                return Ok(None);
            }
        }
    }
}
