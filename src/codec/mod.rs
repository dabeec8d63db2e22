//! Adapters over the compression libraries, all speaking the [`Backend`] contract.

use crate::{classify, Algorithm, Config, Direction, Result};

mod bzip2;
mod flate;
mod gzip;

pub use self::bzip2::{BzDecoder, BzEncoder};
pub(crate) use self::flate::{FlateDecoder, FlateEncoder};
pub use self::gzip::{GzipDecoder, GzipEncoder, Header};

/// What a backend wants next after a `step` or `finish` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    /// Call again: more input can be taken, or more output may be pending.
    Continue,
    /// The stream is complete; nothing further will be produced.
    Done,
}

/// The primitives a [`Session`](crate::Session) drives.
///
/// Construction plays the role of `begin`: a backend value is ready to step as soon as it
/// exists.
pub trait Backend {
    /// Processes as much of `input` as fits into `output`.
    ///
    /// Return `Ok((progress, input_consumed, output_produced))`
    fn step(&mut self, input: &[u8], output: &mut [u8]) -> Result<(Progress, usize, usize)>;

    /// Flushes buffered state and trailing framing into `output`.
    ///
    /// Return `Ok((progress, output_produced))`; `Progress::Done` once everything is out.
    fn finish(&mut self, output: &mut [u8]) -> Result<(Progress, usize)>;

    /// Frees the library state. The session calls this exactly once; further calls are no-ops.
    fn release(&mut self);
}

/// One of the four library adapters, picked by direction and algorithm.
#[derive(Debug)]
pub enum Codec {
    /// gzip compression.
    GzipEncoder(GzipEncoder),
    /// gzip decompression.
    GzipDecoder(GzipDecoder),
    /// bzip2 compression.
    BzEncoder(BzEncoder),
    /// bzip2 decompression.
    BzDecoder(BzDecoder),
    /// Library state has been freed.
    Released,
}

impl Codec {
    /// Validates `config` and constructs the matching adapter.
    pub fn begin(direction: Direction, algorithm: Algorithm, config: &Config) -> Result<Self> {
        config.validate(direction, algorithm)?;

        let codec = match (direction, algorithm) {
            (Direction::Compress, Algorithm::Gzip) => {
                Self::GzipEncoder(GzipEncoder::new(config.level.into_flate2()?))
            }
            (Direction::Decompress, Algorithm::Gzip) => Self::GzipDecoder(GzipDecoder::new()),
            (Direction::Compress, Algorithm::Bzip2) => Self::BzEncoder(BzEncoder::new(
                config.level.into_bzip2()?,
                config.work_factor,
            )),
            (Direction::Decompress, Algorithm::Bzip2) => {
                Self::BzDecoder(BzDecoder::new(config.low_memory))
            }
        };

        Ok(codec)
    }

    /// The parsed gzip header, once a gzip decoder has seen all of it.
    pub fn gzip_header(&self) -> Option<&Header> {
        match self {
            Self::GzipDecoder(decoder) => decoder.header(),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::GzipEncoder(_) => "gzip encoder",
            Self::GzipDecoder(_) => "gzip decoder",
            Self::BzEncoder(_) => "bzip2 encoder",
            Self::BzDecoder(_) => "bzip2 decoder",
            Self::Released => "released codec",
        }
    }

    /// Whether [`release`](Backend::release) has run.
    pub fn is_released(&self) -> bool {
        matches!(self, Self::Released)
    }
}

impl Backend for Codec {
    fn step(&mut self, input: &[u8], output: &mut [u8]) -> Result<(Progress, usize, usize)> {
        match self {
            Self::GzipEncoder(encoder) => encoder.encode(input, output),
            Self::GzipDecoder(decoder) => decoder.decode(input, output),
            Self::BzEncoder(encoder) => encoder.encode(input, output),
            Self::BzDecoder(decoder) => decoder.decode(input, output),
            Self::Released => Err(classify::invariant("codec stepped after release")),
        }
    }

    fn finish(&mut self, output: &mut [u8]) -> Result<(Progress, usize)> {
        match self {
            Self::GzipEncoder(encoder) => encoder.finish(output),
            Self::GzipDecoder(decoder) => decoder.finish(output),
            Self::BzEncoder(encoder) => encoder.finish(output),
            Self::BzDecoder(decoder) => decoder.finish(output),
            Self::Released => Err(classify::invariant("codec finished after release")),
        }
    }

    fn release(&mut self) {
        if !self.is_released() {
            log::debug!("releasing {}", self.name());
            *self = Self::Released;
        }
    }
}
