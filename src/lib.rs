//! Incremental gzip and bzip2 compression sessions.
//!
//! A [`Session`] wraps one compression library stream. Input is fed in chunks of any size
//! and each call returns the output it produced; [`Session::finalize`] flushes what is left,
//! including the container trailer. The same driving loop runs every algorithm:
//!
//!  Algorithm | Library | Container
//! -----------|---------|----------
//!  [`Algorithm::Gzip`] | [`flate2`] raw deflate | gzip header and trailer written and parsed here
//!  [`Algorithm::Bzip2`] | [`bzip2`] | bzip2 stream
//!
//! Output is accumulated in fixed [`INCREMENT`](buffer::INCREMENT) sized pieces, and input
//! is handed to the library in pieces of the same size, so memory use per call is bounded
//! by the output that call produces.
//!
//! Errors are reported through a single [`Error`] type. Any failure coming from the
//! library releases its state immediately and leaves the session [`Failed`](State::Failed);
//! argument and state errors leave the session untouched.
//!
//! For [`std::io::Write`] pipelines see the [`write`] module; for data already in memory
//! see [`compress`] and [`decompress`].
//!
//! ```
//! use gzbz2::{Algorithm, Config, Level};
//!
//! let config = Config::default().with_level(Level::Best);
//! let compressed = gzbz2::compress(Algorithm::Bzip2, &config, b"hello world")?;
//! let decompressed = gzbz2::decompress(Algorithm::Bzip2, &config, &compressed)?;
//!
//! assert_eq!(decompressed, b"hello world");
//! # Ok::<(), gzbz2::Error>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_copy_implementations,
    missing_debug_implementations
)]

pub mod buffer;
mod classify;
pub mod codec;
mod config;
mod error;
mod session;
mod util;
pub mod write;

pub use crate::{
    codec::{Backend, Codec, Progress},
    config::{Config, Level, DEFAULT_WORK_FACTOR, MAX_WORK_FACTOR},
    error::{BackendErrorKind, Error, Result},
    session::{Session, State},
};

/// Whether a session compresses or decompresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Raw bytes in, container out.
    Compress,
    /// Container in, raw bytes out.
    Decompress,
}

/// Compression algorithm, and with it the container format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// DEFLATE in a gzip container.
    Gzip,
    /// Burrows-Wheeler in a bzip2 stream.
    Bzip2,
}

fn one_shot(
    direction: Direction,
    algorithm: Algorithm,
    config: &Config,
    input: &[u8],
) -> Result<Vec<u8>> {
    let mut session = Session::new(direction, algorithm);
    session.initialize(config)?;

    let mut output = session.feed(input)?;
    output.extend(session.finalize()?);
    Ok(output)
}

/// Compresses all of `input` through a single session.
pub fn compress(algorithm: Algorithm, config: &Config, input: &[u8]) -> Result<Vec<u8>> {
    one_shot(Direction::Compress, algorithm, config, input)
}

/// Decompresses a complete container held in memory.
///
/// Truncated input is reported as [`BackendErrorKind::CorruptData`], as are bytes after the
/// end of the stream. A single gzip member or bzip2 stream is expected, so concatenated
/// members (as produced by `cat a.gz b.gz`) are rejected the same way.
pub fn decompress(algorithm: Algorithm, config: &Config, input: &[u8]) -> Result<Vec<u8>> {
    one_shot(Direction::Decompress, algorithm, config, input)
}
