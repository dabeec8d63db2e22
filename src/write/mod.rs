//! Types which operate over [`Write`](std::io::Write) streams, both encoders and decoders for
//! gzip and bzip2.
//!
//! Every call to `write` feeds the bytes through a [`Session`](crate::Session) and passes the
//! output on to the wrapped writer. Call `finish` to flush the trailer and recover the writer;
//! dropping an adaptor without finishing releases the session and leaves the output
//! incomplete.
//!
//! ```
//! use gzbz2::{write::GzipEncoder, Level};
//! use std::io::Write;
//!
//! let mut encoder = GzipEncoder::new(Vec::new(), Level::Fastest)?;
//! encoder.write_all(b"hello world")?;
//! let compressed = encoder.finish()?;
//!
//! assert_eq!(&compressed[..2], [0x1f, 0x8b]);
//! # Ok::<(), std::io::Error>(())
//! ```

mod generic;
#[macro_use]
mod macros;

mod bzip2;
mod gzip;

pub use self::{
    bzip2::{BzDecoder, BzEncoder},
    generic::Writer,
    gzip::{GzipDecoder, GzipEncoder},
};
