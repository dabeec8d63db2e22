use crate::{Algorithm, Config, Direction, Level};
use std::io::{self, Write};

adaptor! {
    /// A bzip2 encoder, or compressor.
    BzEncoder
}

adaptor! {
    /// A bzip2 decoder, or decompressor.
    BzDecoder
}

impl<W: Write> BzEncoder<W> {
    /// Creates a new encoder which will take in uncompressed data and write it compressed to
    /// the given writer.
    ///
    /// `level` must be within `1..=9` and `work_factor` within `0..=250`, see
    /// [`Config::work_factor`].
    pub fn new(writer: W, level: Level, work_factor: u32) -> io::Result<Self> {
        let config = Config::default()
            .with_level(level)
            .with_work_factor(work_factor);
        Ok(Self {
            inner: crate::write::Writer::new(
                writer,
                Direction::Compress,
                Algorithm::Bzip2,
                &config,
            )?,
        })
    }
}

impl<W: Write> BzDecoder<W> {
    /// Creates a new decoder which will take in a bzip2 stream and write it uncompressed to
    /// the given writer. `low_memory` selects the library's slower, smaller decompressor.
    pub fn new(writer: W, low_memory: bool) -> io::Result<Self> {
        let config = Config::default().with_low_memory(low_memory);
        Ok(Self {
            inner: crate::write::Writer::new(
                writer,
                Direction::Decompress,
                Algorithm::Bzip2,
                &config,
            )?,
        })
    }
}
