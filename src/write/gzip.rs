use crate::{codec::Header, Algorithm, Config, Direction, Level};
use std::io::{self, Write};

adaptor! {
    /// A gzip encoder, or compressor.
    GzipEncoder
}

adaptor! {
    /// A gzip decoder, or decompressor.
    GzipDecoder
}

impl<W: Write> GzipEncoder<W> {
    /// Creates a new encoder which will take in uncompressed data and write it compressed to
    /// the given writer.
    ///
    /// Fails with [`InvalidInput`](io::ErrorKind::InvalidInput) for a level outside `0..=9`.
    pub fn new(writer: W, level: Level) -> io::Result<Self> {
        let config = Config::default().with_level(level);
        Ok(Self {
            inner: crate::write::Writer::new(
                writer,
                Direction::Compress,
                Algorithm::Gzip,
                &config,
            )?,
        })
    }
}

impl<W: Write> GzipDecoder<W> {
    /// Creates a new decoder which will take in a gzip stream and write it uncompressed to
    /// the given writer.
    ///
    /// Only a single member is decoded; bytes following it fail the next write.
    pub fn new(writer: W) -> io::Result<Self> {
        Ok(Self {
            inner: crate::write::Writer::new(
                writer,
                Direction::Decompress,
                Algorithm::Gzip,
                &Config::default(),
            )?,
        })
    }
}

impl<W> GzipDecoder<W> {
    /// The gzip header, once all of it has been written in.
    pub fn header(&self) -> Option<&Header> {
        self.inner.session().gzip_header()
    }
}
