macro_rules! algos {
    ($(pub mod $name:ident($algorithm:ident) { pub mod sync { $($tt:tt)* } })*) => {
        $(
            pub mod $name {
                pub const ALGORITHM: gzbz2::Algorithm = gzbz2::Algorithm::$algorithm;

                pub mod sync { $($tt)* }

                pub mod session {
                    use crate::utils::InputStream;
                    use gzbz2::{Config, Direction, Level, Result, Session};

                    /// Feeds every chunk through one session, then finalizes it.
                    pub fn run(
                        direction: Direction,
                        config: &Config,
                        input: &InputStream,
                    ) -> Result<Vec<u8>> {
                        let mut session = Session::new(direction, super::ALGORITHM);
                        session.initialize(config)?;

                        let mut output = Vec::new();
                        for chunk in input.as_ref() {
                            output.extend(session.feed(chunk)?);
                        }
                        output.extend(session.finalize()?);
                        Ok(output)
                    }

                    pub fn compress_with(level: Level, input: &InputStream) -> Vec<u8> {
                        let config = Config::default().with_level(level);
                        run(Direction::Compress, &config, input).unwrap()
                    }

                    pub fn compress(input: &InputStream) -> Vec<u8> {
                        compress_with(Level::Fastest, input)
                    }

                    pub fn try_decompress(input: &InputStream) -> Result<Vec<u8>> {
                        run(Direction::Decompress, &Config::default(), input)
                    }

                    pub fn decompress(input: &InputStream) -> Vec<u8> {
                        try_decompress(input).unwrap()
                    }
                }

                pub mod write {
                    use crate::utils::InputStream;
                    use gzbz2::{write::Writer, Config, Direction, Level};
                    use std::io::{self, Write};

                    pub fn run(direction: Direction, config: &Config, input: &InputStream) -> io::Result<Vec<u8>> {
                        let mut writer = Writer::new(Vec::new(), direction, super::ALGORITHM, config)?;
                        for chunk in input.as_ref() {
                            writer.write_all(chunk)?;
                        }
                        writer.finish()
                    }

                    pub fn compress(input: &InputStream) -> Vec<u8> {
                        let config = Config::default().with_level(Level::Fastest);
                        run(Direction::Compress, &config, input).unwrap()
                    }

                    pub fn decompress(input: &InputStream) -> Vec<u8> {
                        run(Direction::Decompress, &Config::default(), input).unwrap()
                    }
                }
            }
        )*
    }
}

algos! {
    pub mod gzip(Gzip) {
        pub mod sync {
            use crate::utils::read_to_vec;

            pub fn compress(bytes: &[u8]) -> Vec<u8> {
                use flate2::{bufread::GzEncoder, Compression};
                read_to_vec(GzEncoder::new(bytes, Compression::fast()))
            }

            pub fn decompress(bytes: &[u8]) -> Vec<u8> {
                use flate2::bufread::GzDecoder;
                read_to_vec(GzDecoder::new(bytes))
            }
        }
    }

    pub mod bzip2(Bzip2) {
        pub mod sync {
            use crate::utils::read_to_vec;

            pub fn compress(bytes: &[u8]) -> Vec<u8> {
                use ::bzip2::{bufread::BzEncoder, Compression};
                read_to_vec(BzEncoder::new(bytes, Compression::fast()))
            }

            pub fn decompress(bytes: &[u8]) -> Vec<u8> {
                use ::bzip2::bufread::BzDecoder;
                read_to_vec(BzDecoder::new(bytes))
            }
        }
    }
}
