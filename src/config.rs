use crate::{Algorithm, Direction, Error, Result};

/// Highest work factor bzip2 accepts.
pub const MAX_WORK_FACTOR: u32 = 250;

/// Work factor used when none is given.
pub const DEFAULT_WORK_FACTOR: u32 = 30;

/// Level of compression data should be compressed with.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// Fastest quality of compression, usually produces bigger size.
    Fastest,
    /// Best quality of compression, usually produces the smallest size.
    Best,
    /// Default quality of compression defined by the selected compression algorithm.
    Default,
    /// Precise quality based on the underlying compression algorithms' qualities.
    ///
    /// gzip accepts `0..=9`, bzip2 accepts `1..=9`. Anything else is rejected when the session
    /// is initialized rather than clamped.
    Precise(u32),
}

impl Default for Level {
    fn default() -> Self {
        Self::Default
    }
}

impl Level {
    pub(crate) fn into_flate2(self) -> Result<flate2::Compression> {
        match self {
            Self::Fastest => Ok(flate2::Compression::fast()),
            Self::Best => Ok(flate2::Compression::best()),
            Self::Precise(quality) if quality <= 9 => Ok(flate2::Compression::new(quality)),
            Self::Precise(quality) => Err(Error::InvalidArgument {
                message: format!("invalid gzip compression level: {}", quality),
            }),
            Self::Default => Ok(flate2::Compression::default()),
        }
    }

    pub(crate) fn into_bzip2(self) -> Result<bzip2::Compression> {
        match self {
            Self::Fastest => Ok(bzip2::Compression::fast()),
            Self::Best => Ok(bzip2::Compression::best()),
            Self::Precise(quality) if (1..=9).contains(&quality) => {
                Ok(bzip2::Compression::new(quality))
            }
            Self::Precise(quality) => Err(Error::InvalidArgument {
                message: format!("invalid bzip2 compression level: {}", quality),
            }),
            // Smallest block size, the cheapest in memory for both ends.
            Self::Default => Ok(bzip2::Compression::fast()),
        }
    }
}

/// Parameters fixed when a session is initialized.
///
/// Every field has a value for every algorithm; the ones that do not apply to the session's
/// direction and algorithm are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Compression level (compression only).
    pub level: Level,
    /// bzip2 work factor, `0..=250` (bzip2 compression only).
    pub work_factor: u32,
    /// Use bzip2's slower, smaller-memory decompression mode (bzip2 decompression only).
    pub low_memory: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: Level::Default,
            work_factor: DEFAULT_WORK_FACTOR,
            low_memory: false,
        }
    }
}

impl Config {
    /// Sets the compression level.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets the bzip2 work factor.
    pub fn with_work_factor(mut self, work_factor: u32) -> Self {
        self.work_factor = work_factor;
        self
    }

    /// Selects bzip2's small-memory decompression mode.
    pub fn with_low_memory(mut self, low_memory: bool) -> Self {
        self.low_memory = low_memory;
        self
    }

    /// Checks every value that applies to `direction` and `algorithm`.
    pub fn validate(&self, direction: Direction, algorithm: Algorithm) -> Result<()> {
        match (direction, algorithm) {
            (Direction::Compress, Algorithm::Gzip) => self.level.into_flate2().map(drop),
            (Direction::Compress, Algorithm::Bzip2) => {
                self.level.into_bzip2()?;
                self.check_work_factor()
            }
            (Direction::Decompress, _) => Ok(()),
        }
    }

    pub(crate) fn check_work_factor(&self) -> Result<()> {
        if self.work_factor > MAX_WORK_FACTOR {
            return Err(Error::InvalidArgument {
                message: format!("invalid workfactor: {}", self.work_factor),
            });
        }
        Ok(())
    }
}
