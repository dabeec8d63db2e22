use crate::{classify, codec::Progress, Result};
use std::fmt;

use bzip2::{Action, Compress, Compression};

/// bzip2 compressor.
pub struct BzEncoder {
    compress: Compress,
    done: bool,
}

impl fmt::Debug for BzEncoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BzEncoder {{total_in: {}, total_out: {}}}",
            self.compress.total_in(),
            self.compress.total_out()
        )
    }
}

impl BzEncoder {
    /// Creates a new stream prepared for compression.
    ///
    /// The `work_factor` parameter controls how the compression phase behaves
    /// when presented with worst case, highly repetitive, input data. If
    /// compression runs into difficulties caused by repetitive data, the
    /// library switches from the standard sorting algorithm to a fallback
    /// algorithm. The fallback is slower than the standard algorithm by perhaps
    /// a factor of three, but always behaves reasonably, no matter how bad the
    /// input.
    ///
    /// Lower values of `work_factor` reduce the amount of effort the standard
    /// algorithm will expend before resorting to the fallback. Allowable values
    /// range from 0 to 250 inclusive. 0 is a special case, equivalent to using
    /// the default libbz2 value of 30.
    pub(crate) fn new(level: Compression, work_factor: u32) -> Self {
        Self {
            compress: Compress::new(level, work_factor),
            done: false,
        }
    }

    /// Run one library call, then interpret its status with `interpret`.
    ///
    /// Return `Ok((progress, input_consumed, output_produced))`
    fn run(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        action: Action,
        interpret: impl FnOnce(std::result::Result<bzip2::Status, bzip2::Error>) -> Result<Progress>,
    ) -> Result<(Progress, usize, usize)> {
        let prior_in = self.compress.total_in();
        let prior_out = self.compress.total_out();

        let progress = interpret(self.compress.compress(input, output, action))?;

        Ok((
            progress,
            classify::delta(prior_in, self.compress.total_in())?,
            classify::delta(prior_out, self.compress.total_out())?,
        ))
    }

    /// Compress `input` into `output`.
    ///
    /// Return `Ok((progress, input_consumed, output_produced))`
    pub fn encode(&mut self, input: &[u8], output: &mut [u8]) -> Result<(Progress, usize, usize)> {
        if self.done {
            return Err(classify::invariant("bzip2 encoder fed after stream end"));
        }

        let idle = input.is_empty();
        self.run(input, output, Action::Run, |result| {
            classify::bzip_run(result, idle)
        })
    }

    /// Write the remaining blocks and the stream trailer.
    ///
    /// Return `Ok((progress, output_produced))`
    pub fn finish(&mut self, output: &mut [u8]) -> Result<(Progress, usize)> {
        if self.done {
            return Ok((Progress::Done, 0));
        }

        let (progress, _, produced) =
            self.run(&[], output, Action::Finish, classify::bzip_finish)?;

        self.done = progress == Progress::Done;
        Ok((progress, produced))
    }
}
