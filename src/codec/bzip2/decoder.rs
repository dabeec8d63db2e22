use crate::{classify, codec::Progress, Result};
use std::fmt;

use bzip2::Decompress;

/// bzip2 decompressor for a single stream.
pub struct BzDecoder {
    decompress: Decompress,
    done: bool,
}

impl fmt::Debug for BzDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BzDecoder {{total_in: {}, total_out: {}, done: {}}}",
            self.decompress.total_in(),
            self.decompress.total_out(),
            self.done
        )
    }
}

impl BzDecoder {
    /// `low_memory` selects the library's slower, smaller decompression algorithm.
    pub(crate) fn new(low_memory: bool) -> Self {
        Self {
            decompress: Decompress::new(low_memory),
            done: false,
        }
    }

    /// Decompress `input` into `output`.
    ///
    /// Return `Ok((progress, input_consumed, output_produced))`
    pub fn decode(&mut self, input: &[u8], output: &mut [u8]) -> Result<(Progress, usize, usize)> {
        if self.done {
            if !input.is_empty() {
                return Err(classify::corrupt("trailing data after bzip2 stream"));
            }
            return Ok((Progress::Done, 0, 0));
        }

        let prior_in = self.decompress.total_in();
        let prior_out = self.decompress.total_out();

        let progress = classify::bzip_decompress(self.decompress.decompress(input, output))?;

        let consumed = classify::delta(prior_in, self.decompress.total_in())?;
        let produced = classify::delta(prior_out, self.decompress.total_out())?;

        if progress == Progress::Done {
            self.done = true;
            if consumed < input.len() {
                return Err(classify::corrupt("trailing data after bzip2 stream"));
            }
        }

        Ok((progress, consumed, produced))
    }

    /// Succeeds only once the end-of-stream marker has been decoded.
    pub fn finish(&mut self, _output: &mut [u8]) -> Result<(Progress, usize)> {
        if self.done {
            Ok((Progress::Done, 0))
        } else {
            Err(classify::corrupt("unexpected end of bzip2 stream"))
        }
    }
}
