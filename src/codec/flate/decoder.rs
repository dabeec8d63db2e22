use crate::{classify, codec::Progress, util::PartialBuffer, Result};

use flate2::{Decompress, FlushDecompress};

/// Raw deflate decompressor; framing is left to the caller.
#[derive(Debug)]
pub(crate) struct FlateDecoder {
    decompress: Decompress,
}

impl FlateDecoder {
    pub(crate) fn new() -> Self {
        Self {
            decompress: Decompress::new(false),
        }
    }

    /// Return `Progress::Done` once the final deflate block has been decoded.
    pub(crate) fn decode(
        &mut self,
        input: &mut PartialBuffer<&[u8]>,
        output: &mut PartialBuffer<&mut [u8]>,
    ) -> Result<Progress> {
        let prior_in = self.decompress.total_in();
        let prior_out = self.decompress.total_out();

        let status = self
            .decompress
            .decompress(input.unwritten(), output.unwritten_mut(), FlushDecompress::None)
            .map_err(classify::inflate_error)?;

        input.advance(classify::delta(prior_in, self.decompress.total_in())?);
        output.advance(classify::delta(prior_out, self.decompress.total_out())?);

        Ok(classify::deflate_step(status))
    }
}
