use crate::{classify, codec::Progress, util::PartialBuffer, Result};

use flate2::{Compress, Compression, FlushCompress, Status};

/// Raw deflate compressor; framing is left to the caller.
#[derive(Debug)]
pub(crate) struct FlateEncoder {
    compress: Compress,
}

impl FlateEncoder {
    pub(crate) fn new(level: Compression) -> Self {
        Self {
            compress: Compress::new(level, false),
        }
    }

    fn run(
        &mut self,
        input: &mut PartialBuffer<&[u8]>,
        output: &mut PartialBuffer<&mut [u8]>,
        flush: FlushCompress,
    ) -> Result<Status> {
        let prior_in = self.compress.total_in();
        let prior_out = self.compress.total_out();

        let status = self
            .compress
            .compress(input.unwritten(), output.unwritten_mut(), flush)
            .map_err(classify::deflate_error)?;

        input.advance(classify::delta(prior_in, self.compress.total_in())?);
        output.advance(classify::delta(prior_out, self.compress.total_out())?);

        Ok(status)
    }

    pub(crate) fn encode(
        &mut self,
        input: &mut PartialBuffer<&[u8]>,
        output: &mut PartialBuffer<&mut [u8]>,
    ) -> Result<Progress> {
        let status = self.run(input, output, FlushCompress::None)?;
        Ok(classify::deflate_step(status))
    }

    pub(crate) fn finish(&mut self, output: &mut PartialBuffer<&mut [u8]>) -> Result<Progress> {
        let status = self.run(&mut PartialBuffer::new(&[][..]), output, FlushCompress::Finish)?;
        classify::deflate_finish(status)
    }
}
