//! Translation of `flate2` and `bzip2` status vocabularies into [`Progress`] and [`Error`].
//!
//! Every library status the codecs can observe is mapped here, so the per-algorithm quirks
//! (what counts as "call again", what counts as "stream ended", and which failures are bad
//! input versus a broken contract) live in one place.

use crate::{codec::Progress, BackendErrorKind, Error, Result};
use std::convert::TryFrom;

pub(crate) fn corrupt(message: impl Into<String>) -> Error {
    Error::Backend {
        kind: BackendErrorKind::CorruptData,
        message: message.into(),
    }
}

/// Builds an [`Error::InternalInvariant`], logging it so it stands out from ordinary bad input.
pub(crate) fn invariant(message: impl Into<String>) -> Error {
    let message = message.into();
    log::error!("internal invariant violated: {}", message);
    Error::InternalInvariant { message }
}

/// Whether the backend has to be released before `error` is reported.
///
/// Only failures that happen before the backend is touched leave the session usable.
pub(crate) fn requires_release(error: &Error) -> bool {
    match error {
        Error::InvalidArgument { .. } | Error::InvalidState { .. } => false,
        Error::Backend { .. } | Error::InternalInvariant { .. } | Error::OutOfMemory { .. } => true,
    }
}

/// Bytes moved between two readings of a library's running total.
pub(crate) fn delta(prior: u64, now: u64) -> Result<usize> {
    let moved = now.checked_sub(prior).ok_or_else(|| {
        invariant(format!(
            "byte counter moved backwards from {} to {}",
            prior, now
        ))
    })?;
    usize::try_from(moved).map_err(|_| invariant(format!("{} bytes in a single call", moved)))
}

pub(crate) fn deflate_step(status: flate2::Status) -> Progress {
    match status {
        flate2::Status::Ok => Progress::Continue,

        // No progress was possible with the given buffers; not an error, the slice is spent.
        flate2::Status::BufError => Progress::Continue,

        flate2::Status::StreamEnd => Progress::Done,
    }
}

pub(crate) fn deflate_finish(status: flate2::Status) -> Result<Progress> {
    match status {
        flate2::Status::Ok => Ok(Progress::Continue),
        flate2::Status::StreamEnd => Ok(Progress::Done),
        flate2::Status::BufError => Err(invariant(
            "deflate finish made no progress with output space available",
        )),
    }
}

/// Compression never sees bad input, so any failure means the stream state was clobbered.
pub(crate) fn deflate_error(error: flate2::CompressError) -> Error {
    invariant(format!("deflate stream state clobbered: {}", error))
}

pub(crate) fn inflate_error(error: flate2::DecompressError) -> Error {
    if error.needs_dictionary().is_some() {
        corrupt("deflate stream requires a preset dictionary")
    } else {
        corrupt(error.to_string())
    }
}

/// Status of a `BZ_RUN` call. `idle` is set when it was given no input.
pub(crate) fn bzip_run(
    result: std::result::Result<bzip2::Status, bzip2::Error>,
    idle: bool,
) -> Result<Progress> {
    match result {
        Ok(bzip2::Status::RunOk) => Ok(Progress::Continue),

        // `BZ_RUN` without input and without pending output reports a parameter error.
        Err(bzip2::Error::Param) if idle => Ok(Progress::Continue),

        Ok(status) => Err(invariant(format!(
            "bzip2 compress run returned {:?}, expected RunOk",
            status
        ))),
        Err(error) => Err(bzip_error(error)),
    }
}

/// Status of a `BZ_FINISH` call; completion requires `StreamEnd`.
pub(crate) fn bzip_finish(
    result: std::result::Result<bzip2::Status, bzip2::Error>,
) -> Result<Progress> {
    match result {
        Ok(bzip2::Status::FinishOk) => Ok(Progress::Continue),
        Ok(bzip2::Status::StreamEnd) => Ok(Progress::Done),
        Ok(status) => Err(invariant(format!(
            "bzip2 compress finish returned {:?}, expected FinishOk or StreamEnd",
            status
        ))),
        Err(error) => Err(bzip_error(error)),
    }
}

pub(crate) fn bzip_decompress(
    result: std::result::Result<bzip2::Status, bzip2::Error>,
) -> Result<Progress> {
    match result? {
        // Decompression went fine, nothing much to report.
        bzip2::Status::Ok => Ok(Progress::Continue),

        // The stream's end has been met, meaning that no more data can be input.
        bzip2::Status::StreamEnd => Ok(Progress::Done),

        bzip2::Status::MemNeeded => Err(Error::Backend {
            kind: BackendErrorKind::OutOfMemory,
            message: "bzip2 decompressor needs more memory".into(),
        }),

        status @ bzip2::Status::RunOk
        | status @ bzip2::Status::FlushOk
        | status @ bzip2::Status::FinishOk => Err(invariant(format!(
            "bzip2 decompress returned compression status {:?}",
            status
        ))),
    }
}

pub(crate) fn bzip_error(error: bzip2::Error) -> Error {
    match error {
        bzip2::Error::Data | bzip2::Error::DataMagic | bzip2::Error::Param => {
            corrupt(error.to_string())
        }
        bzip2::Error::Sequence => invariant(format!("bzip2 call out of sequence: {}", error)),
    }
}

impl From<bzip2::Error> for Error {
    fn from(error: bzip2::Error) -> Self {
        bzip_error(error)
    }
}
