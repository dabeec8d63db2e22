mod decoder;
mod encoder;
mod header;

pub use self::{decoder::GzipDecoder, encoder::GzipEncoder, header::Header};

const MAGIC: [u8; 2] = [0x1f, 0x8b];
const CM_DEFLATE: u8 = 0x08;

/// "Unknown" in the header's operating system field.
const OS_UNKNOWN: u8 = 0xff;

const FOOTER_LEN: usize = 8;
