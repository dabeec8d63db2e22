mod decoder;
mod encoder;

pub use self::{decoder::BzDecoder, encoder::BzEncoder};
