#![allow(dead_code, unused_imports, unused_macros)] // Different tests use a different subset of functions

mod input_stream;
pub mod algos;
#[macro_use]
mod test_cases;

pub use self::input_stream::InputStream;
pub use gzbz2::{buffer::INCREMENT, Algorithm, BackendErrorKind, Config, Direction, Error, Level};
pub use std::iter::FromIterator;

use std::io::Read;

pub fn read_to_vec(mut read: impl Read) -> Vec<u8> {
    let mut output = vec![];
    read.read_to_end(&mut output).unwrap();
    output
}

/// `size` bytes that compress well but are not a single repeated byte.
pub fn patterned(size: usize) -> Vec<u8> {
    Vec::from_iter((0..size).map(|i| (i % 251) as u8))
}

/// `size` bytes that do not compress.
pub fn random(size: usize) -> Vec<u8> {
    Vec::from_iter((0..size).map(|_| rand::random::<u8>()))
}
