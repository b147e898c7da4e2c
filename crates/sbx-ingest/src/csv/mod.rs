//! Comma-separated text decoding.

mod reader;

pub(crate) use reader::decode_delimited;
