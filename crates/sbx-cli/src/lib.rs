//! Library components of the `sbox-studio` command-line tool.

pub mod logging;
pub mod render;
pub mod settings;
