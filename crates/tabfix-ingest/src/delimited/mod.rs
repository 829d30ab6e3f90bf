//! Delimited-text reading.

mod encoding;
mod reader;

pub use encoding::decode_text;
pub use reader::{read_delimited, read_delimited_bytes};
