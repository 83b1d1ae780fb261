//! Format module containing the JSON codec for `redirects.json`.

pub mod codec;

pub use codec::{decode_redirects, encode_redirects, FormatError};
