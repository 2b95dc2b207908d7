//! Decoder for PHP's native `serialize()` format.
//!
//! WordPress stores structured metadata (attachment sizes, EXIF data,
//! plugin settings) in this format inside plain text columns, which is how
//! it ends up embedded in export files. The decoder is independent of the
//! XML layer.

mod decoder;
mod value;

pub use decoder::{unserialize, unserialize_bytes, DecodeError, DecodeErrorKind};
pub use value::{PhpKey, PhpValue};
