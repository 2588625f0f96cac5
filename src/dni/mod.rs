//! DNI firmware images: an optional 128-byte text header in front of the
//! payload, and a one-byte checksum behind it.

pub mod board;
pub mod checksum;
pub mod encode;
pub mod files;
pub mod header;

pub use encode::{encode, EncodeError, EncodingRequest, DEFAULT_VERSION};
pub use files::{read_payload, write_image};
