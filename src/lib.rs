//! Encode text strings as null-terminated C byte array literals.
//!
//! ```
//! use strencode::encoder::encode_string;
//!
//! assert_eq!(encode_string("A"), "{ 0x41, 0x00 }");
//! ```

pub mod config;
pub mod encoder;
pub mod error;
