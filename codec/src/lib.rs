//! Little-endian wire primitives for EOSIO binary formats.
//!
//! # Overview
//!
//! A position-tracked byte cursor is modeled with [bytes::Buf] (reading) and [bytes::BufMut]
//! (writing). Types implement [Write] to append themselves to a buffer and [Read] to consume
//! themselves from one. All fixed-width integers are little-endian, lengths and counts are
//! LEB128 varints (`varuint32` on the wire).
//!
//! # Supported Types
//!
//! - Primitives: `u8`, `u16`, `u32`, `u64`, `i8`, `i16`, `i32`, `i64`, `f64`, `bool`
//! - Fixed windows: `[u8; N]`
//! - Length-prefixed: [bytes::Bytes], [String]
//! - Varints: [varint::UVar] and [varint::SVar]
//!
//! # Example
//!
//! ```
//! use bytes::{Buf, BufMut};
//! use eosio_codec::{DecodeExt, Encode, EncodeSize, Error, Read, ReadExt, Write};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct PermissionLevel {
//!     actor: u64,
//!     permission: u64,
//! }
//!
//! impl Write for PermissionLevel {
//!     fn write(&self, buf: &mut impl BufMut) {
//!         self.actor.write(buf);
//!         self.permission.write(buf);
//!     }
//! }
//!
//! impl Read for PermissionLevel {
//!     type Cfg = ();
//!     fn read_cfg(buf: &mut impl Buf, _: &()) -> Result<Self, Error> {
//!         let actor = u64::read(buf)?;
//!         let permission = u64::read(buf)?;
//!         Ok(Self { actor, permission })
//!     }
//! }
//!
//! impl EncodeSize for PermissionLevel {
//!     fn encode_size(&self) -> usize {
//!         self.actor.encode_size() + self.permission.encode_size()
//!     }
//! }
//!
//! let level = PermissionLevel { actor: 1, permission: 2 };
//! let encoded = level.encode();
//! assert_eq!(encoded.len(), 16);
//! assert_eq!(PermissionLevel::decode(encoded).unwrap(), level);
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod types;
pub mod util;
pub mod varint;

pub use codec::{Decode, DecodeExt, Encode, EncodeSize, FixedSize, Read, ReadExt, Write};
pub use config::RangeCfg;
pub use error::Error;
