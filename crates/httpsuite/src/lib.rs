//! Parse, modify and re-compile HTTP/1.x messages
//!
//! This crate provides a structured, mutable representation of an HTTP/1.x
//! request or response. A message can be built from typed fields, parsed from
//! its raw wire form, changed field by field, and compiled back to the wire.
//! It does no I/O: bytes come from and go to the caller.
//!
//! # Features
//!
//! - Lossless round trip: `parse` then `raw` reproduces a well-formed message byte for byte
//! - Type-agnostic fields: every field accepts text, integers or raw bytes and
//!   compares equal across them
//! - Header names matched case-insensitively, with `_` and `-` interchangeable,
//!   while the original spelling is kept on the wire
//! - Lenient body handling with an opt-in strict `Content-Length` check
//! - Zero-copy parsing: parsed fields share the input buffer
//!
//! # Example
//!
//! ```
//! use httpsuite::Request;
//!
//! let mut request = Request::parse(
//!     b"POST /post HTTP/1.1\r\nHost: httpbin.org\r\nContent-Length: 18\r\n\r\n{\"hello\": \"world\"}",
//! )
//! .unwrap();
//!
//! assert_eq!(request.method(), "POST");
//! assert_eq!(request.headers().content_length().unwrap(), 18);
//!
//! request.set_method("GET");
//!
//! assert_eq!(
//!     &request.raw()[..],
//!     &b"GET /post HTTP/1.1\r\nHost: httpbin.org\r\nContent-Length: 18\r\n\r\n{\"hello\": \"world\"}"[..]
//! );
//! ```
//!
//! # Architecture
//!
//! The crate is organized into several key modules:
//!
//! - [`protocol`]: Message types and the value model
//! - [`codec`]: Parsing and compiling implementation
//! - [`lookup`]: Immutable tables (status reasons, standard methods)
//!
//! # Error Handling
//!
//! The crate uses custom error types that implement `std::error::Error`:
//!
//! - [`protocol::HttpError`]: Top-level error type
//! - [`protocol::ParseError`]: Parsing errors
//! - [`protocol::ItemError`]: Value conversion errors
//! - [`protocol::HeaderNotFound`]: Header lookup errors
//!
//! # Limitations
//!
//! - HTTP/1.x only (HTTP/2 or HTTP/3 framing is not supported)
//! - Chunked transfer coding is detected but not decoded
//! - Repeated header names collapse into one entry (last value wins)

pub mod codec;
pub mod lookup;
pub mod protocol;

pub use protocol::{Headers, Item, Request, Response};

mod utils;
pub(crate) use utils::ensure;
