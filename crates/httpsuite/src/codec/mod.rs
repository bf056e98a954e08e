//! HTTP codec module for parsing and compiling HTTP/1.x messages
//!
//! # Architecture
//!
//! - [`MessageDecoder`]: raw bytes to a [`Message`](crate::protocol::Message),
//!   configured by [`ParseOptions`]
//! - [`MessageEncoder`]: a [`Message`](crate::protocol::Message) back to raw bytes
//!
//! Both are generic over the start line, so the same engine serves requests
//! and responses. Most callers go through
//! [`Message::parse`](crate::protocol::Message::parse) and
//! [`Message::raw`](crate::protocol::Message::raw) instead of using them directly.
//!
//! # Example
//!
//! ```
//! use bytes::{Bytes, BytesMut};
//! use httpsuite::codec::{MessageDecoder, MessageEncoder, ParseOptions};
//! use httpsuite::protocol::Request;
//!
//! let src = Bytes::from_static(b"GET / HTTP/1.1\r\nHost: x\r\n\r\n");
//! let request: Request = MessageDecoder::new(ParseOptions::default()).decode(src.clone()).unwrap();
//!
//! let mut dst = BytesMut::new();
//! MessageEncoder.encode(&request, &mut dst);
//! assert_eq!(dst.freeze(), src);
//! ```

mod message_decoder;
mod message_encoder;

pub use message_decoder::MessageDecoder;
pub use message_decoder::ParseOptions;
pub use message_encoder::MessageEncoder;
