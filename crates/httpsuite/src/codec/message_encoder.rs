//! HTTP message encoder implementation for compiling messages back to the wire
//!
//! The wire form is:
//!
//! ```text
//! <start-line>\r\n
//! <Header-Name>: <value>\r\n   (zero or more, in insertion order)
//! \r\n
//! <body bytes>
//! ```
//!
//! The encoder doesn't add, remove or fix up any header: the message is
//! written exactly as it is held.

use bytes::{BufMut, BytesMut};
use tracing::trace;

use crate::protocol::{Message, StartLine};

/// Encoder writing a [`Message`] into a bytes buffer.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageEncoder;

impl MessageEncoder {
    /// Encodes `message` into `dst`.
    pub fn encode<L: StartLine>(&self, message: &Message<L>, dst: &mut BytesMut) {
        let headers_size: usize = message.headers().iter().map(|(name, value)| name.len() + value.len() + 4).sum();
        dst.reserve(headers_size + message.body().len() + 64);

        message.line().encode(message.protocol(), dst);
        dst.put_slice(b"\r\n");

        message.headers().encode(dst);
        dst.put_slice(b"\r\n");

        dst.put_slice(message.body().as_bytes());
        trace!(header_count = message.headers().len(), body_size = message.body().len(), "encoded message");
    }
}
