//! HTTP request handling.
//!
//! A request is a [`Message`] whose start line is `METHOD SP TARGET SP PROTOCOL`.

use bytes::{BufMut, Bytes, BytesMut};

use crate::lookup::METHODS;
use crate::protocol::{Headers, Item, Message, ParseError, StartLine};

/// The request line: method and target. The protocol lives on the [`Message`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    method: Item,
    target: Item,
}

impl StartLine for RequestLine {
    const ARROW: char = '→';

    /// Splits on single spaces into exactly `method`, `target` and `protocol`.
    fn parse(line: &Bytes) -> Result<(Self, Item), ParseError> {
        let mut tokens = line.split(|b| *b == b' ');

        let (Some(method), Some(target), Some(protocol), None) =
            (tokens.next(), tokens.next(), tokens.next(), tokens.next())
        else {
            return Err(ParseError::malformed_start_line(line));
        };

        let request_line = RequestLine { method: line.slice_ref(method).into(), target: line.slice_ref(target).into() };
        Ok((request_line, line.slice_ref(protocol).into()))
    }

    fn encode(&self, protocol: &Item, dst: &mut BytesMut) {
        dst.reserve(self.method.len() + self.target.len() + protocol.len() + 2);
        dst.put_slice(self.method.as_bytes());
        dst.put_u8(b' ');
        dst.put_slice(self.target.as_bytes());
        dst.put_u8(b' ');
        dst.put_slice(protocol.as_bytes());
    }
}

/// An HTTP/1.x request.
pub type Request = Message<RequestLine>;

impl Request {
    /// Creates a request with no headers and an empty body.
    pub fn new<M, T, P>(method: M, target: T, protocol: P) -> Self
    where
        M: Into<Item>,
        T: Into<Item>,
        P: Into<Item>,
    {
        let line = RequestLine { method: method.into(), target: target.into() };
        Message::from_parts(line, protocol.into(), Headers::new(), Item::empty())
    }

    /// The desired action on the target resource.
    #[inline]
    pub fn method(&self) -> &Item {
        &self.line().method
    }

    pub fn set_method<V: Into<Item>>(&mut self, value: V) {
        self.line_mut().method = value.into();
    }

    /// The resource the request is aimed at.
    #[inline]
    pub fn target(&self) -> &Item {
        &self.line().target
    }

    pub fn set_target<V: Into<Item>>(&mut self, value: V) {
        self.line_mut().target = value.into();
    }

    /// Returns true if the method is one of the standard HTTP methods.
    ///
    /// Methods are case-sensitive, `get` is not standard.
    pub fn has_standard_method(&self) -> bool {
        METHODS.contains(self.method())
    }
}
