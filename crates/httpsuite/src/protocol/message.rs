//! The message type shared by requests and responses.
//!
//! A [`Message`] holds the protocol version, the [`Headers`] and the body of an
//! HTTP/1.x message. What differs between a request and a response is only
//! the shape of the start line, which is abstracted by the [`StartLine`]
//! trait; see [`Request`](crate::protocol::Request) and
//! [`Response`](crate::protocol::Response).
//!
//! Three renderers are available on every message:
//!
//! - [`Message::raw`]: the exact wire bytes
//! - [`Message::string`]: the same content as text
//! - [`Display`](fmt::Display): an arrow-prefixed form for logs, not wire-compatible

use std::fmt;

use bytes::{Bytes, BytesMut};

use crate::codec::{MessageDecoder, MessageEncoder, ParseOptions};
use crate::protocol::{Headers, Item, ItemError, ParseError};

/// The first line of an HTTP/1.x message.
///
/// Implementors own the fields that are specific to the message kind; the
/// protocol version is owned by [`Message`] and handed in and out explicitly
/// because its position in the line differs between kinds.
pub trait StartLine: Sized {
    /// Prefix of every line in the pretty display form.
    const ARROW: char;

    /// Splits a start line into the kind-specific fields and the protocol.
    ///
    /// `line` doesn't contain the line terminator.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MalformedStartLine`] if the line doesn't have the expected shape.
    fn parse(line: &Bytes) -> Result<(Self, Item), ParseError>;

    /// Writes the start line, without the line terminator.
    fn encode(&self, protocol: &Item, dst: &mut BytesMut);
}

/// Represents the size information of an HTTP payload, as announced by its headers.
///
/// - Known length: `Content-Length` is present
/// - Chunked: `Transfer-Encoding` ends with `chunked`
/// - Empty: no framing header at all
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PayloadSize {
    /// Payload with known length in bytes
    Length(u64),
    /// Payload using chunked transfer encoding
    Chunked,
    /// Empty payload (no body)
    Empty,
}

impl PayloadSize {
    /// Returns true if the payload uses chunked transfer encoding
    #[inline]
    pub fn is_chunked(&self) -> bool {
        matches!(self, PayloadSize::Chunked)
    }

    /// Returns true if the payload is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, PayloadSize::Empty)
    }
}

/// An HTTP/1.x message with a start line of kind `L`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message<L> {
    line: L,
    protocol: Item,
    headers: Headers,
    body: Item,
}

impl<L: StartLine> Message<L> {
    pub(crate) fn from_parts(line: L, protocol: Item, headers: Headers, body: Item) -> Self {
        Self { line, protocol, headers, body }
    }

    /// Parses a raw message with the default [`ParseOptions`].
    ///
    /// # Errors
    ///
    /// Fails on a malformed start line or header line; nothing is returned
    /// partially.
    pub fn parse<D: AsRef<[u8]>>(data: D) -> Result<Self, ParseError> {
        Self::parse_with(data, &ParseOptions::default())
    }

    /// Parses a raw message with explicit options.
    ///
    /// # Errors
    ///
    /// Same as [`Message::parse`], plus the strict checks enabled in `options`.
    pub fn parse_with<D: AsRef<[u8]>>(data: D, options: &ParseOptions) -> Result<Self, ParseError> {
        MessageDecoder::new(*options).decode(Bytes::copy_from_slice(data.as_ref()))
    }

    #[inline]
    pub(crate) fn line(&self) -> &L {
        &self.line
    }

    #[inline]
    pub(crate) fn line_mut(&mut self) -> &mut L {
        &mut self.line
    }

    #[inline]
    pub fn protocol(&self) -> &Item {
        &self.protocol
    }

    pub fn set_protocol<V: Into<Item>>(&mut self, value: V) {
        self.protocol = value.into();
    }

    #[inline]
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    #[inline]
    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    pub fn set_headers<H: Into<Headers>>(&mut self, headers: H) {
        self.headers = headers.into();
    }

    #[inline]
    pub fn body(&self) -> &Item {
        &self.body
    }

    pub fn set_body<V: Into<Item>>(&mut self, value: V) {
        self.body = value.into();
    }

    #[must_use]
    pub fn with_headers<H: Into<Headers>>(mut self, headers: H) -> Self {
        self.set_headers(headers);
        self
    }

    #[must_use]
    pub fn with_body<V: Into<Item>>(mut self, value: V) -> Self {
        self.set_body(value);
        self
    }

    /// Returns the compiled start line.
    pub fn first_line(&self) -> Item {
        let mut dst = BytesMut::new();
        self.line.encode(&self.protocol, &mut dst);
        Item::from(dst.freeze())
    }

    /// Compiles the message into its wire form.
    pub fn raw(&self) -> Bytes {
        let mut dst = BytesMut::new();
        MessageEncoder.encode(self, &mut dst);
        dst.freeze()
    }

    /// Compiles the message into its wire form as text.
    ///
    /// # Errors
    ///
    /// Returns [`ItemError::Encoding`] if any field isn't valid UTF-8.
    pub fn string(&self) -> Result<String, ItemError> {
        let raw = self.raw();
        Ok(std::str::from_utf8(&raw)?.to_owned())
    }

    /// Determines how the body is framed according to the headers.
    ///
    /// Chunked transfer coding is only detected, never decoded.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidContentLength`] if `Content-Length` isn't an
    /// unsigned integer, or if it is present together with `Transfer-Encoding`.
    pub fn payload_size(&self) -> Result<PayloadSize, ParseError> {
        // refer: https://www.rfc-editor.org/rfc/rfc9112.html#name-transfer-encoding
        match (self.headers.transfer_encoding(), self.headers.content_length()) {
            (None, None) => Ok(PayloadSize::Empty),

            (Some(te_value), None) => {
                if is_chunked(te_value) {
                    Ok(PayloadSize::Chunked)
                } else {
                    Ok(PayloadSize::Empty)
                }
            }

            (None, Some(cl_value)) => {
                let cl_str = cl_value.to_str().map_err(|_| ParseError::invalid_content_length("value can't to_str"))?;
                let length = cl_str
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ParseError::invalid_content_length(format!("value {cl_str} is not u64")))?;
                Ok(PayloadSize::Length(length))
            }

            (Some(_), Some(_)) => Err(ParseError::invalid_content_length(
                "transfer_encoding and content_length both present in headers",
            )),
        }
    }

    /// Returns true if `Transfer-Encoding` ends with the `chunked` coding.
    pub fn is_chunked(&self) -> bool {
        self.headers.transfer_encoding().is_some_and(is_chunked)
    }
}

/// Checks if the Transfer-Encoding header indicates chunked encoding.
///
/// According to RFC 7230, chunked must be the last encoding if present.
fn is_chunked(header_value: &Item) -> bool {
    const CHUNKED: &[u8] = b"chunked";
    header_value
        .as_bytes()
        .rsplit(|b| *b == b',')
        .next()
        .is_some_and(|last| last.trim_ascii().eq_ignore_ascii_case(CHUNKED))
}

/// Pretty form for logs: every line is prefixed with the kind's arrow, a blank
/// line separates the headers from a non-empty body.
impl<L: StartLine> fmt::Display for Message<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = L::ARROW;

        write!(f, "{arrow} {}", self.first_line())?;
        for (name, value) in &self.headers {
            write!(f, "\n{arrow} {name}: {value}")?;
        }

        if !self.body.is_empty() {
            f.write_str("\n")?;
            for line in self.body.as_text().lines() {
                if line.is_empty() {
                    write!(f, "\n{arrow}")?;
                } else {
                    write!(f, "\n{arrow} {line}")?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{Request, Response};

    #[test]
    fn check_is_chunked() {
        assert!(is_chunked(&Item::from("chunked")));
        assert!(is_chunked(&Item::from("gzip, chunked")));
        assert!(is_chunked(&Item::from("gzip,Chunked ")));
        assert!(!is_chunked(&Item::from("chunked, gzip")));
        assert!(!is_chunked(&Item::from("gzip")));
        assert!(!is_chunked(&Item::empty()));
    }

    #[test]
    fn payload_size_from_headers() {
        let request = Request::new("POST", "/", "HTTP/1.1");
        assert_eq!(request.payload_size().unwrap(), PayloadSize::Empty);

        let request = request.with_headers([("Content-Length", " 18 ")]);
        assert_eq!(request.payload_size().unwrap(), PayloadSize::Length(18));
        assert!(!request.is_chunked());

        let request = Request::new("POST", "/", "HTTP/1.1").with_headers([("Transfer-Encoding", "gzip, chunked")]);
        assert_eq!(request.payload_size().unwrap(), PayloadSize::Chunked);
        assert!(request.is_chunked());

        let request = Request::new("POST", "/", "HTTP/1.1").with_headers([("Transfer-Encoding", "gzip")]);
        assert!(request.payload_size().unwrap().is_empty());
    }

    #[test]
    fn payload_size_rejects_bad_framing() {
        let request = Request::new("POST", "/", "HTTP/1.1").with_headers([("Content-Length", "abc")]);
        assert!(matches!(request.payload_size(), Err(ParseError::InvalidContentLength { .. })));

        let request = Request::new("POST", "/", "HTTP/1.1")
            .with_headers([("Content-Length", "1"), ("Transfer-Encoding", "chunked")]);
        assert!(matches!(request.payload_size(), Err(ParseError::InvalidContentLength { .. })));
    }

    #[test]
    fn three_renderers() {
        let request = Request::new("GET", "/", "HTTP/1.1").with_headers([("Host", "x")]).with_body("hi");

        assert_eq!(&request.raw()[..], b"GET / HTTP/1.1\r\nHost: x\r\n\r\nhi");
        assert_eq!(request.string().unwrap(), "GET / HTTP/1.1\r\nHost: x\r\n\r\nhi");
        assert_eq!(request.to_string(), "→ GET / HTTP/1.1\n→ Host: x\n\n→ hi");
    }

    #[test]
    fn string_fails_on_binary_body() {
        let request = Request::new("POST", "/", "HTTP/1.1").with_body(&b"\xff\x00"[..]);
        assert!(matches!(request.string(), Err(ItemError::Encoding { .. })));
        // the wire form is still available
        assert!(request.raw().ends_with(b"\r\n\r\n\xff\x00"));
    }

    #[test]
    fn pretty_response_without_body() {
        let response = Response::new("HTTP/1.1", 204);
        assert_eq!(response.to_string(), "← HTTP/1.1 204 No Content");
    }

    #[test]
    fn pretty_multiline_body() {
        let response = Response::new("HTTP/1.1", 200).with_body("a\n\nb");
        assert_eq!(response.to_string(), "← HTTP/1.1 200 OK\n\n← a\n←\n← b");
    }

    #[test]
    fn shared_field_mutation() {
        let mut request = Request::new("GET", "/", "HTTP/1.0");
        request.set_protocol("HTTP/1.1");
        request.set_body(42);
        request.headers_mut().set("Host", "example.com");

        assert_eq!(request.protocol(), "HTTP/1.1");
        assert_eq!(request.body(), 42);
        assert_eq!(request.first_line(), "GET / HTTP/1.1");
        assert_eq!(request.headers().host().unwrap(), "example.com");

        request.set_headers(Headers::new());
        assert!(request.headers().is_empty());
    }
}
