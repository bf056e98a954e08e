//! HTTP response handling.
//!
//! A response is a [`Message`] whose start line is `PROTOCOL SP STATUS SP STATUS_MSG`.
//! The reason phrase may itself contain spaces.

use bytes::{BufMut, Bytes, BytesMut};
use http::StatusCode;

use crate::lookup::reason_phrase;
use crate::protocol::{Headers, Item, Message, ParseError, StartLine};

/// The status line: status code and reason phrase. The protocol lives on the [`Message`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    status: Item,
    status_msg: Item,
}

impl StartLine for StatusLine {
    const ARROW: char = '←';

    /// Splits on the first two spaces; everything after the second one is the reason phrase.
    fn parse(line: &Bytes) -> Result<(Self, Item), ParseError> {
        let mut tokens = line.splitn(3, |b| *b == b' ');

        let (Some(protocol), Some(status), Some(status_msg)) = (tokens.next(), tokens.next(), tokens.next()) else {
            return Err(ParseError::malformed_start_line(line));
        };

        let status_line =
            StatusLine { status: line.slice_ref(status).into(), status_msg: line.slice_ref(status_msg).into() };
        Ok((status_line, line.slice_ref(protocol).into()))
    }

    fn encode(&self, protocol: &Item, dst: &mut BytesMut) {
        dst.reserve(protocol.len() + self.status.len() + self.status_msg.len() + 2);
        dst.put_slice(protocol.as_bytes());
        dst.put_u8(b' ');
        dst.put_slice(self.status.as_bytes());
        dst.put_u8(b' ');
        dst.put_slice(self.status_msg.as_bytes());
    }
}

/// An HTTP/1.x response.
pub type Response = Message<StatusLine>;

impl Response {
    /// Creates a response whose reason phrase is the canonical one for `status`.
    ///
    /// An unregistered status code leaves the reason phrase empty.
    pub fn new<P, S>(protocol: P, status: S) -> Self
    where
        P: Into<Item>,
        S: Into<Item>,
    {
        let status = status.into();
        let status_msg = reason_phrase(&status);
        Self::with_status_msg(protocol, status, status_msg)
    }

    /// Creates a response with an explicit reason phrase.
    pub fn with_status_msg<P, S, M>(protocol: P, status: S, status_msg: M) -> Self
    where
        P: Into<Item>,
        S: Into<Item>,
        M: Into<Item>,
    {
        let line = StatusLine { status: status.into(), status_msg: status_msg.into() };
        Message::from_parts(line, protocol.into(), Headers::new(), Item::empty())
    }

    /// Numerical value designating the result of the request.
    #[inline]
    pub fn status(&self) -> &Item {
        &self.line().status
    }

    /// Replaces the status; the reason phrase is left as is.
    pub fn set_status<V: Into<Item>>(&mut self, value: V) {
        self.line_mut().status = value.into();
    }

    #[inline]
    pub fn status_msg(&self) -> &Item {
        &self.line().status_msg
    }

    pub fn set_status_msg<V: Into<Item>>(&mut self, value: V) {
        self.line_mut().status_msg = value.into();
    }

    /// Returns the status as a typed code, if it is a valid three-digit one.
    pub fn status_code(&self) -> Option<StatusCode> {
        StatusCode::from_bytes(self.status().as_bytes()).ok()
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    #[test]
    fn default_reason_phrase() {
        let response = Response::new("HTTP/1.1", 404).with_headers(Headers::new()).with_body("");

        assert_eq!(response.status(), 404);
        assert_eq!(response.status_msg(), "Not Found");
        assert!(response.body().is_empty());
    }

    #[test]
    fn unregistered_status_has_empty_reason() {
        let response = Response::new("HTTP/1.1", 999);
        assert!(response.status_msg().is_empty());

        let response = Response::new("HTTP/1.1", "abc");
        assert!(response.status_msg().is_empty());
        assert!(response.status_code().is_none());
    }

    #[test]
    fn explicit_reason_phrase() {
        let response = Response::with_status_msg("HTTP/1.1", 200, "Fine");
        assert_eq!(response.status_msg(), "Fine");
        assert_eq!(response.status_code(), Some(StatusCode::OK));
        assert_eq!(response.first_line(), "HTTP/1.1 200 Fine");
    }

    #[test]
    fn reason_with_spaces() {
        let str = indoc! {r##"
        HTTP/1.1 500 Internal Server Error
        Content-Length: 0

        "##};

        let response = Response::parse(str).unwrap();
        assert_eq!(response.protocol(), "HTTP/1.1");
        assert_eq!(response.status(), 500);
        assert_eq!(response.status_msg(), "Internal Server Error");
        assert_eq!(response.headers().content_length().unwrap(), 0);
    }

    #[test]
    fn start_line_arity() {
        for line in ["HTTP/1.1 200", "HTTP/1.1", ""] {
            let result = StatusLine::parse(&Bytes::from(line));
            assert!(matches!(result, Err(ParseError::MalformedStartLine { .. })), "{line:?}");
        }

        // an empty reason phrase is still three tokens and kept verbatim
        let (line, protocol) = StatusLine::parse(&Bytes::from("HTTP/1.1 200 ")).unwrap();
        assert_eq!(protocol, "HTTP/1.1");
        assert!(line.status_msg.is_empty());
    }

    #[test]
    fn set_status_keeps_reason() {
        let mut response = Response::new("HTTP/1.1", 200);
        response.set_status(StatusCode::CREATED);
        assert_eq!(response.first_line(), "HTTP/1.1 201 OK");

        response.set_status_msg("Created");
        assert_eq!(response.first_line(), "HTTP/1.1 201 Created");
    }

    #[test]
    fn compile_response() {
        let body = r#"{"hello": "world"}"#;
        let response = Response::new("HTTP/1.1", 200)
            .with_headers([("Connection", "keep-alive"), ("Content-Length", &*body.len().to_string())])
            .with_body(body);

        assert_eq!(
            &response.raw()[..],
            &b"HTTP/1.1 200 OK\r\nConnection: keep-alive\r\nContent-Length: 18\r\n\r\n{\"hello\": \"world\"}"[..]
        );
    }
}
