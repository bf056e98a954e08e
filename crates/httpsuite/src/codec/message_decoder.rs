//! HTTP message decoder implementation for parsing raw HTTP/1.x messages
//!
//! The decoder works in multiple stages:
//!
//! 1. Split the input on the first blank line into head and body
//! 2. Split the head into lines; the first one is the start line
//! 3. Hand the start line to the message kind's [`StartLine`] parser
//! 4. Split every remaining line on the first `": "` into a header
//! 5. Keep whatever follows the blank line verbatim as the body
//!
//! All fields are zero-copy slices of the input buffer. Parsing is
//! all-or-nothing: the first structural violation is returned as an error.
//!
//! The body is never truncated to `Content-Length`; a length mismatch is only
//! an error when [`ParseOptions::strict_content_length`] is enabled.

use bytes::Bytes;
use tracing::{trace, warn};

use crate::ensure;
use crate::protocol::{Headers, Item, Message, ParseError, PayloadSize, StartLine};

/// Options controlling how strict [`MessageDecoder`] is.
///
/// The default accepts every structurally valid message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum number of header lines accepted, unlimited when `None`
    pub max_headers: Option<usize>,
    /// Check that `Content-Length` matches the body length
    pub strict_content_length: bool,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn max_headers(mut self, max_headers: usize) -> Self {
        self.max_headers = Some(max_headers);
        self
    }

    #[must_use]
    pub fn strict_content_length(mut self, strict: bool) -> Self {
        self.strict_content_length = strict;
        self
    }
}

/// Decoder turning raw bytes into a [`Message`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageDecoder {
    options: ParseOptions,
}

impl MessageDecoder {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Decodes a complete message from `src`.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if:
    /// - The start line doesn't have the shape required by `L`
    /// - A header line has no `": "` separator
    /// - A header limit is set and the number of headers exceeds it
    /// - Strict mode is on and the body doesn't match `Content-Length`
    pub fn decode<L: StartLine>(&self, src: Bytes) -> Result<Message<L>, ParseError> {
        let (head, body) = split_head(&src);

        let mut lines = head.split(|b| *b == b'\n').map(strip_cr).collect::<Vec<_>>();
        // a head without a blank line may still end with a line break
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }

        let start_line = lines.first().map_or_else(Bytes::new, |line| src.slice_ref(line));
        let (line, protocol) = L::parse(&start_line)?;
        trace!(start_line = %String::from_utf8_lossy(&start_line), "parsed start line");

        let header_lines = lines.get(1..).unwrap_or_default();
        if let Some(max_headers) = self.options.max_headers {
            ensure!(header_lines.len() <= max_headers, ParseError::too_many_headers(max_headers));
        }

        let mut headers = Headers::with_capacity(header_lines.len());
        for header_line in header_lines {
            let (name, value) = split_header(header_line)?;
            headers.set(src.slice_ref(name), src.slice_ref(value));
        }
        trace!(header_count = headers.len(), "parsed headers");

        let body = Item::from(src.slice_ref(body));
        trace!(body_size = body.len(), "parsed body size");

        let message = Message::from_parts(line, protocol, headers, body);
        if self.options.strict_content_length {
            check_content_length(&message)?;
        }
        Ok(message)
    }
}

/// Splits on the first `\r\n\r\n`, falling back to the first `\n\n`.
///
/// Without any blank line the whole input is the head and the body is empty.
fn split_head(src: &[u8]) -> (&[u8], &[u8]) {
    for boundary in [&b"\r\n\r\n"[..], &b"\n\n"[..]] {
        if let Some(index) = find(src, boundary) {
            return (&src[..index], &src[index + boundary.len()..]);
        }
    }
    (src, &src[src.len()..])
}

/// Splits a header line on the first `": "`.
fn split_header(line: &[u8]) -> Result<(&[u8], &[u8]), ParseError> {
    let index = find(line, b": ").ok_or_else(|| ParseError::malformed_header_line(line))?;
    Ok((&line[..index], &line[index + 2..]))
}

fn strip_cr(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}

fn check_content_length<L: StartLine>(message: &Message<L>) -> Result<(), ParseError> {
    let actual = message.body().len() as u64;
    match message.payload_size() {
        Ok(PayloadSize::Length(expected)) if expected != actual => {
            warn!(expected, actual, "content-length doesn't match body");
            Err(ParseError::content_length_mismatch(expected, actual))
        }
        Ok(_) => Ok(()),
        Err(e) => {
            warn!(cause = %e, "rejected message framing");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;
    use crate::protocol::{Request, Response};

    fn decode_request(src: &'static [u8]) -> Result<Request, ParseError> {
        MessageDecoder::default().decode(Bytes::from_static(src))
    }

    #[test]
    fn check_split_head() {
        assert_eq!(split_head(b"a\r\n\r\nb"), (&b"a"[..], &b"b"[..]));
        assert_eq!(split_head(b"a\n\nb\r\n\r\nc"), (&b"a\n\nb"[..], &b"c"[..]));
        assert_eq!(split_head(b"a\n\nb"), (&b"a"[..], &b"b"[..]));
        assert_eq!(split_head(b"a\r\nb"), (&b"a\r\nb"[..], &b""[..]));
        assert_eq!(split_head(b""), (&b""[..], &b""[..]));
    }

    #[test]
    fn absent_body() {
        let request = decode_request(b"GET / HTTP/1.1\r\nHost: x\r\n\r\n").unwrap();

        assert!(request.body().is_empty());
        assert_eq!(request.headers().len(), 1);
        assert_eq!(request.headers().host().unwrap(), "x");
    }

    #[test]
    fn no_blank_line() {
        let request = decode_request(b"GET / HTTP/1.1\r\nHost: x\r\n").unwrap();
        assert_eq!(request.headers().len(), 1);
        assert!(request.body().is_empty());

        let request = decode_request(b"GET / HTTP/1.1").unwrap();
        assert!(request.headers().is_empty());
        assert_eq!(request.protocol(), "HTTP/1.1");
    }

    #[test]
    fn malformed_start_line() {
        let result = decode_request(b"GET /\r\n\r\n");
        assert!(matches!(result, Err(ParseError::MalformedStartLine { .. })));

        let result = decode_request(b"");
        assert!(matches!(result, Err(ParseError::MalformedStartLine { .. })));
    }

    #[test]
    fn malformed_header_line() {
        let result = decode_request(b"GET / HTTP/1.1\r\nHost:x\r\n\r\n");
        match result {
            Err(ParseError::MalformedHeaderLine { line }) => assert_eq!(line, "Host:x"),
            other => panic!("expected a malformed header line, got {other:?}"),
        }

        let result = decode_request(b"GET / HTTP/1.1\r\nHost\r\n\r\n");
        assert!(matches!(result, Err(ParseError::MalformedHeaderLine { .. })));
    }

    #[test]
    fn header_value_keeps_colons() {
        let request = decode_request(b"GET / HTTP/1.1\r\nHost: 127.0.0.1:8080\r\nX-Empty: \r\n\r\n").unwrap();
        assert_eq!(request.headers().host().unwrap(), "127.0.0.1:8080");
        assert!(request.headers()["x-empty"].is_empty());
    }

    #[test]
    fn body_is_not_truncated() {
        let str = indoc! {r##"
        POST /upload HTTP/1.1
        Content-Length: 3

        123456"##};

        let request = Request::parse(str).unwrap();
        assert_eq!(request.body(), "123456");

        let result = Request::parse_with(str, &ParseOptions::new().strict_content_length(true));
        assert!(matches!(result, Err(ParseError::ContentLengthMismatch { expected: 3, actual: 6 })));
    }

    #[test]
    fn strict_content_length() {
        let options = ParseOptions::new().strict_content_length(true);

        let request =
            Request::parse_with(b"POST / HTTP/1.1\r\nContent-Length: 2\r\n\r\nok", &options).unwrap();
        assert_eq!(request.body(), "ok");

        let result = Request::parse_with(b"POST / HTTP/1.1\r\nContent-Length: two\r\n\r\nok", &options);
        assert!(matches!(result, Err(ParseError::InvalidContentLength { .. })));

        let result = Request::parse_with(
            b"POST / HTTP/1.1\r\nContent-Length: 2\r\nTransfer-Encoding: chunked\r\n\r\nok",
            &options,
        );
        assert!(matches!(result, Err(ParseError::InvalidContentLength { .. })));

        // chunked bodies are only detected
        let response = Response::parse_with(
            b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n2\r\nok\r\n0\r\n\r\n",
            &options,
        )
        .unwrap();
        assert!(response.is_chunked());
        assert_eq!(response.body(), "2\r\nok\r\n0\r\n\r\n");
    }

    #[test]
    fn too_many_headers() {
        let options = ParseOptions::new().max_headers(1);
        let result = Request::parse_with(b"GET / HTTP/1.1\r\nA: 1\r\nB: 2\r\n\r\n", &options);
        assert!(matches!(result, Err(ParseError::TooManyHeaders { max_num: 1 })));

        assert!(Request::parse_with(b"GET / HTTP/1.1\r\nA: 1\r\n\r\n", &options).is_ok());
    }

    #[test]
    fn header_count_unlimited_by_default() {
        let mut raw = String::from("GET / HTTP/1.1\r\n");
        for i in 0..100 {
            raw.push_str(&format!("X-Header-{i}: {i}\r\n"));
        }
        raw.push_str("\r\n");

        let request = Request::parse(&raw).unwrap();
        assert_eq!(request.headers().len(), 100);
        assert_eq!(request.headers()["x_header_99"], 99);
        assert_eq!(&request.raw()[..], raw.as_bytes());

        let result = Request::parse_with(&raw, &ParseOptions::new().max_headers(64));
        assert!(matches!(result, Err(ParseError::TooManyHeaders { max_num: 64 })));
    }

    #[test]
    fn fields_share_the_input_buffer() {
        let src = Bytes::from_static(b"GET /a HTTP/1.1\r\nHost: x\r\n\r\nbody");
        let request: Request = MessageDecoder::default().decode(src.clone()).unwrap();

        let range = src.as_ptr_range();
        assert!(range.contains(&request.body().as_bytes().as_ptr()));
        assert!(range.contains(&request.target().as_bytes().as_ptr()));
    }
}
