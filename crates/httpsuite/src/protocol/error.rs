use std::str::Utf8Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("parse error: {source}")]
    ParseError {
        #[from]
        source: ParseError,
    },

    #[error("item error: {source}")]
    ItemError {
        #[from]
        source: ItemError,
    },

    #[error("{source}")]
    HeaderNotFound {
        #[from]
        source: HeaderNotFound,
    },
}

#[derive(Error, Debug)]
pub enum ItemError {
    #[error("type mismatch: can't build an item from {found}")]
    TypeMismatch { found: &'static str },

    #[error("encoding error: {source}")]
    Encoding {
        #[from]
        source: Utf8Error,
    },

    #[error("not comparable: {left:?} and {right:?} are not both numeric")]
    NotComparable { left: String, right: String },
}

impl ItemError {
    pub fn type_mismatch(found: &'static str) -> Self {
        Self::TypeMismatch { found }
    }

    pub fn not_comparable<L: ToString, R: ToString>(left: L, right: R) -> Self {
        Self::NotComparable { left: left.to_string(), right: right.to_string() }
    }
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("malformed start line: {line:?}")]
    MalformedStartLine { line: String },

    #[error("malformed header line: {line:?}")]
    MalformedHeaderLine { line: String },

    #[error("header number exceed the limit {max_num}")]
    TooManyHeaders { max_num: usize },

    #[error("invalid content-length header: {reason}")]
    InvalidContentLength { reason: String },

    #[error("content-length is {expected} but body has {actual} bytes")]
    ContentLengthMismatch { expected: u64, actual: u64 },
}

impl ParseError {
    pub fn malformed_start_line(line: &[u8]) -> Self {
        Self::MalformedStartLine { line: String::from_utf8_lossy(line).into_owned() }
    }

    pub fn malformed_header_line(line: &[u8]) -> Self {
        Self::MalformedHeaderLine { line: String::from_utf8_lossy(line).into_owned() }
    }

    pub fn too_many_headers(max_num: usize) -> Self {
        Self::TooManyHeaders { max_num }
    }

    pub fn invalid_content_length<S: ToString>(str: S) -> Self {
        Self::InvalidContentLength { reason: str.to_string() }
    }

    pub fn content_length_mismatch(expected: u64, actual: u64) -> Self {
        Self::ContentLengthMismatch { expected, actual }
    }
}

#[derive(Error, Debug)]
#[error("header not found: {name}")]
pub struct HeaderNotFound {
    pub name: String,
}

impl HeaderNotFound {
    pub fn new<S: ToString>(name: S) -> Self {
        Self { name: name.to_string() }
    }
}
