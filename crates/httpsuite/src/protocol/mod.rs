//! Core HTTP/1.x message abstractions.
//!
//! # Architecture
//!
//! - **Values** (`item`): [`Item`], the type-agnostic value used for every field
//!
//! - **Headers** (`headers`): [`Headers`], ordered and name-normalized
//!
//! - **Message Handling** (`message`): the shared message type
//!   - [`Message`]: protocol, headers and body plus a start line
//!   - [`StartLine`]: the start line shape of a message kind
//!   - [`PayloadSize`]: body framing announced by the headers
//!
//! - **Request Processing** (`request`): [`Request`] and its [`RequestLine`]
//!
//! - **Response Processing** (`response`): [`Response`] and its [`StatusLine`]
//!
//! - **Error Handling** (`error`):
//!   - [`HttpError`]: Top-level error type
//!   - [`ParseError`]: Message parsing errors
//!   - [`ItemError`]: Value conversion and comparison errors
//!   - [`HeaderNotFound`]: Failed header lookup
//!
//! Every field assignment goes through [`Item`]'s conversions, so comparisons
//! and compilation see one canonical value whatever type a caller supplied.

mod item;
pub use item::Item;

mod headers;
pub use headers::normalize_name;
pub use headers::Headers;
pub use headers::IntoIter as HeadersIntoIter;
pub use headers::Iter as HeadersIter;

mod message;
pub use message::Message;
pub use message::PayloadSize;
pub use message::StartLine;

mod request;
pub use request::Request;
pub use request::RequestLine;

mod response;
pub use response::Response;
pub use response::StatusLine;

mod error;
pub use error::HeaderNotFound;
pub use error::HttpError;
pub use error::ItemError;
pub use error::ParseError;
