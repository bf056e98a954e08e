//! Immutable lookup tables.
//!
//! - [`STATUS_MESSAGES`]: status code <-> canonical reason phrase
//! - [`METHODS`]: the standard request methods
//!
//! Both tables are built once on first access and never mutated.

mod frozen_set;
mod two_way;

pub use frozen_set::FrozenSet;
pub use two_way::TwoWayFrozenDict;

use http::{Method, StatusCode};
use once_cell::sync::Lazy;

use crate::protocol::Item;

/// Every status code with a canonical reason phrase, mapped both ways.
///
/// ```
/// use httpsuite::lookup::STATUS_MESSAGES;
///
/// assert_eq!(STATUS_MESSAGES.get(404).unwrap(), "Not Found");
/// assert_eq!(STATUS_MESSAGES.get("Not Found").unwrap(), 404);
/// ```
pub static STATUS_MESSAGES: Lazy<TwoWayFrozenDict> = Lazy::new(|| {
    (100..=999_u16)
        .filter_map(|code| {
            let reason = StatusCode::from_u16(code).ok()?.canonical_reason()?;
            Some((Item::from(code), Item::from_static(reason)))
        })
        .collect()
});

/// The standard request method tokens.
pub static METHODS: Lazy<FrozenSet> = Lazy::new(|| {
    [
        Method::GET,
        Method::HEAD,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::CONNECT,
        Method::OPTIONS,
        Method::TRACE,
        Method::PATCH,
    ]
    .into_iter()
    .collect()
});

/// Returns the canonical reason phrase for `status`, or an empty item when
/// the code isn't registered.
pub fn reason_phrase(status: &Item) -> Item {
    STATUS_MESSAGES.forward(status).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_messages() {
        assert_eq!(STATUS_MESSAGES.get(200).unwrap(), "OK");
        assert_eq!(STATUS_MESSAGES.get("418").unwrap(), "I'm a teapot");
        assert_eq!(STATUS_MESSAGES.get("Internal Server Error").unwrap(), 500);
        assert!(STATUS_MESSAGES.get(999).is_none());
    }

    #[test]
    fn reason_phrase_miss_is_empty() {
        assert_eq!(reason_phrase(&Item::from(404)), "Not Found");
        assert!(reason_phrase(&Item::from(999)).is_empty());
        // a phrase is not a status
        assert!(reason_phrase(&Item::from("OK")).is_empty());
    }

    #[test]
    fn standard_methods() {
        assert_eq!(METHODS.len(), 9);
        assert!(METHODS.contains("PATCH"));
        assert!(!METHODS.contains("PURGE"));
    }
}
