//! Continuation cursors for paged results.
//!
//! A page result keeps a copy of the request that produced it. `next()` on
//! the result copies that request again with the start key set to the
//! page's last evaluated key, or returns `None` once there is nothing left.
//! Nothing is fetched ahead of time; the caller drives every page.

use dynawire_model::Document;

/// The key to resume after. An absent or empty key ends the sequence.
pub(crate) fn resume_key(last_evaluated_key: Option<&Document>) -> Option<&Document> {
    last_evaluated_key.filter(|key| !key.is_empty())
}

/// The table name to resume after. An absent or empty name ends the listing.
pub(crate) fn resume_name(last_evaluated_name: Option<&str>) -> Option<&str> {
    last_evaluated_name.filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_stop_on_missing_or_empty_key() {
        assert!(resume_key(None).is_none());
        assert!(resume_key(Some(&Document::new())).is_none());
        let key = Document::hash_key("Id", 7);
        assert_eq!(resume_key(Some(&key)), Some(&key));
    }

    #[test]
    fn test_should_stop_on_missing_or_empty_name() {
        assert!(resume_name(None).is_none());
        assert!(resume_name(Some("")).is_none());
        assert_eq!(resume_name(Some("orders")), Some("orders"));
    }
}
