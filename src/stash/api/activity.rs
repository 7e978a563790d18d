//! Tagged decoding of the pull request activity feed.
//!
//! The activity endpoint mixes comment, merge, review and reviewer-change
//! entries in one list, discriminated by `action`. Only `COMMENTED` entries
//! are unpacked; everything else collapses into [`ActivityEntry::Other`].
//! Decoding is per entry, so a single odd entry never fails the page.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use super::ApiCommentActivity;

/// `action` value of comment entries.
pub const COMMENTED_ACTION: &str = "COMMENTED";

/// One entry of the activity feed.
#[derive(Debug, Clone, PartialEq)]
pub enum ActivityEntry {
    /// A comment was added, edited or replied to.
    Commented(Box<ApiCommentActivity>),
    /// Any other activity, including `COMMENTED` entries that do not match
    /// the comment shape.
    Other {
        /// The entry's `action`, when it had a string one.
        action: Option<String>,
    },
}

impl ActivityEntry {
    /// Classifies a raw feed entry.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        let action = value
            .get("action")
            .and_then(Value::as_str)
            .map(ToOwned::to_owned);

        if action.as_deref() != Some(COMMENTED_ACTION) {
            return Self::Other { action };
        }

        if !value.get("comment").is_some_and(Value::is_object) {
            debug!("skipping comment activity without a comment object");
            return Self::Other { action };
        }

        match serde_json::from_value::<ApiCommentActivity>(value) {
            Ok(activity) => Self::Commented(Box::new(activity)),
            Err(error) => {
                debug!(%error, "skipping comment activity with unexpected shape");
                Self::Other { action }
            }
        }
    }

    /// Returns the comment activity, if this entry is one.
    #[must_use]
    pub fn into_comment(self) -> Option<ApiCommentActivity> {
        match self {
            Self::Commented(activity) => Some(*activity),
            Self::Other { .. } => None,
        }
    }
}

impl<'de> Deserialize<'de> for ActivityEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}
