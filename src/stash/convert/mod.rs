//! Translation between raw Stash documents and the normalized model.
//!
//! Every function here is pure: it consumes a decoded document and returns
//! normalized values, or builds an outbound document from caller input.
//! Nothing is cached between calls.

use chrono::{DateTime, Utc};

use crate::stash::api::{ApiLinks, ApiUser};
use crate::stash::avatar::avatar_link;
use crate::stash::models::User;

mod comments;
mod commits;
mod pull_request;

pub use comments::{
    classify_comment, extract_comments, flatten_comments, normalize_activity_comments,
    normalize_comment,
};
pub use commits::{normalize_changes, normalize_commits};
pub use pull_request::{
    MERGED_STATE, denormalize_comment, denormalize_pull_request, normalize_pull_request,
    normalize_pull_requests,
};

#[cfg(test)]
mod tests;

const MILLIS_PER_SECOND: i64 = 1_000;

/// Converts Stash epoch milliseconds to a second-resolution timestamp.
///
/// Sub-second precision is truncated toward zero. Values outside the range
/// `chrono` can represent collapse to the Unix epoch.
#[must_use]
pub fn timestamp_from_millis(millis: i64) -> DateTime<Utc> {
    #[expect(
        clippy::integer_division,
        reason = "timestamps are truncated to whole seconds"
    )]
    let seconds = millis / MILLIS_PER_SECOND;
    DateTime::from_timestamp(seconds, 0).unwrap_or_default()
}

/// Returns the first `self` link, or an empty string.
pub(crate) fn self_link(links: &ApiLinks) -> String {
    links
        .self_links
        .first()
        .map(|link| link.href.clone())
        .unwrap_or_default()
}

impl From<ApiUser> for User {
    fn from(value: ApiUser) -> Self {
        let avatar = avatar_link(&value.email_address);
        Self {
            login: value.slug,
            name: value.display_name,
            email: value.email_address,
            avatar,
        }
    }
}
