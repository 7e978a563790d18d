//! Git reference helpers.

/// Prefix used for branch references.
pub const BRANCH_PREFIX: &str = "refs/heads";

/// Prefix used for tag references.
pub const TAG_PREFIX: &str = "refs/tags";

/// Expands a short reference name to a fully qualified path under `prefix`.
///
/// Names that already start with `refs/` are returned unchanged.
///
/// # Example
///
/// ```
/// use stash_pulls::stash::refs::{BRANCH_PREFIX, expand_ref};
///
/// assert_eq!(expand_ref("main", BRANCH_PREFIX), "refs/heads/main");
/// assert_eq!(expand_ref("refs/heads/main", BRANCH_PREFIX), "refs/heads/main");
/// ```
#[must_use]
pub fn expand_ref(name: &str, prefix: &str) -> String {
    if name.starts_with("refs/") {
        return name.to_owned();
    }
    format!("{}/{name}", prefix.trim_end_matches('/'))
}

/// Strips a branch or tag prefix from a fully qualified reference.
#[must_use]
pub fn trim_ref(name: &str) -> &str {
    [BRANCH_PREFIX, TAG_PREFIX]
        .iter()
        .find_map(|prefix| {
            name.strip_prefix(prefix)
                .and_then(|rest| rest.strip_prefix('/'))
        })
        .unwrap_or(name)
}

/// Returns the synthetic reference Stash exposes for a pull request source.
#[must_use]
pub fn pull_request_ref(number: u64) -> String {
    format!("refs/pull-requests/{number}/from")
}
