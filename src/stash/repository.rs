//! Splitting and joining of `namespace/name` repository identifiers.
//!
//! Stash addresses a repository by its project key and repository slug. The
//! normalized model carries both as a single `namespace/name` string, so the
//! service layer splits on the way in and joins on the way out.

/// Splits a combined repository identifier into `(namespace, name)`.
///
/// The split happens at the first `/`. An identifier without a slash is
/// treated as a bare name with an empty namespace.
///
/// # Example
///
/// ```
/// use stash_pulls::stash::repository::split_repository;
///
/// assert_eq!(split_repository("PRJ/my-repo"), ("PRJ", "my-repo"));
/// assert_eq!(split_repository("my-repo"), ("", "my-repo"));
/// ```
#[must_use]
pub fn split_repository(repo: &str) -> (&str, &str) {
    repo.split_once('/').unwrap_or(("", repo))
}

/// Joins a namespace and name into a combined repository identifier.
#[must_use]
pub fn join_repository(namespace: &str, name: &str) -> String {
    format!("{namespace}/{name}")
}
