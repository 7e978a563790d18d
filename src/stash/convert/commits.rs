//! Commit and change normalization.

use crate::stash::api::{ApiCommit, ApiCommitPage, ApiDiffstat, ApiDiffstatPage, ApiUser};
use crate::stash::avatar::avatar_link;
use crate::stash::models::{Change, Commit, Signature};

use super::timestamp_from_millis;

fn signature(user: ApiUser, millis: i64) -> Signature {
    let avatar = avatar_link(&user.email_address);
    Signature {
        name: user.display_name,
        email: user.email_address,
        login: user.slug,
        avatar,
        date: timestamp_from_millis(millis),
    }
}

impl From<ApiCommit> for Commit {
    fn from(value: ApiCommit) -> Self {
        Self {
            sha: value.id,
            message: value.message,
            link: String::new(),
            author: signature(value.author, value.author_timestamp),
            committer: signature(value.committer, value.committer_timestamp),
        }
    }
}

impl From<ApiDiffstat> for Change {
    fn from(value: ApiDiffstat) -> Self {
        Self {
            added: value.kind == "ADD",
            renamed: value.kind == "MOVE",
            deleted: value.kind == "DELETE",
            path: value.path.display,
            previous_path: value.src_path.map(|path| path.display).unwrap_or_default(),
        }
    }
}

/// Normalizes a page of commits, preserving server order.
#[must_use]
pub fn normalize_commits(from: ApiCommitPage) -> Vec<Commit> {
    from.values.into_iter().map(Commit::from).collect()
}

/// Normalizes a page of changed files, preserving server order.
#[must_use]
pub fn normalize_changes(from: ApiDiffstatPage) -> Vec<Change> {
    from.values.into_iter().map(Change::from).collect()
}
