//! Host-agnostic pull request, comment, commit and change models.
//!
//! These are the types callers receive. They carry no Stash field names and
//! are produced only by the translator in [`crate::stash::convert`].

use chrono::{DateTime, Utc};

/// A git reference on one side of a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reference {
    /// Short branch name.
    pub name: String,
    /// Fully qualified reference path.
    pub path: String,
    /// Head commit.
    pub sha: String,
}

/// A user as seen by the normalized model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    /// Login (Stash user slug).
    pub login: String,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Avatar image URL derived from the email.
    pub avatar: String,
}

/// A normalized pull request.
///
/// `closed` and `merged` are set from independent source fields and are not
/// kept consistent with each other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequest {
    /// Pull request number.
    pub number: u64,
    /// Title.
    pub title: String,
    /// Description.
    pub body: String,
    /// Head commit of the source branch.
    pub sha: String,
    /// Synthetic pull request reference, `refs/pull-requests/<n>/from`.
    pub git_ref: String,
    /// Source branch short name.
    pub source: String,
    /// Target branch short name.
    pub target: String,
    /// Source side reference.
    pub head: Reference,
    /// Target side reference.
    pub base: Reference,
    /// `namespace/name` of the source repository.
    pub fork: String,
    /// Merge commit, empty when unmerged.
    pub merge: String,
    /// Browser URL, empty when the server sent none.
    pub link: String,
    /// Author.
    pub author: User,
    /// Whether the pull request is closed.
    pub closed: bool,
    /// Whether the pull request is merged.
    pub merged: bool,
    /// Creation time, second resolution.
    pub created: DateTime<Utc>,
    /// Last update time, second resolution.
    pub updated: DateTime<Utc>,
}

/// Comment kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentKind {
    /// A general discussion comment.
    General,
    /// A comment anchored to a line of code.
    Code,
    /// A reply to another comment.
    Reply,
}

impl CommentKind {
    /// Returns the string tag used by the host-agnostic model.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::General => "comment",
            Self::Code => "code-comment",
            Self::Reply => "reply-comment",
        }
    }
}

/// Location metadata of an inline code comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeCommentMetadata {
    /// File path.
    pub path: String,
    /// Line number.
    pub line: u32,
    /// Number of lines covered; Stash only reports single lines.
    pub line_span: u32,
    /// Source-side commit.
    pub source_sha: String,
    /// Merge-base commit.
    pub merge_base_sha: String,
}

/// Linkage metadata of a reply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplyCommentMetadata {
    /// Identifier of the comment being replied to.
    pub parent_id: u64,
}

/// Kind-specific comment metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CommentMetadata {
    /// No extra fields.
    #[default]
    General,
    /// Inline code location.
    Code(CodeCommentMetadata),
    /// Parent linkage.
    Reply(ReplyCommentMetadata),
}

impl CommentMetadata {
    /// Returns the kind this metadata belongs to.
    #[must_use]
    pub const fn kind(&self) -> CommentKind {
        match self {
            Self::General => CommentKind::General,
            Self::Code(_) => CommentKind::Code,
            Self::Reply(_) => CommentKind::Reply,
        }
    }
}

/// A normalized comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comment {
    /// Comment identifier.
    pub id: u64,
    /// Body.
    pub body: String,
    /// Author.
    pub author: User,
    /// Creation time, second resolution.
    pub created: DateTime<Utc>,
    /// Last update time, second resolution.
    pub updated: DateTime<Utc>,
    /// Kind-specific metadata.
    pub metadata: CommentMetadata,
}

impl Comment {
    /// Returns the comment kind implied by its metadata.
    #[must_use]
    pub const fn kind(&self) -> CommentKind {
        self.metadata.kind()
    }

    /// Returns the parent comment identifier for replies.
    #[must_use]
    pub const fn parent_id(&self) -> Option<u64> {
        match &self.metadata {
            CommentMetadata::Reply(reply) => Some(reply.parent_id),
            CommentMetadata::General | CommentMetadata::Code(_) => None,
        }
    }
}

/// Author or committer of a commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Login (Stash user slug).
    pub login: String,
    /// Avatar image URL.
    pub avatar: String,
    /// Signature time, second resolution.
    pub date: DateTime<Utc>,
}

/// A normalized commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Commit {
    /// Full commit hash.
    pub sha: String,
    /// Commit message.
    pub message: String,
    /// Browser URL; Stash commit listings carry none.
    pub link: String,
    /// Author signature.
    pub author: Signature,
    /// Committer signature.
    pub committer: Signature,
}

/// A normalized file change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Change {
    /// Path after the change.
    pub path: String,
    /// Path before a move or copy, empty otherwise.
    pub previous_path: String,
    /// Whether the file was added.
    pub added: bool,
    /// Whether the file was moved.
    pub renamed: bool,
    /// Whether the file was deleted.
    pub deleted: bool,
}

/// Input for creating a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestInput {
    /// Title.
    pub title: String,
    /// Description.
    pub body: String,
    /// Source branch, short or fully qualified.
    pub source: String,
    /// Target branch, short or fully qualified.
    pub target: String,
}

/// Input for creating a comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentInput {
    /// Body.
    pub body: String,
}

/// Pull request state filter for listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PullRequestStateFilter {
    /// Only open pull requests.
    #[default]
    Open,
    /// Only declined pull requests.
    Closed,
    /// Every pull request, merged ones included.
    All,
}

impl PullRequestStateFilter {
    /// Returns the Stash `state` query value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Closed => "DECLINED",
            Self::All => "ALL",
        }
    }
}

/// Options for listing pull requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PullRequestListOptions {
    /// Requested page (1-based).
    pub page: u32,
    /// Items per page, or 0 for the server default.
    pub size: u32,
    /// State filter.
    pub state: PullRequestStateFilter,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{
        CodeCommentMetadata, Comment, CommentKind, CommentMetadata, PullRequestStateFilter,
        ReplyCommentMetadata,
    };

    #[rstest]
    #[case::general(CommentMetadata::General, CommentKind::General, "comment")]
    #[case::code(
        CommentMetadata::Code(CodeCommentMetadata::default()),
        CommentKind::Code,
        "code-comment"
    )]
    #[case::reply(
        CommentMetadata::Reply(ReplyCommentMetadata { parent_id: 3 }),
        CommentKind::Reply,
        "reply-comment"
    )]
    fn metadata_determines_kind(
        #[case] metadata: CommentMetadata,
        #[case] kind: CommentKind,
        #[case] tag: &str,
    ) {
        assert_eq!(metadata.kind(), kind);
        assert_eq!(kind.as_str(), tag);
    }

    #[test]
    fn parent_id_is_only_reported_for_replies() {
        let reply = Comment {
            metadata: CommentMetadata::Reply(ReplyCommentMetadata { parent_id: 9 }),
            ..Comment::default()
        };
        assert_eq!(reply.parent_id(), Some(9));
        assert_eq!(Comment::default().parent_id(), None);
    }

    #[rstest]
    #[case::open(PullRequestStateFilter::Open, "OPEN")]
    #[case::closed(PullRequestStateFilter::Closed, "DECLINED")]
    #[case::all(PullRequestStateFilter::All, "ALL")]
    fn state_filter_maps_to_stash_values(
        #[case] filter: PullRequestStateFilter,
        #[case] expected: &str,
    ) {
        assert_eq!(filter.as_str(), expected);
    }
}
