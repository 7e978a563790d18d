//! Raw documents mirroring the Stash REST schema.
//!
//! Types prefixed with `Api` are deserialisation (or serialisation) targets
//! whose field names match the Stash JSON exactly. They are transient: the
//! translator in [`crate::stash::convert`] turns them into the normalized
//! model and they are dropped. Every field defaults when absent because Stash
//! omits keys freely between versions.
//!
//! Parts of the activity feed that the translator never reads (diffs, tasks,
//! reviewers) stay as untyped [`serde_json::Value`]s.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

mod activity;

pub use activity::{ActivityEntry, COMMENTED_ACTION};


/// Pagination envelope shared by every Stash list response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiPagination {
    /// Offset of the first item on this page.
    pub start: u64,
    /// Number of items on this page.
    pub size: u64,
    /// Page size limit applied by the server.
    pub limit: u64,
    /// Whether this is the final page; `None` when the server omits it.
    pub is_last_page: Option<bool>,
    /// Offset to request for the following page, when there is one.
    pub next_page_start: Option<u64>,
}

/// A page of values with its pagination envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiPage<T> {
    /// Pagination fields at the top level of the document.
    #[serde(flatten)]
    pub pagination: ApiPagination,
    /// Items on this page, in server order.
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,
}

impl<T> Default for ApiPage<T> {
    fn default() -> Self {
        Self {
            pagination: ApiPagination::default(),
            values: Vec::new(),
        }
    }
}

/// Page of pull requests.
pub type ApiPullRequestPage = ApiPage<ApiPullRequest>;

/// Page of the mixed pull request activity feed.
pub type ApiActivityPage = ApiPage<ActivityEntry>;

/// Page of pull request commits.
pub type ApiCommitPage = ApiPage<ApiCommit>;

/// Page of pull request file changes.
pub type ApiDiffstatPage = ApiPage<ApiDiffstat>;

/// A single `href` entry in a Stash link collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiLink {
    /// Link target.
    pub href: String,
    /// Optional link name (used for clone links).
    pub name: Option<String>,
}

/// Link collection keyed by relation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiLinks {
    /// `self` links, usually a single browser URL.
    #[serde(rename = "self")]
    pub self_links: Vec<ApiLink>,
}

/// A Stash user as embedded in pull requests, comments and commits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiUser {
    /// Username.
    pub name: String,
    /// Primary email address.
    pub email_address: String,
    /// Numeric user identifier.
    pub id: u64,
    /// Human-readable display name.
    pub display_name: String,
    /// Whether the account is active.
    pub active: bool,
    /// URL-safe user slug.
    pub slug: String,
    /// Account type (`NORMAL`, `SERVICE`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Profile links.
    pub links: ApiLinks,
}

/// The project owning a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiProject {
    /// Project key, the namespace half of a repository identifier.
    pub key: String,
    /// Numeric project identifier.
    pub id: u64,
    /// Project display name.
    pub name: String,
}

/// A repository as embedded in a pull request ref.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiRepository {
    /// Repository slug, the name half of a repository identifier.
    pub slug: String,
    /// Numeric repository identifier.
    pub id: u64,
    /// Repository display name.
    pub name: String,
    /// Owning project.
    pub project: ApiProject,
}

/// One side (`fromRef` or `toRef`) of a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiRef {
    /// Fully qualified reference, e.g. `refs/heads/main`.
    pub id: String,
    /// Short branch name, e.g. `main`.
    pub display_id: String,
    /// Head commit of the reference.
    pub latest_commit: String,
    /// Repository holding the reference.
    pub repository: ApiRepository,
}

/// A user's participation record on a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiParticipant {
    /// The participating user.
    pub user: ApiUser,
    /// Participation role (`AUTHOR`, `REVIEWER`, `PARTICIPANT`).
    pub role: String,
    /// Whether the participant approved.
    pub approved: bool,
    /// Review status (`APPROVED`, `UNAPPROVED`, `NEEDS_WORK`).
    pub status: String,
}

/// Short commit reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiCommitRef {
    /// Full commit hash.
    pub id: String,
    /// Abbreviated commit hash.
    pub display_id: String,
}

/// Computed pull request properties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiPullRequestProperties {
    /// Merge commit, present once the pull request is merged.
    pub merge_commit: ApiCommitRef,
}

/// A pull request document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiPullRequest {
    /// Pull request number, unique within the repository.
    pub id: u64,
    /// Optimistic-concurrency version.
    pub version: i64,
    /// Title.
    pub title: String,
    /// Markdown description.
    pub description: String,
    /// `OPEN`, `DECLINED` or `MERGED`.
    pub state: String,
    /// Whether the pull request is open.
    pub open: bool,
    /// Whether the pull request is closed.
    pub closed: bool,
    /// Creation time in epoch milliseconds.
    pub created_date: i64,
    /// Last update time in epoch milliseconds.
    pub updated_date: i64,
    /// Source reference.
    pub from_ref: ApiRef,
    /// Target reference.
    pub to_ref: ApiRef,
    /// Whether the pull request is locked.
    pub locked: bool,
    /// Author participation record.
    pub author: ApiParticipant,
    /// Reviewer records, not interpreted.
    pub reviewers: Vec<Value>,
    /// Participant records, not interpreted.
    pub participants: Vec<Value>,
    /// Browser links.
    pub links: ApiLinks,
    /// Computed properties.
    pub properties: ApiPullRequestProperties,
}

/// Code location a comment is attached to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiCommentAnchor {
    /// Source-side commit of the diff the comment was made on.
    pub from_hash: String,
    /// Destination-side (merge base) commit of that diff.
    pub to_hash: String,
    /// Line number within the file.
    pub line: u32,
    /// `ADDED`, `REMOVED` or `CONTEXT`.
    pub line_type: String,
    /// `FROM` or `TO`.
    pub file_type: String,
    /// File path; empty for file-less anchors.
    pub path: String,
    /// `EFFECTIVE`, `RANGE` or `COMMIT`.
    pub diff_type: String,
    /// Whether the anchor no longer resolves against the current diff.
    pub orphaned: bool,
}

/// Comment properties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiCommentProperties {
    /// Repository the comment belongs to.
    pub repository_id: u64,
}

/// Operations the current user may perform on a comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiPermittedOperations {
    /// Whether the comment can be edited.
    pub editable: bool,
    /// Whether the comment can be deleted.
    pub deletable: bool,
}

/// A pull request comment with its nested replies.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiComment {
    /// Comment properties.
    pub properties: ApiCommentProperties,
    /// Comment identifier.
    pub id: u64,
    /// Optimistic-concurrency version, required for deletion.
    pub version: i64,
    /// Markdown body.
    pub text: String,
    /// Comment author.
    pub author: ApiUser,
    /// Creation time in epoch milliseconds.
    pub created_date: i64,
    /// Last update time in epoch milliseconds.
    pub updated_date: i64,
    /// Direct replies. Each reply may carry its own replies.
    pub comments: Vec<ApiComment>,
    /// Tasks attached to the comment, not interpreted.
    pub tasks: Vec<Value>,
    /// Operations permitted for the requesting user.
    pub permitted_operations: ApiPermittedOperations,
}

/// Diff summary embedded in a comment activity, not interpreted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ApiActivityDiff {
    /// Source file descriptor.
    pub source: Value,
    /// Destination file descriptor.
    pub destination: Value,
    /// Diff hunks around the anchor.
    pub hunks: Vec<Value>,
    /// Whether the diff was truncated.
    pub truncated: bool,
    /// Extra diff properties.
    pub properties: Value,
}

/// A `COMMENTED` entry of the activity feed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiCommentActivity {
    /// Activity identifier (distinct from the comment identifier).
    pub id: u64,
    /// Activity time in epoch milliseconds.
    pub created_date: i64,
    /// User who performed the activity.
    pub user: ApiUser,
    /// Always `COMMENTED` for this type.
    pub action: String,
    /// `ADDED`, `EDITED`, `REPLIED` or `DELETED`.
    pub comment_action: String,
    /// Top-level comment with its direct replies.
    pub comment: ApiComment,
    /// Code anchor for inline comments; absent for general comments.
    pub comment_anchor: Option<ApiCommentAnchor>,
    /// Diff context for inline comments.
    pub diff: Option<ApiActivityDiff>,
}

/// A commit in a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiCommit {
    /// Full commit hash.
    pub id: String,
    /// Abbreviated commit hash.
    pub display_id: String,
    /// Commit author.
    pub author: ApiUser,
    /// Author time in epoch milliseconds.
    pub author_timestamp: i64,
    /// Commit committer.
    pub committer: ApiUser,
    /// Commit time in epoch milliseconds.
    pub committer_timestamp: i64,
    /// Full commit message.
    pub message: String,
    /// Parent commits.
    pub parents: Vec<ApiCommitRef>,
}

/// A repository path split into components.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiPath {
    /// Path segments.
    pub components: Vec<String>,
    /// Parent directory.
    pub parent: String,
    /// File name.
    pub name: String,
    /// File extension, without the dot.
    pub extension: String,
    /// Full path joined with `/`.
    #[serde(rename = "toString")]
    pub display: String,
}

/// A changed file in a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiDiffstat {
    /// Content hash after the change.
    pub content_id: String,
    /// Content hash before the change.
    pub from_content_id: String,
    /// Path after the change.
    pub path: ApiPath,
    /// Path before the change, present for moves and copies.
    pub src_path: Option<ApiPath>,
    /// Whether the file is executable after the change.
    pub executable: bool,
    /// Share of unchanged content, or -1 when unknown.
    #[serde(deserialize_with = "nullable_i64")]
    pub percent_unchanged: i64,
    /// `ADD`, `MODIFY`, `DELETE`, `MOVE` or `COPY`.
    #[serde(rename = "type")]
    pub kind: String,
    /// `FILE` or `SUBMODULE`.
    pub node_type: String,
    /// Whether the file was executable before the change.
    pub src_executable: bool,
}

/// Outbound repository reference in a create document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApiProjectInput {
    /// Project key.
    pub key: String,
}

/// Outbound repository in a create document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApiRepositoryInput {
    /// Repository slug.
    pub slug: String,
    /// Owning project.
    pub project: ApiProjectInput,
}

/// Outbound `fromRef` / `toRef` in a create document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApiRefInput {
    /// Fully qualified reference.
    pub id: String,
    /// Repository holding the reference.
    pub repository: ApiRepositoryInput,
}

/// Document sent to create a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPullRequestInput {
    /// Title.
    pub title: String,
    /// Markdown description.
    pub description: String,
    /// Source reference.
    pub from_ref: ApiRefInput,
    /// Target reference.
    pub to_ref: ApiRefInput,
}

/// Document sent to create a comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApiCommentInput {
    /// Markdown body.
    pub text: String,
}

fn nullable_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i64>::deserialize(deserializer).map(Option::unwrap_or_default)
}
