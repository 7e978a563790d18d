//! Stash (Bitbucket Server) pull request driver.
//!
//! The library reads pull requests, their activity-feed comments, commits
//! and changes from Stash's REST API and converts them into a host-agnostic
//! model. Comment threads are flattened one level deep and classified as
//! general, code or reply comments.

pub mod config;
pub mod stash;

pub use config::StashConfig;
pub use stash::{
    Change, CodeCommentMetadata, Comment, CommentInput, CommentKind, CommentMetadata, Commit,
    HttpTransport, HttpTransportConfig, ListOptions, PageHints, PullRequest, PullRequestInput,
    PullRequestListOptions, PullRequestService, PullRequestStateFilter, Reference,
    ReplyCommentMetadata, Response, Signature, StashError, Transport, TransportRequest,
    TransportResponse, User,
};
