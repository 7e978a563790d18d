//! Stash (Bitbucket Server) pull request driver.
//!
//! Raw REST documents live in [`api`], the host-agnostic model in
//! [`models`], and the pure translation between them in [`convert`].
//! [`PullRequestService`] ties these to a [`Transport`].

pub mod api;
pub mod avatar;
pub mod convert;
pub mod error;
pub mod models;
pub mod pagination;
pub mod refs;
pub mod repository;
pub mod service;
pub mod transport;

pub use error::StashError;
pub use models::{
    Change, CodeCommentMetadata, Comment, CommentInput, CommentKind, CommentMetadata, Commit,
    PullRequest, PullRequestInput, PullRequestListOptions, PullRequestStateFilter, Reference,
    ReplyCommentMetadata, Signature, User,
};
pub use pagination::{ListOptions, PageHints};
pub use service::PullRequestService;
pub use transport::{
    HttpTransport, HttpTransportConfig, Response, Transport, TransportRequest, TransportResponse,
};
