//! Pull request operations against a Stash server.
//!
//! Each operation performs a single transport round trip, decodes the raw
//! document and hands it to the translator. Pagination is exposed through
//! [`Response::page`]; callers request further pages themselves.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::stash::api::{ApiComment, ApiPage, ApiPullRequest};
use crate::stash::convert::{
    denormalize_comment, denormalize_pull_request, normalize_activity_comments,
    normalize_changes, normalize_comment, normalize_commits, normalize_pull_request,
    normalize_pull_requests,
};
use crate::stash::error::StashError;
use crate::stash::models::{
    Change, Comment, CommentInput, Commit, PullRequest, PullRequestInput, PullRequestListOptions,
};
use crate::stash::pagination::{ListOptions, PageHints, with_query};
use crate::stash::repository::split_repository;
use crate::stash::transport::{Response, Transport, TransportRequest};


const PROJECTS_ROOT: &str = "rest/api/1.0/projects";

/// Returns the pull request collection path of a `namespace/slug` repository.
fn pull_requests_path(repo: &str) -> String {
    let (namespace, slug) = split_repository(repo);
    format!("{PROJECTS_ROOT}/{namespace}/repos/{slug}/pull-requests")
}

fn pull_request_path(repo: &str, number: u64) -> String {
    format!("{}/{number}", pull_requests_path(repo))
}

fn paged(path: String, options: &ListOptions) -> String {
    with_query(path, &options.query_pairs())
}

fn encode<D>(document: &D) -> Result<Value, StashError>
where
    D: Serialize,
{
    serde_json::to_value(document).map_err(|error| StashError::Encode {
        message: error.to_string(),
    })
}

/// Pull request service bound to one transport.
///
/// Repositories are addressed as `namespace/slug`, where the namespace is a
/// project key or a `~user` personal project.
#[derive(Debug)]
pub struct PullRequestService<T>
where
    T: Transport,
{
    transport: T,
}

impl<T> PullRequestService<T>
where
    T: Transport,
{
    /// Creates a service that sends requests through `transport`.
    #[must_use]
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Fetches a single pull request.
    ///
    /// # Errors
    ///
    /// Propagates transport failures and returns [`StashError::Decode`] when
    /// the body is not a pull request document.
    #[instrument(level = "debug", skip(self))]
    pub async fn find(
        &self,
        repo: &str,
        number: u64,
    ) -> Result<(PullRequest, Response), StashError> {
        let request = TransportRequest::get(pull_request_path(repo, number));
        let (document, response) = self.fetch::<ApiPullRequest>(request).await?;
        Ok((normalize_pull_request(document), response))
    }

    /// Fetches a single comment.
    ///
    /// The comment endpoint carries no anchor, so the result is always a
    /// general comment.
    ///
    /// # Errors
    ///
    /// Propagates transport and decode failures.
    #[instrument(level = "debug", skip(self))]
    pub async fn find_comment(
        &self,
        repo: &str,
        number: u64,
        id: u64,
    ) -> Result<(Comment, Response), StashError> {
        let path = format!("{}/comments/{id}", pull_request_path(repo, number));
        let (document, response) = self.fetch::<ApiComment>(TransportRequest::get(path)).await?;
        Ok((normalize_comment(document, 0, None), response))
    }

    /// Lists pull requests matching a state filter.
    ///
    /// # Errors
    ///
    /// Propagates transport and decode failures.
    #[instrument(level = "debug", skip(self))]
    pub async fn list(
        &self,
        repo: &str,
        options: &PullRequestListOptions,
    ) -> Result<(Vec<PullRequest>, Response), StashError> {
        let page_options = ListOptions::new(options.page, options.size);
        let mut pairs = vec![("state", options.state.as_str().to_owned())];
        pairs.extend(page_options.query_pairs());
        let path = with_query(pull_requests_path(repo), &pairs);

        let (page, response) = self.fetch_page(path, &page_options).await?;
        Ok((normalize_pull_requests(page), response))
    }

    /// Lists the comments of a pull request, read from its activity feed.
    ///
    /// Top-level comments are followed by their direct replies. Activity
    /// entries that are not comments are skipped.
    ///
    /// # Errors
    ///
    /// Propagates transport and decode failures. Malformed feed entries are
    /// not errors.
    #[instrument(level = "debug", skip(self))]
    pub async fn list_comments(
        &self,
        repo: &str,
        number: u64,
        options: &ListOptions,
    ) -> Result<(Vec<Comment>, Response), StashError> {
        let path = paged(format!("{}/activities", pull_request_path(repo, number)), options);
        let (page, response) = self.fetch_page(path, options).await?;
        Ok((normalize_activity_comments(page), response))
    }

    /// Lists the commits of a pull request.
    ///
    /// # Errors
    ///
    /// Propagates transport and decode failures.
    #[instrument(level = "debug", skip(self))]
    pub async fn list_commits(
        &self,
        repo: &str,
        number: u64,
        options: &ListOptions,
    ) -> Result<(Vec<Commit>, Response), StashError> {
        let path = paged(format!("{}/commits", pull_request_path(repo, number)), options);
        let (page, response) = self.fetch_page(path, options).await?;
        Ok((normalize_commits(page), response))
    }

    /// Lists the files changed by a pull request.
    ///
    /// # Errors
    ///
    /// Propagates transport and decode failures.
    #[instrument(level = "debug", skip(self))]
    pub async fn list_changes(
        &self,
        repo: &str,
        number: u64,
        options: &ListOptions,
    ) -> Result<(Vec<Change>, Response), StashError> {
        let path = paged(format!("{}/changes", pull_request_path(repo, number)), options);
        let (page, response) = self.fetch_page(path, options).await?;
        Ok((normalize_changes(page), response))
    }

    /// Merges a pull request.
    ///
    /// # Errors
    ///
    /// Propagates transport failures.
    #[instrument(level = "debug", skip(self))]
    pub async fn merge(&self, repo: &str, number: u64) -> Result<Response, StashError> {
        let path = format!("{}/merge", pull_request_path(repo, number));
        self.post_only(path).await
    }

    /// Declines a pull request.
    ///
    /// # Errors
    ///
    /// Propagates transport failures.
    #[instrument(level = "debug", skip(self))]
    pub async fn close(&self, repo: &str, number: u64) -> Result<Response, StashError> {
        let path = format!("{}/decline", pull_request_path(repo, number));
        self.post_only(path).await
    }

    /// Opens a pull request between two branches of `repo`.
    ///
    /// # Errors
    ///
    /// Returns [`StashError::Encode`] when the create document cannot be
    /// serialized and propagates transport and decode failures.
    #[instrument(level = "debug", skip(self))]
    pub async fn create(
        &self,
        repo: &str,
        input: &PullRequestInput,
    ) -> Result<(PullRequest, Response), StashError> {
        let (namespace, slug) = split_repository(repo);
        let body = encode(&denormalize_pull_request(input, namespace, slug))?;
        let request = TransportRequest::post(pull_requests_path(repo), Some(body));
        let (document, response) = self.fetch::<ApiPullRequest>(request).await?;
        Ok((normalize_pull_request(document), response))
    }

    /// Adds a general comment to a pull request.
    ///
    /// # Errors
    ///
    /// Returns [`StashError::Encode`] when the comment document cannot be
    /// serialized and propagates transport and decode failures.
    #[instrument(level = "debug", skip(self))]
    pub async fn create_comment(
        &self,
        repo: &str,
        number: u64,
        input: &CommentInput,
    ) -> Result<(Comment, Response), StashError> {
        let path = format!("{}/comments", pull_request_path(repo, number));
        let body = encode(&denormalize_comment(input))?;
        let (document, response) = self
            .fetch::<ApiComment>(TransportRequest::post(path, Some(body)))
            .await?;
        Ok((normalize_comment(document, 0, None), response))
    }

    /// Deleting comments is not supported.
    ///
    /// Stash requires the comment version for deletion and this layer does
    /// not track versions. No request is sent.
    ///
    /// # Errors
    ///
    /// Always returns [`StashError::Unsupported`].
    #[expect(
        clippy::unused_self,
        reason = "kept as a method so every operation is reached through the service"
    )]
    pub fn delete_comment(&self, repo: &str, number: u64, id: u64) -> Result<Response, StashError> {
        debug!(repo, number, id, "comment deletion is not supported");
        Err(StashError::Unsupported {
            operation: "delete comment",
        })
    }

    async fn fetch<D>(&self, request: TransportRequest) -> Result<(D, Response), StashError>
    where
        D: DeserializeOwned,
    {
        let reply = self.transport.send(request).await?;
        let response = Response::new(reply.status);
        let document = reply.decode::<D>()?;
        Ok((document, response))
    }

    async fn fetch_page<V>(
        &self,
        path: String,
        options: &ListOptions,
    ) -> Result<(ApiPage<V>, Response), StashError>
    where
        V: DeserializeOwned,
    {
        let (page, response) = self
            .fetch::<ApiPage<V>>(TransportRequest::get(path))
            .await?;
        let hints = PageHints::for_page(options.effective_page(), page.pagination.is_last_page);
        Ok((page, response.with_page(hints)))
    }

    async fn post_only(&self, path: String) -> Result<Response, StashError> {
        let reply = self.transport.send(TransportRequest::post(path, None)).await?;
        Ok(Response::new(reply.status))
    }
}
