//! Pull request normalization and create-document construction.

use crate::stash::api::{
    ApiCommentInput, ApiProjectInput, ApiPullRequest, ApiPullRequestInput, ApiPullRequestPage,
    ApiRef, ApiRefInput, ApiRepositoryInput,
};
use crate::stash::models::{CommentInput, PullRequest, PullRequestInput, Reference};
use crate::stash::refs::{BRANCH_PREFIX, expand_ref, pull_request_ref};
use crate::stash::repository::join_repository;

use super::{self_link, timestamp_from_millis};

/// Stash `state` value of merged pull requests.
pub const MERGED_STATE: &str = "MERGED";

impl From<ApiRef> for Reference {
    fn from(value: ApiRef) -> Self {
        Self {
            name: value.display_id,
            path: value.id,
            sha: value.latest_commit,
        }
    }
}

/// Normalizes a pull request document.
///
/// `merged` comes from `state` and `closed` from the explicit flag; the two
/// are never derived from each other. The pull request ref is computed from
/// the number. `fork` always names the source repository, even when it is
/// the target repository.
#[must_use]
pub fn normalize_pull_request(from: ApiPullRequest) -> PullRequest {
    let fork = join_repository(
        &from.from_ref.repository.project.key,
        &from.from_ref.repository.slug,
    );
    let link = self_link(&from.links);
    let merged = from.state == MERGED_STATE;
    let head = Reference::from(from.from_ref);
    let base = Reference::from(from.to_ref);

    PullRequest {
        number: from.id,
        title: from.title,
        body: from.description,
        sha: head.sha.clone(),
        git_ref: pull_request_ref(from.id),
        source: head.name.clone(),
        target: base.name.clone(),
        head,
        base,
        fork,
        merge: from.properties.merge_commit.id,
        link,
        author: from.author.user.into(),
        closed: from.closed,
        merged,
        created: timestamp_from_millis(from.created_date),
        updated: timestamp_from_millis(from.updated_date),
    }
}

/// Normalizes a page of pull requests, preserving server order.
#[must_use]
pub fn normalize_pull_requests(from: ApiPullRequestPage) -> Vec<PullRequest> {
    from.values.into_iter().map(normalize_pull_request).collect()
}

/// Builds the create document for a pull request within one repository.
///
/// Branch names are expanded to `refs/heads/<name>` unless already fully
/// qualified. Both refs point at the repository `namespace/slug`.
#[must_use]
pub fn denormalize_pull_request(
    input: &PullRequestInput,
    namespace: &str,
    slug: &str,
) -> ApiPullRequestInput {
    let ref_input = |branch: &str| ApiRefInput {
        id: expand_ref(branch, BRANCH_PREFIX),
        repository: ApiRepositoryInput {
            slug: slug.to_owned(),
            project: ApiProjectInput {
                key: namespace.to_owned(),
            },
        },
    };

    ApiPullRequestInput {
        title: input.title.clone(),
        description: input.body.clone(),
        from_ref: ref_input(&input.source),
        to_ref: ref_input(&input.target),
    }
}

/// Builds the create document for a comment.
#[must_use]
pub fn denormalize_comment(input: &CommentInput) -> ApiCommentInput {
    ApiCommentInput {
        text: input.body.clone(),
    }
}
