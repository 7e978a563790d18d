//! Command handlers for the `stash-pulls` binary.
//!
//! Each handler resolves what it needs from [`StashConfig`], performs one
//! service call and writes a summary. Output formatting lives in [`output`].

use std::io::Write;

use stash_pulls::config::Operation;
use stash_pulls::{PullRequestService, StashConfig, StashError, Transport};

pub mod output;

#[cfg(test)]
mod test_utils;
#[cfg(test)]
mod tests;

use output::{
    write_changes, write_comments, write_commits, write_pull_request, write_pull_request_list,
};

/// Runs the configured operation and writes its summary to `writer`.
///
/// # Errors
///
/// Returns [`StashError::Configuration`] when a required value is missing
/// and propagates service and output failures.
pub async fn run<T, W>(
    config: &StashConfig,
    service: &PullRequestService<T>,
    writer: &mut W,
) -> Result<(), StashError>
where
    T: Transport,
    W: Write,
{
    let repo = config.require_repo()?;
    match config.operation()? {
        Operation::List => {
            let options = config.pull_request_list_options()?;
            let (pull_requests, response) = service.list(repo, &options).await?;
            write_pull_request_list(writer, repo, &pull_requests, &response)
        }
        Operation::Show => {
            let number = config.require_pr_number()?;
            let (pull_request, _) = service.find(repo, number).await?;
            write_pull_request(writer, &pull_request)
        }
        Operation::Comments => {
            let number = config.require_pr_number()?;
            let (comments, response) = service
                .list_comments(repo, number, &config.list_options())
                .await?;
            write_comments(writer, number, &comments, &response)
        }
        Operation::Commits => {
            let number = config.require_pr_number()?;
            let (commits, response) = service
                .list_commits(repo, number, &config.list_options())
                .await?;
            write_commits(writer, number, &commits, &response)
        }
        Operation::Changes => {
            let number = config.require_pr_number()?;
            let (changes, response) = service
                .list_changes(repo, number, &config.list_options())
                .await?;
            write_changes(writer, number, &changes, &response)
        }
    }
}
