//! Output formatting utilities for CLI operations.

use std::io::{self, Write};

use stash_pulls::{Change, Comment, CommentMetadata, Commit, PullRequest, Response, StashError};

fn io_error(error: &io::Error) -> StashError {
    StashError::Io {
        message: error.to_string(),
    }
}

fn state_label(pull_request: &PullRequest) -> &'static str {
    match (pull_request.merged, pull_request.closed) {
        (true, _) => "merged",
        (false, true) => "closed",
        (false, false) => "open",
    }
}

/// Writes the "more pages" footer when the response carries a next hint.
fn write_page_footer<W: Write>(writer: &mut W, response: &Response) -> Result<(), StashError> {
    if response.page.has_next() {
        writeln!(
            writer,
            "More results available (use --page {}).",
            response.page.next
        )
        .map_err(|e| io_error(&e))?;
    }
    Ok(())
}

/// Writes a summary of a single pull request.
pub fn write_pull_request<W: Write>(
    writer: &mut W,
    pull_request: &PullRequest,
) -> Result<(), StashError> {
    let author = if pull_request.author.name.is_empty() {
        "unknown author"
    } else {
        pull_request.author.name.as_str()
    };
    let link = if pull_request.link.is_empty() {
        "no link provided"
    } else {
        pull_request.link.as_str()
    };
    let message = format!(
        "PR #{} [{}] by {author}: {}\n{} -> {} ({})\nURL: {link}",
        pull_request.number,
        state_label(pull_request),
        pull_request.title,
        pull_request.source,
        pull_request.target,
        pull_request.fork,
    );

    writeln!(writer, "{message}").map_err(|e| io_error(&e))
}

/// Writes one line per pull request in a repository listing.
pub fn write_pull_request_list<W: Write>(
    writer: &mut W,
    repo: &str,
    pull_requests: &[PullRequest],
    response: &Response,
) -> Result<(), StashError> {
    writeln!(writer, "Pull requests for {repo}:").map_err(|e| io_error(&e))?;
    for pull_request in pull_requests {
        writeln!(
            writer,
            "  #{} [{}] {} (@{})",
            pull_request.number,
            state_label(pull_request),
            pull_request.title,
            pull_request.author.login
        )
        .map_err(|e| io_error(&e))?;
    }
    writeln!(writer, "{} pull requests shown.", pull_requests.len()).map_err(|e| io_error(&e))?;
    write_page_footer(writer, response)
}

/// Writes the flattened comments of a pull request.
pub fn write_comments<W: Write>(
    writer: &mut W,
    number: u64,
    comments: &[Comment],
    response: &Response,
) -> Result<(), StashError> {
    writeln!(writer, "Comments on PR #{number}:").map_err(|e| io_error(&e))?;
    for comment in comments {
        let location = match &comment.metadata {
            CommentMetadata::General => String::new(),
            CommentMetadata::Code(code) => format!(" {}:{}", code.path, code.line),
            CommentMetadata::Reply(reply) => format!(" -> #{}", reply.parent_id),
        };
        writeln!(
            writer,
            "  #{} [{}{location}] @{}: {}",
            comment.id,
            comment.kind().as_str(),
            comment.author.login,
            comment.body
        )
        .map_err(|e| io_error(&e))?;
    }
    write_page_footer(writer, response)
}

/// Writes the commits of a pull request.
pub fn write_commits<W: Write>(
    writer: &mut W,
    number: u64,
    commits: &[Commit],
    response: &Response,
) -> Result<(), StashError> {
    writeln!(writer, "Commits in PR #{number}:").map_err(|e| io_error(&e))?;
    for commit in commits {
        let subject = commit.message.lines().next().unwrap_or_default();
        writeln!(writer, "  {} {subject} ({})", commit.sha, commit.author.name)
            .map_err(|e| io_error(&e))?;
    }
    write_page_footer(writer, response)
}

/// Writes the changed files of a pull request.
pub fn write_changes<W: Write>(
    writer: &mut W,
    number: u64,
    changes: &[Change],
    response: &Response,
) -> Result<(), StashError> {
    writeln!(writer, "Files changed in PR #{number}:").map_err(|e| io_error(&e))?;
    for change in changes {
        let line = if change.added {
            format!("  A {}", change.path)
        } else if change.deleted {
            format!("  D {}", change.path)
        } else if change.renamed {
            format!("  R {} -> {}", change.previous_path, change.path)
        } else {
            format!("  M {}", change.path)
        };
        writeln!(writer, "{line}").map_err(|e| io_error(&e))?;
    }
    write_page_footer(writer, response)
}
