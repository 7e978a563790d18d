//! Application configuration loaded from CLI, environment, and files.
//!
//! Values are merged with ortho-config's layered approach, lowest to highest
//! precedence:
//!
//! 1. **Defaults** – built-in values
//! 2. **Configuration file** – `.stash-pulls.toml` in the current, home or
//!    XDG config directory
//! 3. **Environment variables** – `STASH_*`, plus `BITBUCKET_TOKEN` as a
//!    token fallback
//! 4. **Command-line arguments** – `--server-url`, `--repo`, `--token`, ...
//!
//! # Configuration File
//!
//! ```toml
//! server_url = "https://stash.example.com"
//! token = "NjA0..."
//! repo = "PRJ/repo"
//! pr_number = 42
//! command = "comments"
//! page_size = 50
//! ```

use std::env;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::stash::error::StashError;
use crate::stash::models::{PullRequestListOptions, PullRequestStateFilter};
use crate::stash::pagination::ListOptions;

/// Environment variable consulted when no token is configured.
pub const TOKEN_FALLBACK_VAR: &str = "BITBUCKET_TOKEN";

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_PAGE_SIZE: u32 = 25;
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// What the CLI should do once configuration is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Show a single pull request.
    Show,
    /// List the comments of a pull request.
    Comments,
    /// List the commits of a pull request.
    Commits,
    /// List the changed files of a pull request.
    Changes,
    /// List the pull requests of a repository.
    List,
}

impl Operation {
    /// Parses a command name.
    ///
    /// # Errors
    ///
    /// Returns [`StashError::Configuration`] for unknown names.
    pub fn parse(name: &str) -> Result<Self, StashError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "show" => Ok(Self::Show),
            "comments" => Ok(Self::Comments),
            "commits" => Ok(Self::Commits),
            "changes" => Ok(Self::Changes),
            "list" => Ok(Self::List),
            other => Err(StashError::Configuration {
                message: format!(
                    "unknown command '{other}' (expected show, comments, commits, changes or list)"
                ),
            }),
        }
    }
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use stash_pulls::StashConfig;
///
/// let config = StashConfig::load().expect("failed to load configuration");
/// let repo = config.require_repo().expect("repository required");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "STASH",
    discovery(
        dotfile_name = ".stash-pulls.toml",
        config_file_name = "stash-pulls.toml",
        app_name = "stash-pulls"
    )
)]
pub struct StashConfig {
    /// Base URL of the Stash server.
    ///
    /// Can be provided via:
    /// - CLI: `--server-url <URL>` or `-s <URL>`
    /// - Environment: `STASH_SERVER_URL`
    /// - Config file: `server_url = "..."`
    #[ortho_config(cli_short = 's')]
    pub server_url: Option<String>,

    /// Personal access token sent as a bearer token.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `STASH_TOKEN` or `BITBUCKET_TOKEN` (fallback)
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Repository as `namespace/slug`, e.g. `PRJ/repo` or `~jane/scratch`.
    #[ortho_config(cli_short = 'r')]
    pub repo: Option<String>,

    /// Pull request number for single pull request commands.
    #[ortho_config(cli_short = 'n')]
    pub pr_number: Option<u64>,

    /// Command to run: `show`, `comments`, `commits`, `changes` or `list`.
    ///
    /// Defaults to `show` when a pull request number is set and `list`
    /// otherwise.
    #[ortho_config()]
    pub command: Option<String>,

    /// State filter for `list`: `open`, `closed` or `all`.
    #[ortho_config()]
    pub state: Option<String>,

    /// Requested page, 1-based.
    #[ortho_config()]
    pub page: u32,

    /// Items per page.
    #[ortho_config()]
    pub page_size: u32,

    /// HTTP timeout per request, in seconds.
    #[ortho_config()]
    pub timeout_seconds: u64,
}

impl Default for StashConfig {
    fn default() -> Self {
        Self {
            server_url: None,
            token: None,
            repo: None,
            pr_number: None,
            command: None,
            state: None,
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl StashConfig {
    /// Returns the server URL or an error if missing.
    ///
    /// # Errors
    ///
    /// Returns [`StashError::Configuration`] when no URL is configured.
    pub fn require_server_url(&self) -> Result<&str, StashError> {
        self.server_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| StashError::Configuration {
                message: "Stash server URL is required (use --server-url or -s)".to_owned(),
            })
    }

    /// Resolves the token from configuration or `BITBUCKET_TOKEN`.
    ///
    /// Anonymous access is allowed, so a missing token is `None` rather than
    /// an error.
    #[must_use]
    pub fn resolve_token(&self) -> Option<String> {
        self.token
            .clone()
            .or_else(|| env::var(TOKEN_FALLBACK_VAR).ok())
            .filter(|token| !token.is_empty())
    }

    /// Returns the `namespace/slug` repository or an error if missing.
    ///
    /// # Errors
    ///
    /// Returns [`StashError::Configuration`] when no repository is configured
    /// or it lacks a namespace.
    pub fn require_repo(&self) -> Result<&str, StashError> {
        match self.repo.as_deref() {
            Some(repo) if repo.contains('/') => Ok(repo),
            Some(repo) => Err(StashError::Configuration {
                message: format!("repository '{repo}' must be given as namespace/slug"),
            }),
            None => Err(StashError::Configuration {
                message: "repository is required (use --repo or -r)".to_owned(),
            }),
        }
    }

    /// Returns the pull request number or an error if missing.
    ///
    /// # Errors
    ///
    /// Returns [`StashError::Configuration`] when no number is configured.
    pub fn require_pr_number(&self) -> Result<u64, StashError> {
        self.pr_number.ok_or_else(|| StashError::Configuration {
            message: "pull request number is required (use --pr-number or -n)".to_owned(),
        })
    }

    /// Page selection for list commands.
    #[must_use]
    pub const fn list_options(&self) -> ListOptions {
        ListOptions::new(self.page, self.page_size)
    }

    /// Page selection and state filter for `list`.
    ///
    /// # Errors
    ///
    /// Returns [`StashError::Configuration`] for an unknown state.
    pub fn pull_request_list_options(&self) -> Result<PullRequestListOptions, StashError> {
        let state = match self.state.as_deref().map(str::to_ascii_lowercase).as_deref() {
            None | Some("open") => PullRequestStateFilter::Open,
            Some("closed" | "declined") => PullRequestStateFilter::Closed,
            Some("all") => PullRequestStateFilter::All,
            Some(other) => {
                return Err(StashError::Configuration {
                    message: format!("unknown state '{other}' (expected open, closed or all)"),
                });
            }
        };
        Ok(PullRequestListOptions {
            page: self.page,
            size: self.page_size,
            state,
        })
    }

    /// Determines the operation to run.
    ///
    /// An explicit `command` wins. Otherwise a configured pull request number
    /// selects `show` and its absence selects `list`.
    ///
    /// # Errors
    ///
    /// Returns [`StashError::Configuration`] for an unknown command.
    pub fn operation(&self) -> Result<Operation, StashError> {
        match self.command.as_deref() {
            Some(name) => Operation::parse(name),
            None if self.pr_number.is_some() => Ok(Operation::Show),
            None => Ok(Operation::List),
        }
    }

    /// Request timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[cfg(test)]
mod tests;
