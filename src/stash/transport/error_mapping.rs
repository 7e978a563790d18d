//! Error mapping helpers for the `reqwest` transport.

use http::StatusCode;
use serde_json::Value;

use crate::stash::error::StashError;

/// Checks if a status indicates an authentication failure.
pub(super) const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

pub(super) fn map_reqwest_error(operation: &str, error: &reqwest::Error) -> StashError {
    if error.is_decode() {
        return StashError::Decode {
            message: format!("{operation} failed: {error}"),
        };
    }
    StashError::Network {
        message: format!("{operation} failed: {error}"),
    }
}

pub(super) fn map_http_error(
    operation: &str,
    status: StatusCode,
    maybe_message: Option<String>,
) -> StashError {
    let message = maybe_message.unwrap_or_else(|| "unknown error".to_owned());
    if is_auth_failure(status) {
        StashError::Authentication {
            message: format!("{operation} failed: Stash returned {status} {message}"),
        }
    } else {
        StashError::Api {
            status: status.as_u16(),
            message: format!("{operation} failed: {message}"),
        }
    }
}

/// Pulls the first error message out of a Stash error body.
///
/// Stash reports failures as `{"errors": [{"message": ...}]}`; a bare
/// `{"message": ...}` is accepted too.
pub(super) fn extract_stash_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return None;
    };
    value
        .get("errors")
        .and_then(Value::as_array)
        .and_then(|errors| errors.first())
        .and_then(|error| error.get("message"))
        .or_else(|| value.get("message"))
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
}

#[cfg(test)]
mod tests {
    use http::StatusCode;
    use rstest::rstest;

    use super::{extract_stash_message, map_http_error};
    use crate::stash::error::StashError;

    #[rstest]
    #[case::errors_array(
        r#"{"errors":[{"context":null,"message":"Pull request 9 does not exist.","exceptionName":"NoSuchPullRequestException"}]}"#,
        Some("Pull request 9 does not exist.")
    )]
    #[case::bare_message(r#"{"message":"Bad request"}"#, Some("Bad request"))]
    #[case::empty_errors(r#"{"errors":[]}"#, None)]
    #[case::not_json("<html>oops</html>", None)]
    fn extracts_first_error_message(#[case] body: &str, #[case] expected: Option<&str>) {
        assert_eq!(extract_stash_message(body).as_deref(), expected);
    }

    #[rstest]
    #[case::unauthorized(StatusCode::UNAUTHORIZED)]
    #[case::forbidden(StatusCode::FORBIDDEN)]
    fn auth_statuses_map_to_authentication(#[case] status: StatusCode) {
        let error = map_http_error("find", status, Some("denied".to_owned()));
        assert!(
            matches!(error, StashError::Authentication { .. }),
            "expected Authentication, got {error:?}"
        );
    }

    #[test]
    fn other_statuses_map_to_api_with_status() {
        let error = map_http_error("find", StatusCode::NOT_FOUND, None);
        assert_eq!(
            error,
            StashError::Api {
                status: 404,
                message: "find failed: unknown error".to_owned(),
            }
        );
    }
}
