use reqwest::StatusCode;
use serde::Deserialize;
use std::error::Error as StdError;
use std::io::ErrorKind;

use crate::error::ChatFailure;

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

fn error_chain_matches(
    err: &(dyn StdError + 'static),
    kinds: &[ErrorKind],
    phrases: &[&str],
) -> bool {
    let mut current: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(source) = current {
        if let Some(io_err) = source.downcast_ref::<std::io::Error>()
            && kinds.contains(&io_err.kind())
        {
            return true;
        }

        let text = source.to_string().to_ascii_lowercase();
        if phrases.iter().any(|phrase| text.contains(phrase)) {
            return true;
        }

        current = source.source();
    }

    false
}

fn is_timeout_error(err: &reqwest::Error) -> bool {
    err.is_timeout() || error_chain_matches(err, &[ErrorKind::TimedOut], &["timed out"])
}

fn is_connectivity_error(err: &reqwest::Error) -> bool {
    err.is_connect()
        || error_chain_matches(
            err,
            &[
                ErrorKind::ConnectionRefused,
                ErrorKind::ConnectionReset,
                ErrorKind::ConnectionAborted,
            ],
            &["connection refused"],
        )
}

/// Classifies a transport-level failure while sending or reading a response.
///
/// Timeouts are checked first and are not connectivity failures.
pub(crate) fn request_failure(err: &reqwest::Error) -> ChatFailure {
    if is_timeout_error(err) {
        return ChatFailure::unclassified(format!("Request timed out: {err}"));
    }
    if is_connectivity_error(err) {
        return ChatFailure::Connectivity;
    }
    ChatFailure::unclassified(format!("Failed to call model API: {err}"))
}

/// Classifies a non-success HTTP response.
pub(crate) fn status_failure(status: StatusCode, body: &str) -> ChatFailure {
    match status {
        StatusCode::UNAUTHORIZED => ChatFailure::Authentication,
        StatusCode::TOO_MANY_REQUESTS => ChatFailure::RateLimit,
        _ => match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(parsed) => ChatFailure::Unclassified(parsed.error.message),
            Err(_) => ChatFailure::unclassified(format!(
                "Model request failed with status {status}: {body}"
            )),
        },
    }
}
