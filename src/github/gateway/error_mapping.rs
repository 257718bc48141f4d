//! Classification of transport, HTTP, and GraphQL failures.

use http::StatusCode;

use super::operations::GraphQlError;
use crate::github::error::TalkError;

/// Checks if an octocrab error represents a network/transport issue.
pub(super) const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

/// Checks whether a 403 or 429 response is GitHub's rate limiter talking.
fn is_rate_limit(status: StatusCode, message: &str, documentation_url: Option<&str>) -> bool {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return true;
    }
    status == StatusCode::FORBIDDEN
        && (message.to_lowercase().contains("rate limit")
            || documentation_url.is_some_and(|url| url.contains("rate-limit")))
}

pub(super) fn map_status(
    operation: &str,
    status: StatusCode,
    message: &str,
    documentation_url: Option<&str>,
) -> TalkError {
    let detail = format!("{operation}: {message}");
    if is_rate_limit(status, message, documentation_url) {
        return TalkError::RateLimited { message: detail };
    }
    match status {
        StatusCode::UNAUTHORIZED => TalkError::Unauthenticated { message: detail },
        StatusCode::FORBIDDEN => TalkError::PermissionDenied { message: detail },
        StatusCode::NOT_FOUND => TalkError::ResourceNotFound { message: detail },
        StatusCode::UNPROCESSABLE_ENTITY => TalkError::ValidationFailed { message: detail },
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
            TalkError::ServiceUnavailable {
                message: format!("{operation}: HTTP {status}"),
            }
        }
        _ => TalkError::UnknownRemoteError {
            message: format!("{operation}: HTTP {}: {message}", status.as_u16()),
        },
    }
}

pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> TalkError {
    if let octocrab::Error::GitHub { source, .. } = error {
        return map_status(
            operation,
            source.status_code,
            &source.message,
            source.documentation_url.as_deref(),
        );
    }

    if is_network_error(error) {
        return TalkError::ServiceUnavailable {
            message: format!("{operation}: {error}"),
        };
    }

    TalkError::UnknownRemoteError {
        message: format!("{operation}: {error}"),
    }
}

/// Maps the `errors` array of a GraphQL response.
///
/// The first error with a recognised `type` decides the variant; the
/// message joins every error so nothing GitHub reported is lost.
pub(super) fn map_graphql_errors(operation: &str, errors: &[GraphQlError]) -> TalkError {
    let message = format!(
        "{operation}: {}",
        errors
            .iter()
            .map(|error| error.message.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    );
    let kind = errors
        .iter()
        .find_map(|error| error.kind.as_deref().and_then(classify_graphql_type));

    match kind {
        Some(GraphQlErrorKind::NotFound) => TalkError::ResourceNotFound { message },
        Some(GraphQlErrorKind::Forbidden) => TalkError::PermissionDenied { message },
        Some(GraphQlErrorKind::Unprocessable) => TalkError::ValidationFailed { message },
        Some(GraphQlErrorKind::RateLimited) => TalkError::RateLimited { message },
        None => TalkError::UnknownRemoteError { message },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GraphQlErrorKind {
    NotFound,
    Forbidden,
    Unprocessable,
    RateLimited,
}

fn classify_graphql_type(kind: &str) -> Option<GraphQlErrorKind> {
    match kind {
        "NOT_FOUND" => Some(GraphQlErrorKind::NotFound),
        "FORBIDDEN" => Some(GraphQlErrorKind::Forbidden),
        "UNPROCESSABLE" => Some(GraphQlErrorKind::Unprocessable),
        "RATE_LIMITED" | "RATE_LIMIT" => Some(GraphQlErrorKind::RateLimited),
        _ => None,
    }
}
