use std::convert::Infallible;

use warp::http::StatusCode;
use warp::Reply;

use crate::error::{AppError, ErrorBody};

/// Turns every rejection into a JSON `{message, error?}` reply
pub async fn handle_rejection(rejection: warp::Rejection) -> Result<impl Reply, Infallible> {
    let (status, body) = if rejection.is_not_found() {
        (
            StatusCode::NOT_FOUND,
            ErrorBody {
                message: "Route not found".to_string(),
                error: None,
            },
        )
    } else if let Some(e) = rejection.find::<AppError>() {
        if e.status_code().is_server_error() {
            tracing::error!(error = %e, "Request failed");
        }
        (e.status_code(), e.body())
    } else if let Some(e) = rejection.find::<warp::filters::body::BodyDeserializeError>() {
        (
            StatusCode::BAD_REQUEST,
            ErrorBody {
                message: "Invalid request body".to_string(),
                error: Some(e.to_string()),
            },
        )
    } else if let Some(e) = rejection.find::<warp::reject::InvalidQuery>() {
        (
            StatusCode::BAD_REQUEST,
            ErrorBody {
                message: "Invalid query string".to_string(),
                error: Some(e.to_string()),
            },
        )
    } else if rejection.find::<warp::reject::PayloadTooLarge>().is_some() {
        (
            StatusCode::PAYLOAD_TOO_LARGE,
            ErrorBody {
                message: "Request body too large".to_string(),
                error: None,
            },
        )
    } else if rejection.find::<warp::reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            ErrorBody {
                message: "Method not allowed".to_string(),
                error: None,
            },
        )
    } else {
        tracing::error!(rejection = ?rejection, "Unhandled rejection");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorBody {
                message: "Server error".to_string(),
                error: None,
            },
        )
    };

    Ok(warp::reply::with_status(warp::reply::json(&body), status))
}
