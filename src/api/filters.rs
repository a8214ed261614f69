use serde::de::DeserializeOwned;
use warp::Filter;

use super::state::AppState;
use crate::auth::{bearer_token, AuthUser};
use crate::error::AppError;

const MAX_BODY_BYTES: u64 = 10 * 1024 * 1024;

pub fn with_state(
    state: AppState,
) -> impl Filter<Extract = (AppState,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || state.clone())
}

/// Verified caller of an authenticated route. Rejects with 401 when the
/// bearer token is missing and 403 when it does not verify.
pub fn authenticated(
    state: AppState,
) -> impl Filter<Extract = (AuthUser,), Error = warp::Rejection> + Clone {
    warp::header::optional::<String>("authorization")
        .and(with_state(state))
        .and_then(|header: Option<String>, state: AppState| async move {
            let token = header
                .as_deref()
                .and_then(bearer_token)
                .ok_or_else(|| {
                    warp::reject::custom(AppError::Authentication(
                        "Access token required".to_string(),
                    ))
                })?;

            state.tokens.validate(token).map_err(warp::reject::custom)
        })
}

/// JSON request body, capped at 10 MB
pub fn json_body<T: DeserializeOwned + Send>(
) -> impl Filter<Extract = (T,), Error = warp::Rejection> + Clone {
    warp::body::content_length_limit(MAX_BODY_BYTES).and(warp::body::json())
}

/// Like `json_body`, but an empty body yields `T::default()`
pub fn optional_json_body<T: DeserializeOwned + Default + Send>(
) -> impl Filter<Extract = (T,), Error = warp::Rejection> + Clone {
    warp::body::content_length_limit(MAX_BODY_BYTES)
        .and(warp::body::bytes())
        .and_then(|body: warp::hyper::body::Bytes| async move {
            parse_optional_json(&body).map_err(warp::reject::custom)
        })
}

fn parse_optional_json<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::validation(format!("Invalid JSON body: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Body {
        code: Option<String>,
    }

    #[test]
    fn test_empty_body_is_default() {
        assert_eq!(parse_optional_json::<Body>(b"").unwrap(), Body::default());
        assert_eq!(parse_optional_json::<Body>(b" \n").unwrap(), Body::default());
    }

    #[test]
    fn test_body_is_parsed() {
        let body: Body = parse_optional_json(br#"{"code":"x"}"#).unwrap();
        assert_eq!(body.code.as_deref(), Some("x"));
        assert!(matches!(
            parse_optional_json::<Body>(b"{oops"),
            Err(AppError::Validation(_))
        ));
    }
}
