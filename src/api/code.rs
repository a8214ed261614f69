use serde::Deserialize;
use warp::{Filter, Rejection, Reply};

use super::filters::{json_body, with_state};
use super::state::AppState;
use crate::error::AppError;
use crate::execution::Language;

#[derive(Debug, Deserialize)]
struct RunRequest {
    language: Option<String>,
    code: Option<String>,
}

pub fn routes(state: AppState) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path!("api" / "code" / "run")
        .and(warp::post())
        .and(json_body::<RunRequest>())
        .and(with_state(state))
        .and_then(run_code)
}

async fn run_code(request: RunRequest, state: AppState) -> Result<impl Reply, Rejection> {
    let (language, code) = match (request.language, request.code) {
        (Some(language), Some(code)) if !language.is_empty() && !code.is_empty() => {
            (language, code)
        }
        _ => {
            return Err(warp::reject::custom(AppError::validation(
                "Language and code are required",
            )))
        }
    };

    let language: Language = language.parse().map_err(warp::reject::custom)?;
    let result = state
        .runner
        .run(language, &code)
        .await
        .map_err(warp::reject::custom)?;

    tracing::info!(language = ?language, output_len = result.output.len(), "Code run finished");
    Ok(warp::reply::json(&result))
}
