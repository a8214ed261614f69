use chrono::Utc;
use serde::{Deserialize, Serialize};
use warp::{Filter, Rejection, Reply};

use super::filters::{authenticated, json_body, optional_json_body, with_state};
use super::state::AppState;
use crate::auth::AuthUser;
use crate::error::AppError;
use crate::pagination::{Page, PageQuery};
use crate::questions::{Difficulty, Question, UnsavedQuestion};

const DEFAULT_DIFFICULTY: &str = "Medium";

#[derive(Debug, Deserialize)]
struct GenerateRequest {
    topic: Option<String>,
    difficulty: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HintRequest {
    current_code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TopicQuery {
    difficulty: Option<String>,
    page: Option<u64>,
    limit: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TopicPage {
    questions: Vec<Question>,
    total: usize,
    page: u64,
    total_pages: u64,
}

pub fn routes(state: AppState) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    test_gemini_route(state.clone())
        .or(generate_route(state.clone()))
        .or(random_route(state.clone()))
        .or(by_topic_route(state.clone()))
        .or(hint_route(state.clone()))
        .or(solution_route(state))
}

/// Unauthenticated smoke test of the generator
fn test_gemini_route(
    state: AppState,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path!("api" / "test-gemini")
        .and(warp::get())
        .and(with_state(state))
        .and_then(|state: AppState| async move {
            let question = state
                .generator
                .generate_question("arrays", "easy")
                .await
                .map_err(warp::reject::custom)?;
            Ok::<_, Rejection>(warp::reply::json(&question))
        })
}

fn generate_route(state: AppState) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path!("api" / "questions" / "generate")
        .and(warp::post())
        .and(authenticated(state.clone()))
        .and(json_body::<GenerateRequest>())
        .and(with_state(state))
        .and_then(generate_question)
}

fn random_route(state: AppState) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path!("api" / "questions" / "random")
        .and(warp::get())
        .and(authenticated(state.clone()))
        .and(with_state(state))
        .and_then(random_question)
}

fn by_topic_route(state: AppState) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path!("api" / "questions" / "topic" / String)
        .and(warp::get())
        .and(authenticated(state.clone()))
        .and(warp::query::<TopicQuery>())
        .and(with_state(state))
        .and_then(questions_by_topic)
}

fn hint_route(state: AppState) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path!("api" / "questions" / String / "hint")
        .and(warp::post())
        .and(authenticated(state.clone()))
        .and(optional_json_body::<HintRequest>())
        .and(with_state(state))
        .and_then(question_hint)
}

fn solution_route(state: AppState) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path!("api" / "questions" / String / "solution")
        .and(warp::get())
        .and(authenticated(state.clone()))
        .and(with_state(state))
        .and_then(question_solution)
}

async fn generate_question(
    user: AuthUser,
    request: GenerateRequest,
    state: AppState,
) -> Result<impl Reply, Rejection> {
    let topic = request
        .topic
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| warp::reject::custom(AppError::validation("Topic is required")))?;
    let difficulty = request
        .difficulty
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DIFFICULTY.to_string());

    tracing::info!(user_id = %user.user_id, topic = %topic, difficulty = %difficulty, "Generating question");

    let generated = state
        .generator
        .generate_question(topic, &difficulty)
        .await
        .map_err(warp::reject::custom)?;

    let now = Utc::now();
    let stored = match Question::from_generated(&generated, now) {
        Ok(question) => state.questions.insert(question).await,
        Err(e) => Err(e),
    };

    match stored {
        Ok(question) => Ok(warp::reply::json(&question)),
        Err(e) => {
            tracing::warn!(error = %e, "Saving generated question failed, returning it unsaved");
            Ok(warp::reply::json(&UnsavedQuestion::new(generated, now)))
        }
    }
}

async fn random_question(_user: AuthUser, state: AppState) -> Result<impl Reply, Rejection> {
    if let Some(question) = state.questions.random().await.map_err(warp::reject::custom)? {
        return Ok(warp::reply::json(&question));
    }

    tracing::info!("No stored questions, generating one");
    let generated = state
        .generator
        .generate_question("arrays", "medium")
        .await
        .map_err(warp::reject::custom)?;
    Ok(warp::reply::json(&UnsavedQuestion::new(generated, Utc::now())))
}

async fn questions_by_topic(
    topic: String,
    _user: AuthUser,
    query: TopicQuery,
    state: AppState,
) -> Result<impl Reply, Rejection> {
    let difficulty = match query.difficulty.as_deref().filter(|d| !d.is_empty()) {
        Some(raw) => Some(raw.parse::<Difficulty>().map_err(warp::reject::custom)?),
        None => None,
    };
    let page = Page::from(PageQuery {
        page: query.page,
        limit: query.limit,
    });

    let (questions, total) = state
        .questions
        .find_by_topic(&topic, difficulty, page)
        .await
        .map_err(warp::reject::custom)?;

    Ok(warp::reply::json(&TopicPage {
        questions,
        total,
        page: page.page,
        total_pages: page.total_pages(total),
    }))
}

async fn question_hint(
    id: String,
    _user: AuthUser,
    request: HintRequest,
    state: AppState,
) -> Result<impl Reply, Rejection> {
    let question = find_question(&state, &id).await?;
    let hint = state
        .generator
        .generate_hint(&question.description, request.current_code.as_deref().unwrap_or(""))
        .await
        .map_err(warp::reject::custom)?;

    Ok(warp::reply::json(&serde_json::json!({ "hint": hint })))
}

async fn question_solution(
    id: String,
    _user: AuthUser,
    state: AppState,
) -> Result<impl Reply, Rejection> {
    let question = find_question(&state, &id).await?;
    if !question.solution.is_empty() {
        return Ok(warp::reply::json(&serde_json::json!({ "solution": question.solution })));
    }

    let solution = state
        .generator
        .generate_solution(&question.description)
        .await
        .map_err(warp::reject::custom)?;

    if let Err(e) = state.questions.update_solution(&id, &solution).await {
        tracing::warn!(question_id = %id, error = %e, "Failed to store generated solution");
    }

    Ok(warp::reply::json(&serde_json::json!({ "solution": solution })))
}

async fn find_question(state: &AppState, id: &str) -> Result<Question, Rejection> {
    state
        .questions
        .find_by_id(id)
        .await
        .map_err(warp::reject::custom)?
        .ok_or_else(|| warp::reject::custom(AppError::not_found("Question")))
}
