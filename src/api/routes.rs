use chrono::Utc;
use serde::Deserialize;
use warp::{Filter, Rejection, Reply};

use super::state::AppState;
use super::{code, performance, questions, websocket};
use crate::auth::bearer_token;
use crate::interview::InterviewHub;

/// Query accepted on the socket upgrade
#[derive(Debug, Default, Deserialize)]
struct SocketQuery {
    token: Option<String>,
}

/// Every route the server exposes
pub fn routes(state: AppState) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    health_check()
        .or(interview_websocket_route(state.hub.clone()))
        .or(interview_stats(state.hub.clone()))
        .or(questions::routes(state.clone()))
        .or(performance::routes(state.clone()))
        .or(code::routes(state))
}

/// Interview room WebSocket. The credential comes from `?token=` or an
/// `Authorization: Bearer` header.
pub fn interview_websocket_route(
    hub: InterviewHub,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path("socket")
        .and(warp::path::end())
        .and(warp::ws())
        .and(warp::query::<SocketQuery>())
        .and(warp::header::optional::<String>("authorization"))
        .and(with_hub(hub))
        .map(
            |ws: warp::ws::Ws, query: SocketQuery, header: Option<String>, hub: InterviewHub| {
                let token = query
                    .token
                    .or_else(|| header.as_deref().and_then(bearer_token).map(str::to_string));
                ws.on_upgrade(move |websocket| {
                    websocket::handle_interview_socket(websocket, hub, token)
                })
            },
        )
}

pub fn health_check() -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .map(|| {
            warp::reply::json(&serde_json::json!({
                "status": "OK",
                "timestamp": Utc::now(),
            }))
        })
}

pub fn interview_stats(
    hub: InterviewHub,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path!("api" / "interviews" / "stats")
        .and(warp::get())
        .and(with_hub(hub))
        .and_then(|hub: InterviewHub| async move {
            let stats = hub.stats().await.map_err(warp::reject::custom)?;
            Ok::<_, Rejection>(warp::reply::json(&stats))
        })
}

fn with_hub(
    hub: InterviewHub,
) -> impl Filter<Extract = (InterviewHub,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || hub.clone())
}
