use chrono::Utc;
use warp::{Filter, Rejection, Reply};

use super::filters::{authenticated, json_body, with_state};
use super::state::AppState;
use crate::auth::AuthUser;
use crate::pagination::{Page, PageQuery};
use crate::performance::{HistoryEntry, HistoryPage, PerformanceUpdate};

pub fn routes(state: AppState) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let update = warp::path!("api" / "performance" / "update")
        .and(warp::post())
        .and(authenticated(state.clone()))
        .and(json_body::<PerformanceUpdate>())
        .and(with_state(state.clone()))
        .and_then(update_performance);

    let stats = warp::path!("api" / "performance" / "stats")
        .and(warp::get())
        .and(authenticated(state.clone()))
        .and(with_state(state.clone()))
        .and_then(performance_stats);

    let history = warp::path!("api" / "performance" / "history")
        .and(warp::get())
        .and(authenticated(state.clone()))
        .and(warp::query::<PageQuery>())
        .and(with_state(state))
        .and_then(performance_history);

    update.or(stats).or(history)
}

async fn update_performance(
    user: AuthUser,
    update: PerformanceUpdate,
    state: AppState,
) -> Result<impl Reply, Rejection> {
    let record = state
        .performance
        .upsert(&user.user_id, &update, Utc::now())
        .await
        .map_err(warp::reject::custom)?;
    Ok(warp::reply::json(&record))
}

async fn performance_stats(user: AuthUser, state: AppState) -> Result<impl Reply, Rejection> {
    let stats = state
        .performance
        .stats(&user.user_id)
        .await
        .map_err(warp::reject::custom)?;
    Ok(warp::reply::json(&stats))
}

async fn performance_history(
    user: AuthUser,
    query: PageQuery,
    state: AppState,
) -> Result<impl Reply, Rejection> {
    let page = Page::from(query);
    let (records, total) = state
        .performance
        .history(&user.user_id, page)
        .await
        .map_err(warp::reject::custom)?;

    let mut history = Vec::with_capacity(records.len());
    for record in records {
        let question = state
            .questions
            .find_by_id(&record.question_id)
            .await
            .map_err(warp::reject::custom)?
            .map(|q| q.summary());
        history.push(HistoryEntry::new(record, question));
    }

    Ok(warp::reply::json(&HistoryPage {
        history,
        total,
        page: page.page,
        total_pages: page.total_pages(total),
    }))
}
