mod code;
mod filters;
mod performance;
mod questions;
mod rejection;
mod routes;
mod state;
mod websocket;

pub use rejection::handle_rejection;
pub use routes::{health_check, interview_stats, interview_websocket_route, routes};
pub use state::AppState;
