//! Coding-interview practice server: real-time mock interview rooms plus the
//! question, progress and code-run REST API around them.

pub mod ai;
pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod execution;
pub mod interview;
pub mod pagination;
pub mod performance;
pub mod questions;
