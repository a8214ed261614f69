mod model;
mod repository;

pub use model::{
    AttemptStatus, HistoryEntry, HistoryPage, Performance, PerformanceStats, PerformanceUpdate,
};
pub use repository::{InMemoryPerformanceRepository, PerformanceRepository};
