pub mod entities;
pub mod ports;
pub mod services;

pub use entities::{HistoryCommit, HistoryEntry};
pub use ports::HistoryService;
