pub mod entities;
pub mod ports;
pub mod services;

pub use entities::{AttemptFailure, AttemptOutcome, AttemptReport, AttemptState, HistoryWrite};
pub use ports::AnalysisSessionService;
