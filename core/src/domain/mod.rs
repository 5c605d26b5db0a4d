pub mod common;
pub mod credential;
pub mod food_analysis;
pub mod history;
pub mod notification;
pub mod prompt;
pub mod session;
pub mod storage;
pub mod theme;
