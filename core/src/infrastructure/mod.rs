pub mod image;
pub mod llm;
pub mod storage;
