pub mod catalog;
pub mod error;
pub mod preprocess;
pub mod ranker;
pub mod session;
pub mod types;
