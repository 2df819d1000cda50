pub mod config;
pub mod error;
pub mod history;
pub mod http;
pub mod jokes;
pub mod stats;
