pub mod analyzer;
pub mod ask;
pub mod cli;
pub mod config;
pub mod display;
pub mod fir;
pub mod routes;
pub mod server;

pub use analyzer::CaseAnalyzer;
pub use cli::{Cli, Commands};
pub use config::AppConfig;
pub use server::{run_server, AppState};
