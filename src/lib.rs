// Library root - the server binary, the CLI and the tests all build on this.

pub mod app;
pub mod app_state;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

pub use app::router;
pub use app_state::AppState;
pub use config::Config;
