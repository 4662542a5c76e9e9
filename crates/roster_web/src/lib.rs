//! HTTP surface of the student roster: six server-rendered CRUD routes.

pub mod config;
pub mod handlers;
pub mod input;
pub mod routes;
pub mod server;
pub mod state;
pub mod views;

pub use config::{ConfigError, ServerConfig};
pub use routes::build_router;
pub use server::{connect, run, ServerError};
pub use state::AppState;
pub use views::{ViewError, Views};
