pub mod api;
mod api_error;
pub mod config;
mod http_layers;
mod request_body;
pub mod server;
pub mod state;
pub mod views;

pub use api_error::{ApiError, RecordKind};
pub use config::ServerConfig;
pub use http_layers::*;
pub use server::{make_app, run_server};
