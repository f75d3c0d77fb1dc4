//! HTTP surface: page, layout and chart endpoints

pub mod page;
pub mod routes;
pub mod server;

pub use server::{build_app, AppState, WebServer, WebServerConfig};
