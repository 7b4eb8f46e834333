//! HTTP surface: pages, overlays and the `/api` forwarder

pub mod error;
pub mod handlers;
pub mod proxy;
pub mod render;
pub mod server;
pub mod state;

pub use server::{router, start_server};
pub use state::AppState;

#[cfg(test)]
mod tests;
