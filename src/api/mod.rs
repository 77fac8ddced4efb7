//! HTTP API server

pub mod extract;
pub mod routes;
pub mod server;

pub use routes::MessageBody;
pub use server::*;
