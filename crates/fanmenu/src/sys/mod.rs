pub mod host;
pub mod runtime;
pub mod server;
