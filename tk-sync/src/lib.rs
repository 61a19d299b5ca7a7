pub mod apis;
pub mod config;
pub mod observability;
pub mod pipeline;
pub mod server;
pub mod util;
