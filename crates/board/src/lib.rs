pub mod config;
pub mod logger;
pub mod poller;
pub mod render;
pub mod server;
pub mod state;
