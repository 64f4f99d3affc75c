// vizor - Azure AI Vision image analysis demo server

pub mod cli;
pub mod config;
pub mod error;
pub mod metrics;
pub mod render;
pub mod server;
pub mod utils;
pub mod vision;
