pub mod config;
pub mod db;
pub mod error;
pub mod jobs;
pub mod server;
pub mod sources;
mod utils;
pub mod widgets;

pub use error::OnairError;
