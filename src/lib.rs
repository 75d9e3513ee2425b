pub mod actions;
mod app;
pub mod components;
pub mod effect;
pub mod environment;
pub mod middleware;
pub mod store;

pub use app::{run, AppError};
