//! Application state module

mod app_state;
pub mod forms;
mod splash_state;

pub use app_state::*;
pub use splash_state::*;
