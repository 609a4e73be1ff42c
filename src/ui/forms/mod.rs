//! Form rendering module
//!
//! - `field_renderer`: answer inputs (text, paragraph, checkbox)
//! - `question_form`: one step of a sequential form

mod field_renderer;
mod question_form;

pub use question_form::draw;
