//! HTTP handlers for the students resource.

pub mod students;
pub use students::*;
