//! Rendering module for writing outlines out.

mod json;

pub use json::{to_json, write_json, JsonFormat};
