//! Turns photographed pages into structured HTML notes
//!
//! Text is recognized with Cloud Vision, summarized into notes by Gemini, and
//! the model output is reformatted from markdown-style syntax into HTML.

pub mod ai;
pub mod app;
pub mod error;
pub mod models;
pub mod prompts;
pub mod reformat;

pub use error::{Error, Result};
pub use reformat::reformat;
