//! Command-line front end: reads the stored text, applies one transformation
//! and writes the result back.
mod app;
mod args;

pub use app::*;
pub use args::*;
