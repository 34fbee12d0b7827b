//! Core conversion engine
//!
//! - `scanner`: the single-pass Markdown/LaTeX scanner and its recognizers

pub mod scanner;
