//! Output generation for search results.
//!
//! # Submodules
//!
//! - [`text`]: Renders results as a numbered list for the terminal
//! - [`json`]: Writes one JSON report per keyword for other tools
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! └── 2026-10-15/
//!     ├── rust-language.json
//!     └── climate.json
//! ```

pub mod json;
pub mod text;
