//! Command Handlers
//!
//! Everything the `clu` binary does after argument parsing: token
//! resolution against the loaded reference data, and rendering.
//!
//! ## Module Organization
//! - `lookup` - Callsign/locator token resolution and path computation
//! - `output` - Text and JSON rendering

pub mod lookup;
pub mod output;

pub use lookup::{classify, Resolver, Station, TokenKind};
pub use output::{render_json, render_text, OutputOptions};
