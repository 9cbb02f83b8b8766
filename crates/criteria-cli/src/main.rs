//! # criteria CLI
//!
//! A thin host around the `criteria` library. The binary only invokes
//! `cli::run()` and handles process termination; everything it does to clause
//! lists goes through the library's public API.
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/criteria-cli/src/cli/)                   │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - input files: JSON, YAML, stdin (input.rs)                │
//! │  - config + logging setup, dispatch (commands.rs)           │
//! │  - terminal rendering via console styles (render.rs)        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Library (crates/criteria/)                                 │
//! │  - catalog, store, completion, format, schema, evaluate     │
//! │  - no knowledge of stdout/stderr or process exits           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Testing Approach
//!
//! The library carries the unit and property tests. This crate is covered by
//! end-to-end tests in `tests/` that run the built binary against files in a
//! temporary directory.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
