//! # CLI Behavior
//!
//! This is **one possible host** for the criteria engine. It plays the part a
//! form would: it reads a clause list, asks the library to describe, validate
//! or evaluate it, and prints the answer.
//!
//! ## Inputs
//!
//! Every command that takes a clause list, error payload or profile reads it
//! from a file argument. Files ending in `.yaml` or `.yml` are parsed as YAML,
//! anything else as JSON, and `-` reads stdin.
//!
//! ## Exit Codes
//!
//! - `0`: the command ran; for `check` the list is valid, for `match` the
//!   profile qualifies.
//! - `1`: an error, an invalid list under `check`, or a profile that does not
//!   qualify under `match`.
//!
//! ## Module Structure
//!
//! - `setup`: Argument parsing via clap
//! - `commands`: Config and logging setup, per-command handlers
//! - `input`: Reading JSON/YAML documents from files or stdin
//! - `render`: Output formatting (tables, colors, messages)

mod commands;
mod input;
mod render;
pub mod setup;

pub use commands::run;
