//! # criteria
//!
//! A participation-criteria logic engine: a flat AND-chain of
//! attribute/operator/value clauses, edited against a catalog that describes
//! which attributes exist, which operators each attribute allows, and what
//! kind of input each operator takes.
//!
//! ## Layering
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │  surface    : per-row view model + EditAction dispatch    │
//! └───────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │  store      : ordered clause list, ids, change sink       │
//! │  completion : is_complete / can_append_after / can_remove │
//! └───────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │  clause     : LogicClause, ClausePatch, TypedClause       │
//! │  catalog    : attributes, operators, input specs          │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! Rendering lives beside the store: [`format`] turns a clause list into a
//! sentence and an error payload into a per-clause report. [`schema`] produces
//! such error payloads, and [`evaluate`] checks a participant profile against a
//! clause list.
//!
//! Nothing in this crate performs I/O except [`catalog::Catalog::load`] and
//! [`config::CriteriaConfig::load`]. Every other operation is a pure, immediate
//! computation.
//!
//! ## Example
//!
//! ```
//! use criteria::catalog::builtin::participation_catalog;
//! use criteria::clause::LogicClause;
//! use criteria::format::{format_clauses, FormatOptions};
//!
//! let catalog = participation_catalog();
//! let clauses = vec![LogicClause::new("country", "in", ["us", "ca"])];
//! let text = format_clauses(Some(&clauses[..]), &catalog, &FormatOptions::default());
//! assert_eq!(text.as_deref(), Some("Country is in United States or Canada"));
//! ```

pub mod catalog;
pub mod clause;
pub mod completion;
pub mod config;
pub mod error;
pub mod evaluate;
pub mod format;
pub mod schema;
pub mod store;
pub mod surface;

pub use catalog::{AttributeOption, Catalog, ChoiceOption, InputKind, InputSpec, OperatorOption};
pub use clause::{ClauseId, ClausePatch, LogicClause, TypedClause};
pub use error::{CriteriaError, Result};
pub use store::{ClauseSource, ClauseStore, OnChange};
pub use surface::{ClauseRow, EditAction};
