//! # Configuration
//!
//! Formatting defaults and the catalog location are read with [`confique`],
//! layered in priority order:
//!
//! 1. **Environment variables**: `CRITERIA_JOINER`, `CRITERIA_MAX_LIST_ITEMS`,
//!    `CRITERIA_SENTENCE`, `CRITERIA_CATALOG`.
//! 2. **Config files**: `criteria.toml`, earlier paths overriding later ones.
//! 3. **Compiled defaults**: `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `joiner` | `"and"` | Word placed between clause phrases |
//! | `max_list_items` | unset | Multiselect values shown before `or K more` |
//! | `format_as_sentence` | `false` | Capitalize and punctuate the output |
//! | `catalog` | unset | Catalog JSON file; the built-in catalog when unset |

use crate::catalog::builtin::participation_catalog;
use crate::catalog::Catalog;
use crate::error::Result;
use crate::format::DEFAULT_JOINER;
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Configuration for criteria, stored in `criteria.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CriteriaConfig {
    /// Word placed between clause phrases.
    #[config(default = "and", env = "CRITERIA_JOINER")]
    pub joiner: String,

    /// How many multiselect values to list before summarizing the rest.
    #[config(env = "CRITERIA_MAX_LIST_ITEMS")]
    pub max_list_items: Option<usize>,

    /// Capitalize the first word and end with a terminal mark.
    #[config(default = false, env = "CRITERIA_SENTENCE")]
    pub format_as_sentence: bool,

    /// Path to a catalog JSON file.
    #[config(env = "CRITERIA_CATALOG")]
    pub catalog: Option<PathBuf>,
}

impl Default for CriteriaConfig {
    fn default() -> Self {
        Self {
            joiner: DEFAULT_JOINER.to_string(),
            max_list_items: None,
            format_as_sentence: false,
            catalog: None,
        }
    }
}

impl CriteriaConfig {
    pub const FILE_NAME: &'static str = "criteria.toml";

    /// Load from the environment and, if given, one config file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let paths: Vec<PathBuf> = path.map(Path::to_path_buf).into_iter().collect();
        Self::load_layered(&paths)
    }

    /// Load from the environment and `paths`, earlier files taking priority.
    /// Missing files are skipped.
    pub fn load_layered(paths: &[PathBuf]) -> Result<Self> {
        let mut builder = Self::builder().env();
        for path in paths {
            builder = builder.file(path);
        }
        let config = builder.load()?;
        tracing::debug!(?config, "Loaded configuration");
        Ok(config)
    }

    /// The configured catalog, or the built-in one.
    pub fn catalog(&self) -> Result<Arc<Catalog>> {
        match &self.catalog {
            Some(path) => Ok(Arc::new(Catalog::load(path)?)),
            None => Ok(participation_catalog()),
        }
    }
}
