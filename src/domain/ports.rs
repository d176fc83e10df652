use crate::domain::model::{Entity, LoadOptions, VariableRecord};
use crate::utils::error::{ParserError, Result};
use crate::utils::validation;
use std::path::{Path, PathBuf};

/// File access the framework lends to vars plugins.
pub trait VarsLoader: Send + Sync {
    /// Variable files under `dir` that belong to `name`, in merge order.
    fn find_vars_files(&self, dir: &Path, name: &str) -> Result<Vec<PathBuf>>;

    /// Parsed content of `path`; `None` when the document is empty.
    fn load_from_file(&self, path: &Path, options: LoadOptions)
        -> Result<Option<serde_json::Value>>;
}

/// Where the local machine's name comes from.
pub trait HostnameSource: Send + Sync {
    fn hostname(&self) -> Result<String>;
}

pub trait VarsPlugin: Send + Sync {
    fn name(&self) -> &'static str;

    /// Pre-check run before any work; rejects malformed entities.
    fn validate_entities(&self, entities: &[Entity]) -> Result<()> {
        validation::validate_entities(entities)
    }

    fn get_vars(
        &self,
        loader: &dyn VarsLoader,
        path: &Path,
        entities: &[Entity],
    ) -> std::result::Result<VariableRecord, ParserError>;
}
