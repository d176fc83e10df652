use crate::adapters::hostname::SystemHostname;
use crate::core::combine::{combine_vars, is_empty_data};
use crate::domain::model::{
    Entity, LoadOptions, PluginSettings, Stage, VariableRecord, LOCAL_HOSTNAME_VAR,
};
use crate::domain::ports::{HostnameSource, VarsLoader, VarsPlugin};
use crate::utils::error::{ParserError, Result};
use crate::utils::path;
use serde_json::Value;
use std::path::Path;

/// Subdirectory of the basedir that holds per-machine variable files.
pub const LOCAL_VARS_DIR: &str = "local_vars";

/// Vars plugin that loads `local_vars/<local hostname>` files.
///
/// Sets `local_hostname` and merges every variable file named after the
/// machine running the resolution, so several controllers can share one
/// configuration tree with small per-machine differences.
///
/// The hostname always comes from the operating system; extra vars and
/// environment variables are not visible to a vars plugin and cannot
/// override it.
#[derive(Debug, Clone, Default)]
pub struct LocalVarsPlugin<H: HostnameSource = SystemHostname> {
    hostname_source: H,
    settings: PluginSettings,
}

impl LocalVarsPlugin<SystemHostname> {
    pub fn new(settings: PluginSettings) -> Self {
        Self::with_hostname_source(SystemHostname::new(), settings)
    }
}

impl<H: HostnameSource> LocalVarsPlugin<H> {
    pub fn with_hostname_source(hostname_source: H, settings: PluginSettings) -> Self {
        Self {
            hostname_source,
            settings,
        }
    }

    pub fn settings(&self) -> &PluginSettings {
        &self.settings
    }

    /// Whether the plugin takes part in a resolution pass at `stage`.
    pub fn runs_at(&self, stage: Stage) -> bool {
        self.settings.stage.covers(stage)
    }

    fn resolve(&self, loader: &dyn VarsLoader, basedir: &Path) -> Result<VariableRecord> {
        let hostname = self.hostname_source.hostname()?;

        let mut data = VariableRecord::new();
        data.insert(LOCAL_HOSTNAME_VAR.to_string(), Value::String(hostname.clone()));

        let search_dir = path::normalize(&basedir.join(LOCAL_VARS_DIR))?;
        let found_files = loader.find_vars_files(&search_dir, &hostname)?;

        let options = LoadOptions {
            cache: true,
            unsafe_tags: true,
        };
        for found in found_files {
            tracing::debug!("\tprocessing file {}", found.display());
            match loader.load_from_file(&found, options)? {
                Some(new_data) if !is_empty_data(&new_data) => {
                    data = combine_vars(data, new_data, self.settings.hash_behaviour)?;
                }
                _ => {} // 空檔案不影響結果
            }
        }

        Ok(data)
    }
}

impl<H: HostnameSource> VarsPlugin for LocalVarsPlugin<H> {
    fn name(&self) -> &'static str {
        "local_vars"
    }

    fn get_vars(
        &self,
        loader: &dyn VarsLoader,
        source: &Path,
        entities: &[Entity],
    ) -> std::result::Result<VariableRecord, ParserError> {
        self.validate_entities(entities)?;

        let basedir = path::basedir(source)?;
        self.resolve(loader, &basedir).map_err(ParserError::from)
    }
}
