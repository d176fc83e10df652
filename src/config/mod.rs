pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::model::{Entity, HashBehaviour, Stage};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

pub use toml_config::LocalVarsConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "local-vars")]
#[command(about = "Resolve variables from local_vars/<local hostname> files")]
pub struct CliConfig {
    /// Inventory or playbook path whose directory holds local_vars/
    #[arg(long, default_value = ".")]
    pub basedir: PathBuf,

    /// Optional TOML settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Host entity to resolve for (repeatable)
    #[arg(long = "host", default_value = "localhost")]
    pub hosts: Vec<String>,

    /// Group entity to resolve for (repeatable)
    #[arg(long = "group")]
    pub groups: Vec<String>,

    /// Resolution stage to simulate
    #[arg(long, value_enum, default_value_t = Stage::All)]
    pub stage: Stage,

    /// Override the hash behaviour from the settings file
    #[arg(long, value_enum)]
    pub hash_behaviour: Option<HashBehaviour>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn entities(&self) -> Vec<Entity> {
        self.hosts
            .iter()
            .map(Entity::host)
            .chain(self.groups.iter().map(Entity::group))
            .collect()
    }

    /// 命令列參數覆蓋檔案設定
    pub fn apply_overrides(&self, config: &mut LocalVarsConfig) {
        if let Some(behaviour) = self.hash_behaviour {
            config.plugin.hash_behaviour = behaviour;
        }
        if self.log_json {
            config.logging.format = "json".to_string();
        }
    }

    /// Settings file if one was given, defaults otherwise.
    pub fn load_settings(&self) -> Result<LocalVarsConfig> {
        let mut config = match &self.config {
            Some(path) => LocalVarsConfig::from_file(path)?,
            None => LocalVarsConfig::default(),
        };
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("basedir", &self.basedir.to_string_lossy())?;
        for name in self.hosts.iter().chain(self.groups.iter()) {
            validation::validate_non_empty_string("host/group", name)?;
        }
        Ok(())
    }
}
