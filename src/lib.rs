pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{hostname::SystemHostname, loader::DataLoader};
pub use config::LocalVarsConfig;
pub use core::local_vars::{LocalVarsPlugin, LOCAL_VARS_DIR};
pub use domain::model::{Entity, PluginSettings, Stage, VariableRecord, LOCAL_HOSTNAME_VAR};
pub use domain::ports::{VarsLoader, VarsPlugin};
pub use utils::error::{LocalVarsError, ParserError, Result};
