pub mod combine;
pub mod local_vars;

pub use crate::domain::model::{Entity, LoadOptions, PluginSettings, VariableRecord};
pub use crate::domain::ports::{HostnameSource, VarsLoader, VarsPlugin};
pub use crate::utils::error::Result;
