use serde::{Deserialize, Serialize};
use std::fmt;

/// Variables produced by one resolution pass.
pub type VariableRecord = serde_json::Map<String, serde_json::Value>;

/// Name of the variable that always carries the detected hostname.
pub const LOCAL_HOSTNAME_VAR: &str = "local_hostname";

/// Inventory object the framework is resolving variables for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum Entity {
    Host(String),
    Group(String),
}

impl Entity {
    pub fn host(name: impl Into<String>) -> Self {
        Entity::Host(name.into())
    }

    pub fn group(name: impl Into<String>) -> Self {
        Entity::Group(name.into())
    }

    pub fn name(&self) -> &str {
        match self {
            Entity::Host(name) | Entity::Group(name) => name,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Entity::Host(_) => "host",
            Entity::Group(_) => "group",
        }
    }
}

/// When a vars plugin is consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Stage {
    #[default]
    All,
    Inventory,
    Task,
}

impl Stage {
    /// Whether a plugin configured for `self` runs at `requested`.
    pub fn covers(self, requested: Stage) -> bool {
        self == Stage::All || requested == Stage::All || self == requested
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::All => "all",
            Stage::Inventory => "inventory",
            Stage::Task => "task",
        };
        f.write_str(name)
    }
}

/// How two variable mappings are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum HashBehaviour {
    /// Top-level keys of the later mapping replace earlier ones.
    #[default]
    Replace,
    /// Nested mappings are merged recursively.
    Merge,
}

/// Tunables of the local vars plugin. The hostname is not one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PluginSettings {
    #[serde(default)]
    pub stage: Stage,
    #[serde(default)]
    pub hash_behaviour: HashBehaviour,
}

/// Options for [`crate::domain::ports::VarsLoader::load_from_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadOptions {
    /// Reuse a previously parsed result for an unchanged file.
    pub cache: bool,
    /// Accept custom YAML tags such as `!unsafe`, keeping their inner value.
    pub unsafe_tags: bool,
}
