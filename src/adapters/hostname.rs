use crate::domain::ports::HostnameSource;
use crate::utils::error::{LocalVarsError, Result};
use sysinfo::System;

/// Network hostname as reported by the operating system.
///
/// NOTE: this is the only hostname source. Extra vars, environment
/// variables and command-line flags cannot override it because a vars
/// plugin never sees them.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHostname;

impl SystemHostname {
    pub fn new() -> Self {
        Self
    }
}

impl HostnameSource for SystemHostname {
    fn hostname(&self) -> Result<String> {
        match System::host_name() {
            Some(name) if !name.trim().is_empty() => Ok(name),
            _ => Err(LocalVarsError::HostnameUnavailable),
        }
    }
}

/// Hostname pinned to a fixed value, for exercising the plugin in tests.
#[derive(Debug, Clone)]
pub struct FixedHostname(pub String);

impl HostnameSource for FixedHostname {
    fn hostname(&self) -> Result<String> {
        if self.0.trim().is_empty() {
            return Err(LocalVarsError::HostnameUnavailable);
        }
        Ok(self.0.clone())
    }
}
