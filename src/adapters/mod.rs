// Adapters layer: concrete implementations of the domain ports (filesystem loader, OS hostname).

pub mod hostname;
pub mod loader;
