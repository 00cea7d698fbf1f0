//! View configuration loaded from TOML

pub mod consts;
mod model;

pub use model::{ExtensionConfig, ViewConfig, ViewsConfig};
