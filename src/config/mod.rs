//! Front-end configuration: types, default paths, XML loading and validation.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use xml::{create_template_config, load_config_from_xml_path, load_or_init, LoadResult};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "CANON_RENAME_CONFIG";
