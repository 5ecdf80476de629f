//! Settings for htmlscript and the config file loader.
//!
//! Settings come from a `.htmlscriptrc.{json,toml,yaml,yml}` or
//! `htmlscript.toml` file found by walking up from a start directory, or are
//! built directly in code. Keys are kebab-case.

mod error;
mod indent;
mod loader;
mod settings;

pub use error::{ConfigError, Result};
pub use indent::IndentDescriptor;
pub use loader::{find_config, load_config, load_config_from_str, settings_from_value};
pub use settings::{Settings, KNOWN_KEYS};
