use crate::{ConfigError, Result, Settings, KNOWN_KEYS};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names to search for, in order of preference
const CONFIG_FILES: &[&str] = &[
    ".htmlscriptrc.json",
    ".htmlscriptrc.toml",
    ".htmlscriptrc.yaml",
    ".htmlscriptrc.yml",
    "htmlscript.toml",
];

/// Minimum similarity for an unknown key to get a suggestion
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Find a config file by walking up the directory tree from the given start directory.
/// Returns the path to the config file if found.
#[tracing::instrument(fields(start = %start_dir.display()))]
pub fn find_config(start_dir: &Path) -> Result<Option<PathBuf>> {
    let mut current_dir = start_dir.to_path_buf();
    let mut checked_dirs = 0;

    loop {
        tracing::trace!(dir = %current_dir.display(), "Checking directory for config files");
        for file_name in CONFIG_FILES {
            let config_path = current_dir.join(file_name);
            if config_path.is_file() {
                tracing::info!(path = %config_path.display(), checked_dirs, "Found config file");
                return Ok(Some(config_path));
            }
        }

        checked_dirs += 1;
        if !current_dir.pop() {
            tracing::debug!(checked_dirs, "No config file found");
            break;
        }
    }

    Ok(None)
}

/// Load settings from the specified path.
/// Automatically detects the format based on file extension.
#[tracing::instrument(fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Result<Settings> {
    tracing::debug!("Reading config file");
    let contents = fs::read_to_string(path)?;
    let settings = load_config_from_str(&contents, path)?;
    tracing::info!(
        indent = %settings.indent,
        xml_mode = ?settings.xml_mode,
        report_bad_indent = settings.report_bad_indent,
        "Config loaded successfully"
    );
    Ok(settings)
}

/// Load settings from a string.
/// The path is used for error messages and format detection.
#[tracing::instrument(skip(contents), fields(path = %path.display(), size = contents.len()))]
pub fn load_config_from_str(contents: &str, path: &Path) -> Result<Settings> {
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

    tracing::debug!(extension, "Detecting config format");

    let value = match extension {
        "json" => {
            tracing::trace!("Parsing as JSON");
            parse_json(contents, path)?
        }
        "toml" => {
            tracing::trace!("Parsing as TOML");
            parse_toml(contents, path)?
        }
        "yml" | "yaml" => {
            tracing::trace!("Parsing as YAML");
            parse_yaml(contents, path)?
        }
        _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    };

    settings_from_value(value, path)
}

/// Convert a parsed config document into [`Settings`], rejecting unknown keys.
pub fn settings_from_value(value: serde_json::Value, path: &Path) -> Result<Settings> {
    let map = match value {
        serde_json::Value::Null => return Ok(Settings::default()),
        serde_json::Value::Object(map) => map,
        other => {
            return Err(ConfigError::Invalid {
                path: path.to_path_buf(),
                message: format!("expected a table of settings, found {other}"),
            });
        }
    };

    if let Some(key) = map.keys().find(|key| !KNOWN_KEYS.contains(&key.as_str())) {
        let suggestion = suggest_key(key);
        tracing::debug!(key = %key, ?suggestion, "Unknown setting");
        return Err(ConfigError::UnknownSetting {
            key: key.clone(),
            suggestion,
        });
    }

    serde_json::from_value(serde_json::Value::Object(map)).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Closest known key to `key`, if any is close enough.
fn suggest_key(key: &str) -> Option<String> {
    let normalized = key.replace('_', "-").to_ascii_lowercase();
    KNOWN_KEYS
        .iter()
        .map(|known| (strsim::jaro_winkler(&normalized, known), *known))
        .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, known)| known.to_string())
}

/// Parse JSON configuration
fn parse_json(contents: &str, path: &Path) -> Result<serde_json::Value> {
    serde_json::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("JSON parse error: {e}"),
    })
}

/// Parse TOML configuration
fn parse_toml(contents: &str, path: &Path) -> Result<serde_json::Value> {
    toml::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("TOML parse error: {e}"),
    })
}

/// Parse YAML configuration
fn parse_yaml(contents: &str, path: &Path) -> Result<serde_json::Value> {
    if contents.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }
    serde_saphyr::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("YAML parse error: {e}"),
    })
}
