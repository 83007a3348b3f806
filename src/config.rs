use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::DEFAULT_MESSAGE_TEMPLATE;
use crate::error::{GitBumpError, Result};

/// Name of the project-local configuration file
pub const CONFIG_FILE_NAME: &str = "gitbump.toml";

/// Represents the complete configuration for git-bump.
///
/// Contains the remote to fetch from and push to, the tag annotation template
/// and the optional tagger identity.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub remote: RemoteConfig,

    #[serde(default)]
    pub tag: TagConfig,

    #[serde(default)]
    pub tagger: Option<TaggerConfig>,
}

fn default_remote_name() -> String {
    "origin".to_string()
}

fn default_fetch() -> bool {
    true
}

fn default_message_template() -> String {
    DEFAULT_MESSAGE_TEMPLATE.to_string()
}

/// Remote used for fetching tags and pushing new ones.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RemoteConfig {
    #[serde(default = "default_remote_name")]
    pub name: String,

    /// Fetch tags from the remote before resolving the next version
    #[serde(default = "default_fetch")]
    pub fetch: bool,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        RemoteConfig {
            name: default_remote_name(),
            fetch: default_fetch(),
        }
    }
}

/// Annotated tag settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TagConfig {
    /// Annotation template; `{version}` is replaced with the tag name
    #[serde(default = "default_message_template")]
    pub message: String,
}

impl Default for TagConfig {
    fn default() -> Self {
        TagConfig {
            message: default_message_template(),
        }
    }
}

/// Identity recorded on annotated tags.
///
/// When absent the repository's own `user.name` / `user.email` are used.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TaggerConfig {
    pub name: String,
    pub email: String,
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitbump.toml` in current directory
/// 3. `.gitbump.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    if let Some(path) = config_path {
        return load_config_file(Path::new(path));
    }

    let local = Path::new(CONFIG_FILE_NAME);
    if local.exists() {
        return load_config_file(local);
    }

    if let Some(config_dir) = dirs::config_dir() {
        let global = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if global.exists() {
            return load_config_file(&global);
        }
    }

    Ok(Config::default())
}

fn load_config_file(path: &Path) -> Result<Config> {
    let config_str = fs::read_to_string(path).map_err(|e| {
        GitBumpError::config(format!("Cannot read '{}': {}", path.display(), e))
    })?;
    parse_config(&config_str).map_err(|e| match e {
        GitBumpError::Config(msg) => {
            GitBumpError::config(format!("Invalid '{}': {}", path.display(), msg))
        }
        other => other,
    })
}

/// Parse configuration from TOML text and validate it.
pub fn parse_config(config_str: &str) -> Result<Config> {
    let config: Config =
        toml::from_str(config_str).map_err(|e| GitBumpError::config(e.to_string()))?;

    if config.remote.name.trim().is_empty() {
        return Err(GitBumpError::config("remote.name must not be empty"));
    }

    if let Some(tagger) = &config.tagger {
        if tagger.name.trim().is_empty() || tagger.email.trim().is_empty() {
            return Err(GitBumpError::config(
                "tagger.name and tagger.email must both be set",
            ));
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.remote.name, "origin");
        assert!(config.remote.fetch);
        assert_eq!(config.tag.message, "Release {version}");
        assert!(config.tagger.is_none());
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        assert_eq!(parse_config("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let config = parse_config("[remote]\nfetch = false\n").unwrap();
        assert_eq!(config.remote.name, "origin");
        assert!(!config.remote.fetch);
        assert_eq!(config.tag.message, "Release {version}");
    }

    #[test]
    fn test_tagger_section() {
        let config = parse_config(
            r#"
[tagger]
name = "Release Bot"
email = "bot@example.com"
"#,
        )
        .unwrap();
        let tagger = config.tagger.unwrap();
        assert_eq!(tagger.name, "Release Bot");
        assert_eq!(tagger.email, "bot@example.com");
    }

    #[test]
    fn test_rejects_blank_remote() {
        let err = parse_config("[remote]\nname = \"  \"\n").unwrap_err();
        assert!(err.to_string().contains("remote.name"));
    }

    #[test]
    fn test_rejects_incomplete_tagger() {
        assert!(parse_config("[tagger]\nname = \"x\"\nemail = \"\"\n").is_err());
        assert!(parse_config("[tagger]\nname = \"x\"\n").is_err());
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = parse_config("[remote\nname = 1").unwrap_err();
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
