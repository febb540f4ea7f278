// Configuration file handling

use crate::state::story::{StoryEntry, StoryMap};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub progress: ProgressConfig,

    /// Ordered pattern → label overrides for the story table
    #[serde(default)]
    pub stories: Vec<StoryEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Directory the spreadsheet report is written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Maximum characters kept from a failure diagnostic
    #[serde(default = "default_max_error_len")]
    pub max_error_len: usize,

    /// Report format
    #[serde(default)]
    pub log_format: Option<String>,

    /// Output file for reports
    #[serde(default)]
    pub log_output: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            max_error_len: default_max_error_len(),
            log_format: None,
            log_output: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressConfig {
    /// Progress indicator mode
    #[serde(default = "default_progress")]
    pub mode: String,

    /// Enable colored output
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            mode: default_progress(),
            color: default_color(),
        }
    }
}

// Default values
pub const ENV_REPORTIFY_OUTPUT_DIR: &str = "REPORTIFY_OUTPUT_DIR";

pub fn default_output_dir() -> String {
    String::from("reports")
}

pub fn default_max_error_len() -> usize {
    200
}

fn default_progress() -> String {
    String::from("auto")
}

fn default_color() -> bool {
    true
}

impl Config {
    /// Load configuration from default locations
    pub fn load() -> Option<Self> {
        // Check locations in order:
        // 1. .reportifyrc (current directory)
        // 2. ~/.reportifyrc (home directory)
        // 3. .reportifyrc.toml (current directory)
        // 4. ~/.reportifyrc.toml (home directory)

        let cwd = std::env::current_dir().ok()?;
        let home = dirs::home_dir()?;

        let paths = [
            cwd.join(".reportifyrc"),
            home.join(".reportifyrc"),
            cwd.join(".reportifyrc.toml"),
            home.join(".reportifyrc.toml"),
        ];

        for path in &paths {
            if path.exists() {
                return Self::load_from_file(path);
            }
        }

        None
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Option<Self> {
        toml::from_str(content).ok()
    }

    /// Generate default configuration as TOML
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_else(|_| String::new())
    }

    /// Story table with config overrides applied
    pub fn story_map(&self) -> StoryMap {
        StoryMap::new(self.stories.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::story::UNKNOWN_STORY;

    #[test]
    fn test_parse_config() {
        let toml = r#"
[general]
output_dir = "artifacts/reports"
max_error_len = 120

[progress]
mode = "bar"
color = false

[[stories]]
pattern = "test_login"
label = "HU-02: Inicio de sesión"
"#;

        let config = Config::parse(toml).expect("Failed to parse config");
        assert_eq!(config.general.output_dir, "artifacts/reports");
        assert_eq!(config.general.max_error_len, 120);
        assert_eq!(config.progress.mode, "bar");
        assert!(!config.progress.color);
        assert_eq!(config.stories.len(), 1);
        assert_eq!(config.stories[0].pattern, "test_login");
    }

    #[test]
    fn test_story_map_overrides() {
        let config = Config::parse(
            r#"
[[stories]]
pattern = "smoke_"
label = "Smoke"
"#,
        )
        .expect("Failed to parse config");

        let stories = config.story_map();
        assert_eq!(stories.resolve("tests/smoke_navbar.py"), "Smoke");
        assert_eq!(stories.resolve("tests/test_02_login.py"), UNKNOWN_STORY);
    }

    #[test]
    fn test_empty_config_keeps_defaults() {
        let config = Config::parse("").expect("Failed to parse config");
        assert_eq!(config.general.output_dir, "reports");
        assert_eq!(config.general.max_error_len, 200);
        assert!(config.stories.is_empty());
        assert_eq!(
            config.story_map().resolve("test_07_logout.py"),
            "HU-07: Logout"
        );
    }
}
