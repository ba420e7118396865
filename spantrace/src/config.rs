// Copyright (C) 2025 Category Labs, Inc.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::Result;

pub const DEFAULT_OUTPUT_PATH: &str = "sessionResults.json";
pub const DEFAULT_CATEGORY: &str = "function";

/// What `start_session` does when a session is already running.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPolicy {
    /// End and flush the running session, then start the new one.
    #[default]
    Replace,
    /// Refuse with [`ProfilerError::SessionAlreadyActive`](crate::ProfilerError::SessionAlreadyActive).
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilerConfig {
    /// Output file used by `start_default_session`.
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Category given to timers created without one.
    #[serde(default = "default_category")]
    pub default_category: String,

    /// Value of the `pid` field on every emitted event.
    #[serde(default)]
    pub pid: u32,

    #[serde(default)]
    pub session_policy: SessionPolicy,
}

fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_PATH)
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            default_category: default_category(),
            pid: 0,
            session_policy: SessionPolicy::default(),
        }
    }
}

impl ProfilerConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ProfilerConfig = toml::from_str(content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;
    use tempfile::TempDir;

    #[rstest]
    fn test_empty_toml_uses_defaults() {
        let config = ProfilerConfig::from_toml_str("").unwrap();
        assert_eq!(config, ProfilerConfig::default());
        assert_eq!(config.output_path, PathBuf::from("sessionResults.json"));
        assert_eq!(config.default_category, "function");
        assert_eq!(config.pid, 0);
        assert_eq!(config.session_policy, SessionPolicy::Replace);
    }

    #[rstest]
    fn test_full_toml() {
        let config = ProfilerConfig::from_toml_str(
            r#"
output_path = "traces/run.json"
default_category = "render"
pid = 7
session_policy = "strict"
"#,
        )
        .unwrap();
        assert_eq!(config.output_path, PathBuf::from("traces/run.json"));
        assert_eq!(config.default_category, "render");
        assert_eq!(config.pid, 7);
        assert_eq!(config.session_policy, SessionPolicy::Strict);
    }

    #[rstest]
    fn test_unknown_policy_is_rejected() {
        let err = ProfilerConfig::from_toml_str(r#"session_policy = "queue""#).unwrap_err();
        assert!(matches!(err, crate::ProfilerError::Config(_)));
    }

    #[rstest]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("spantrace.toml");
        std::fs::write(&path, "pid = 3\n").unwrap();

        let config = ProfilerConfig::load(&path).unwrap();
        assert_eq!(config.pid, 3);
        assert_eq!(config.default_category, "function");
    }

    #[rstest]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = ProfilerConfig::load(temp_dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, crate::ProfilerError::Io(_)));
    }
}
