use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::constants::{endpoints, env, limits, models};
use crate::error::CrewError;
use crate::llm::{LlmClient, OpenAIClient};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub llm: LlmSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub engine: EngineSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub model: String,
    pub api_key_env: String,
    pub base_url: Option<String>,
    pub temperature: f32,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: models::DEFAULT_OPENAI_MODEL.to_string(),
            api_key_env: env::OPENAI_API_KEY.to_string(),
            base_url: None,
            temperature: models::PLANNER_TEMPERATURE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSettings {
    pub api_key_env: String,
    pub base_url: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            api_key_env: env::EXA_API_KEY.to_string(),
            base_url: endpoints::EXA_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Upper bound on model turns per task in the built-in engine.
    pub max_iterations: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_iterations: limits::AGENT_MAX_ITERATIONS,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            llm: LlmSettings::default(),
            search: SearchSettings::default(),
            engine: EngineSettings::default(),
        }
    }
}

impl Settings {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("crewforge")
            .join("config.toml")
    }

    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Read settings from `path`, falling back to defaults when the file is
    /// missing or malformed.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => tracing::warn!("Ignoring malformed config {}: {}", path.display(), e),
                },
                Err(e) => tracing::warn!("Failed to read config {}: {}", path.display(), e),
            }
        }
        Self::default()
    }

    pub fn save(&self) -> Result<(), CrewError> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), CrewError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| CrewError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Model-provider key from the environment variable named in settings.
    pub fn api_key(&self) -> Option<String> {
        read_env(&self.llm.api_key_env)
    }

    /// Search-provider key from the environment variable named in settings.
    pub fn search_api_key(&self) -> Option<String> {
        read_env(&self.search.api_key_env)
    }

    /// Report credentials that are absent from the environment. Missing keys
    /// are not fatal here; the capability that needs one fails when invoked.
    pub fn check_credentials(&self) -> Vec<String> {
        let mut missing = Vec::new();
        for var in [&self.llm.api_key_env, &self.search.api_key_env] {
            if read_env(var).is_none() {
                tracing::warn!("{} environment variable not set", var);
                missing.push(var.clone());
            }
        }
        missing
    }

    /// Build the chat client described by the `[llm]` section.
    pub fn build_llm_client(&self) -> Arc<dyn LlmClient> {
        let mut client = OpenAIClient::new(self.api_key())
            .with_model(self.llm.model.clone())
            .with_temperature(self.llm.temperature)
            .with_api_key_env(self.llm.api_key_env.clone());
        if let Some(ref url) = self.llm.base_url {
            client = client.with_base_url(url.clone());
        }
        Arc::new(client)
    }
}

fn read_env(var: &str) -> Option<String> {
    if var.is_empty() {
        return None;
    }
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_openai_and_exa() {
        let settings = Settings::default();
        assert_eq!(settings.llm.model, "gpt-4o");
        assert_eq!(settings.llm.api_key_env, "OPENAI_API_KEY");
        assert_eq!(settings.search.api_key_env, "EXA_API_KEY");
        assert_eq!(settings.llm.temperature, 0.0);
    }

    #[test]
    fn test_toml_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.llm.model = "gpt-4o-mini".to_string();
        settings.llm.base_url = Some("http://localhost:8080".to_string());
        settings.engine.max_iterations = 3;
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path);
        assert_eq!(loaded.llm.model, "gpt-4o-mini");
        assert_eq!(loaded.llm.base_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(loaded.engine.max_iterations, 3);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[llm]\nmodel = \"gpt-4o\"\napi_key_env = \"MY_KEY\"\ntemperature = 0.2\n",
        )
        .unwrap();

        let loaded = Settings::load_from(&path);
        assert_eq!(loaded.llm.api_key_env, "MY_KEY");
        assert_eq!(loaded.search.base_url, "https://api.exa.ai");
        assert_eq!(loaded.engine.max_iterations, 10);
    }

    #[test]
    fn test_partial_llm_section_keeps_other_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[llm]\nmodel = \"gpt-4o-mini\"\n").unwrap();

        let loaded = Settings::load_from(&path);
        assert_eq!(loaded.llm.model, "gpt-4o-mini");
        assert_eq!(loaded.llm.api_key_env, "OPENAI_API_KEY");
        assert_eq!(loaded.llm.temperature, 0.0);
        assert!(loaded.llm.base_url.is_none());
    }

    #[test]
    fn test_empty_file_is_all_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();

        let loaded = Settings::load_from(&path);
        assert_eq!(loaded.llm.model, "gpt-4o");
        assert_eq!(loaded.engine.max_iterations, 10);
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is = = not toml").unwrap();

        let loaded = Settings::load_from(&path);
        assert_eq!(loaded.llm.model, "gpt-4o");
    }

    #[test]
    fn test_unset_env_var_is_reported_missing() {
        let mut settings = Settings::default();
        settings.llm.api_key_env = "CREWFORGE_TEST_UNSET_MODEL_KEY".to_string();
        settings.search.api_key_env = "CREWFORGE_TEST_UNSET_SEARCH_KEY".to_string();

        assert!(settings.api_key().is_none());
        let missing = settings.check_credentials();
        assert_eq!(
            missing,
            vec![
                "CREWFORGE_TEST_UNSET_MODEL_KEY".to_string(),
                "CREWFORGE_TEST_UNSET_SEARCH_KEY".to_string()
            ]
        );
    }
}
