//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

const APP_DIR: &str = "snapstudy";
const PROJECT_FILES: [&str; 2] = ["snapstudy.toml", ".snapstudy.toml"];
const ENV_PREFIX: &str = "SNAPSTUDY_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `SNAPSTUDY_*` environment variables (`__` separates sections,
    ///    e.g. `SNAPSTUDY_ORCHESTRATION__FANOUT_TIMEOUT_SECS=90`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./snapstudy.toml` or `./.snapstudy.toml`
    /// 4. Global: `~/.config/snapstudy/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(Box::new)
    }

    /// Merge a TOML string over the defaults (no files, no environment)
    pub fn load_from_str(toml: &str) -> Result<FileConfig, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Toml::string(toml))
            .extract()
            .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");
        println!("  [     ] Env:     {}*", ENV_PREFIX);

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:<5}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./snapstudy.toml or ./.snapstudy.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.orchestration.fanout_timeout_secs, 120);
        assert_eq!(config.orchestration.synthesizer, "groq");
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("snapstudy"));
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[orchestration]\nchat_timeout_secs = 15\n\n[providers.openai]\nenabled = false"
        )
        .unwrap();

        let config = ConfigLoader::load(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(config.orchestration.chat_timeout_secs, 15);
        assert_eq!(config.orchestration.fanout_timeout_secs, 120);
        assert!(!config.providers.openai.enabled);
        assert_eq!(config.providers.openai.model, "gpt-4o-mini");
    }

    #[test]
    fn test_load_from_str_rejects_wrong_types() {
        let err = ConfigLoader::load_from_str("[orchestration]\nfanout_timeout_secs = \"soon\"");
        assert!(err.is_err());
    }
}
