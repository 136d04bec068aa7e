use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub sheet: SheetConfig,
    #[serde(default)]
    pub frontend: FrontendConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// The tabular store: one named sheet, stored as `<data_dir>/<name>.csv`.
#[derive(Debug, Deserialize, Clone)]
pub struct SheetConfig {
    pub data_dir: String,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FrontendConfig {
    /// Directory with the built frontend, served as the fallback route.
    #[serde(default = "default_dist")]
    pub dist: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            dist: default_dist(),
        }
    }
}

fn default_dist() -> String {
    "dist".to_string()
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000

[sheet]
data_dir = "target/data"
name = "Inventario"

[frontend]
dist = "dist"
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    // Try to find config.toml next to the executable
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    // Fall back to default config
    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Get the sheet data directory from configuration
/// Resolves relative paths relative to the executable directory
pub fn resolve_sheet_dir(config: &Config) -> anyhow::Result<PathBuf> {
    let dir_str = &config.sheet.data_dir;
    let dir = Path::new(dir_str);

    // If absolute path, use as is
    if dir.is_absolute() {
        return Ok(dir.to_path_buf());
    }

    // If relative path, resolve it relative to the executable directory
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return Ok(exe_dir.join(dir));
        }
    }

    // Fallback: use relative to current directory
    Ok(PathBuf::from(dir_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<Config, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.sheet.name, "Inventario");
        assert_eq!(config.frontend.dist, "dist");
    }

    #[test]
    fn test_frontend_section_is_optional() {
        let config: Config = toml::from_str(
            r#"
[server]
host = "127.0.0.1"
port = 8080

[sheet]
data_dir = "/var/data"
name = "Stock"
"#,
        )
        .unwrap();
        assert_eq!(config.frontend.dist, "dist");
    }

    #[test]
    fn test_absolute_sheet_dir_passes_through() {
        let config: Config = toml::from_str(
            r#"
[server]
host = "127.0.0.1"
port = 8080

[sheet]
data_dir = "/var/data"
name = "Stock"
"#,
        )
        .unwrap();
        let dir = resolve_sheet_dir(&config).unwrap();
        assert_eq!(dir, PathBuf::from("/var/data"));
    }
}
