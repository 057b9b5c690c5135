//! Configuration loading from files and environment variables.

use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};

use crate::error::{ServiceError, ServiceResult};

use super::static_config::StaticConfig;

/// Environment variable prefix, e.g. `WAIFU__SERVER__PORT=9000`
const ENV_PREFIX: &str = "WAIFU";

/// Load static configuration from an optional `config.*` file and env vars
pub fn load_static_config() -> ServiceResult<StaticConfig> {
    let builder = Config::builder()
        .add_source(File::with_name("config").required(false))
        .add_source(environment());

    build_static_config(builder)
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

fn build_static_config(builder: ConfigBuilder<DefaultState>) -> ServiceResult<StaticConfig> {
    let mut config: StaticConfig = builder
        .build()
        .map_err(|e| ServiceError::Config {
            message: format!("Failed to build config: {}", e),
        })?
        .try_deserialize()
        .map_err(|e| ServiceError::Config {
            message: format!("Failed to deserialize static config: {}", e),
        })?;

    config.mcp.path = normalize_mcp_path(&config.mcp.path)?;
    Ok(config)
}

/// The MCP router is nested under this path, which must be a literal,
/// non-root path starting with `/`. A trailing `/` is dropped.
fn normalize_mcp_path(path: &str) -> ServiceResult<String> {
    let trimmed = path.trim_end_matches('/');

    if !path.starts_with('/') || trimmed.is_empty() || trimmed.contains(['{', '}', '*']) {
        return Err(ServiceError::Config {
            message: format!(
                "Invalid mcp.path {:?}: expected a non-root path starting with '/'",
                path
            ),
        });
    }

    Ok(trimmed.to_string())
}
