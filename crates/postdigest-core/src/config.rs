use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let database_url = require("DATABASE_URL")?;

    // A blank key is treated the same as an absent one.
    let openai_api_key = lookup("OPENAI_API_KEY")
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());

    let openai_model = or_default("POSTDIGEST_OPENAI_MODEL", "gpt-4o-mini");
    let openai_base_url = or_default("POSTDIGEST_OPENAI_BASE_URL", "https://api.openai.com/v1");
    let llm_timeout_secs = parse_u64("POSTDIGEST_LLM_TIMEOUT_SECS", "120")?;

    let accounts_dir = PathBuf::from(or_default("POSTDIGEST_ACCOUNTS_DIR", "./data"));
    let reports_dir = PathBuf::from(or_default("POSTDIGEST_REPORTS_DIR", "./data/reports"));

    let posts_table = or_default("POSTDIGEST_POSTS_TABLE", "posts");
    if !is_valid_table_name(&posts_table) {
        return Err(ConfigError::InvalidEnvVar {
            var: "POSTDIGEST_POSTS_TABLE".to_string(),
            reason: format!("'{posts_table}' is not a plain SQL identifier"),
        });
    }

    let log_level = or_default("POSTDIGEST_LOG_LEVEL", "info");

    let db_max_connections = parse_u32("POSTDIGEST_DB_MAX_CONNECTIONS", "5")?;
    let db_min_connections = parse_u32("POSTDIGEST_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("POSTDIGEST_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    Ok(AppConfig {
        database_url,
        openai_api_key,
        openai_model,
        openai_base_url,
        llm_timeout_secs,
        accounts_dir,
        reports_dir,
        posts_table,
        log_level,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
    })
}

/// Accept `name` or `schema.name`, each part matching `[A-Za-z_][A-Za-z0-9_]*`.
///
/// The table name is interpolated into SQL, so nothing else gets through.
pub(crate) fn is_valid_table_name(name: &str) -> bool {
    let parts: Vec<&str> = name.split('.').collect();
    if parts.len() > 2 {
        return false;
    }
    parts.iter().all(|part| {
        let mut chars = part.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            _ => false,
        }
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
