use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use dupecheck_core::{MatchRules, MergeOptions};
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "dupecheck";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_PAGE_SIZE: usize = 200;
pub const MAX_EMAIL_DISTANCE: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub matching: MatchRules,
    pub merge: MergeOptions,
    pub scan: ScanConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    pub page_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            matching: MatchRules::default(),
            merge: MergeOptions::default(),
            scan: ScanConfig {
                page_size: DEFAULT_PAGE_SIZE,
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid matching.{field} value: {value} (expected 1-100)")]
    InvalidThreshold { field: &'static str, value: i64 },
    #[error("invalid matching.email_max_distance value: {0} (expected 0-5)")]
    InvalidEmailDistance(i64),
    #[error("matching must enable at least one of use_email, use_phone, use_name")]
    NoMatchFields,
    #[error("invalid scan.page_size value: {0}")]
    InvalidPageSize(i64),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    matching: Option<MatchingFile>,
    merge: Option<MergeFile>,
    scan: Option<ScanFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct MatchingFile {
    use_email: Option<bool>,
    use_phone: Option<bool>,
    use_name: Option<bool>,
    email_max_distance: Option<i64>,
    phone_threshold: Option<i64>,
    name_threshold: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct MergeFile {
    keep_tags: Option<bool>,
    keep_notes: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScanFile {
    page_size: Option<i64>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(matching) = parsed.matching {
        let rules = &mut config.matching;
        if let Some(enabled) = matching.use_email {
            rules.use_email = enabled;
        }
        if let Some(enabled) = matching.use_phone {
            rules.use_phone = enabled;
        }
        if let Some(enabled) = matching.use_name {
            rules.use_name = enabled;
        }
        if let Some(distance) = matching.email_max_distance {
            rules.email_max_distance = usize::try_from(distance)
                .ok()
                .filter(|value| *value <= MAX_EMAIL_DISTANCE)
                .ok_or(ConfigError::InvalidEmailDistance(distance))?;
        }
        if let Some(percent) = matching.phone_threshold {
            rules.phone_min_similarity = threshold("phone_threshold", percent)?;
        }
        if let Some(percent) = matching.name_threshold {
            rules.name_min_similarity = threshold("name_threshold", percent)?;
        }
        if !rules.use_email && !rules.use_phone && !rules.use_name {
            return Err(ConfigError::NoMatchFields);
        }
    }

    if let Some(merge) = parsed.merge {
        if let Some(keep) = merge.keep_tags {
            config.merge.keep_tags = keep;
        }
        if let Some(keep) = merge.keep_notes {
            config.merge.keep_notes = keep;
        }
    }

    if let Some(scan) = parsed.scan {
        if let Some(size) = scan.page_size {
            config.scan.page_size = usize::try_from(size)
                .ok()
                .filter(|value| *value > 0)
                .ok_or(ConfigError::InvalidPageSize(size))?;
        }
    }

    Ok(config)
}

// Thresholds are written as whole percentages and stored as fractions.
fn threshold(field: &'static str, percent: i64) -> Result<f64> {
    if !(1..=100).contains(&percent) {
        return Err(ConfigError::InvalidThreshold {
            field,
            value: percent,
        });
    }
    Ok(percent as f64 / 100.0)
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
