use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use url::Url;

const APP_DIR: &str = "zephyr";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_ENDPOINT_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_API_KEY_ENV: &str = "SENDGRID_API_KEY";
pub const DEFAULT_API_BASE_URL: &str = "https://api.sendgrid.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: Option<PathBuf>,
    pub notify: NotifyConfig,
    pub email: EmailConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyConfig {
    /// Where the form posts notification requests.
    pub endpoint_url: Url,
    /// Where `zephyr serve` listens.
    pub bind: SocketAddr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailConfig {
    pub backend: EmailBackend,
    pub api_key_env: String,
    pub api_base_url: Url,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailBackend {
    Sendgrid,
    Stdout,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            notify: NotifyConfig {
                endpoint_url: parse_default_url(DEFAULT_ENDPOINT_URL),
                bind: DEFAULT_BIND
                    .parse()
                    .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 3000))),
            },
            email: EmailConfig {
                backend: EmailBackend::Sendgrid,
                api_key_env: DEFAULT_API_KEY_ENV.to_string(),
                api_base_url: parse_default_url(DEFAULT_API_BASE_URL),
            },
        }
    }
}

fn parse_default_url(raw: &str) -> Url {
    Url::parse(raw).unwrap_or_else(|_| unreachable!("default url {raw} is valid"))
}

impl EmailConfig {
    /// Reads the provider secret from the environment variable named by
    /// `api_key_env`.
    pub fn api_key(&self) -> Result<String> {
        let value = env::var(&self.api_key_env)
            .map_err(|_| ConfigError::MissingApiKey(self.api_key_env.clone()))?;
        let value = value.trim();
        if value.is_empty() {
            return Err(ConfigError::MissingApiKey(self.api_key_env.clone()));
        }
        Ok(value.to_string())
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
    #[error("invalid {field} url: {value}")]
    InvalidUrl { field: &'static str, value: String },
    #[error("invalid notify.bind address: {0}")]
    InvalidBind(String),
    #[error("invalid email.api_key_env value")]
    InvalidApiKeyEnv,
    #[error("email provider api key not set (env var {0})")]
    MissingApiKey(String),
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
    db_path: Option<PathBuf>,
    notify: Option<NotifyFile>,
    email: Option<EmailFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct NotifyFile {
    endpoint_url: Option<String>,
    bind: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct EmailFile {
    backend: Option<EmailBackend>,
    api_key_env: Option<String>,
    api_base_url: Option<String>,
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

    if let Some(db_path) = parsed.db_path {
        if db_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidConfigPath(db_path));
        }
        config.db_path = Some(db_path);
    }

    if let Some(notify) = parsed.notify {
        if let Some(raw) = notify.endpoint_url {
            config.notify.endpoint_url = parse_http_url("notify.endpoint_url", &raw)?;
        }
        if let Some(raw) = notify.bind {
            config.notify.bind = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidBind(raw.clone()))?;
        }
    }

    if let Some(email) = parsed.email {
        if let Some(backend) = email.backend {
            config.email.backend = backend;
        }
        if let Some(name) = email.api_key_env {
            let name = name.trim();
            if name.is_empty() || name.contains('=') {
                return Err(ConfigError::InvalidApiKeyEnv);
            }
            config.email.api_key_env = name.to_string();
        }
        if let Some(raw) = email.api_base_url {
            config.email.api_base_url = parse_http_url("email.api_base_url", &raw)?;
        }
    }

    Ok(config)
}

fn parse_http_url(field: &'static str, raw: &str) -> Result<Url> {
    let invalid = || ConfigError::InvalidUrl {
        field,
        value: raw.to_string(),
    };
    let url = Url::parse(raw.trim()).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid());
    }
    Ok(url)
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

#[cfg(test)]
mod tests {
    use super::{
        load_at_path, merge_config, AppConfig, ConfigError, ConfigFile, EmailBackend, EmailFile,
        NotifyFile,
    };
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn restrict_permissions(path: &Path) {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path).expect("metadata").permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms).expect("chmod");
        }
    }

    #[test]
    fn defaults_point_at_local_endpoint_and_sendgrid() {
        let config = AppConfig::default();
        assert_eq!(config.notify.endpoint_url.as_str(), "http://127.0.0.1:3000/");
        assert_eq!(config.notify.bind.port(), 3000);
        assert_eq!(config.email.backend, EmailBackend::Sendgrid);
        assert_eq!(config.email.api_key_env, "SENDGRID_API_KEY");
        assert!(config.db_path.is_none());
    }

    #[test]
    fn merge_config_applies_values() {
        let parsed = ConfigFile {
            db_path: Some("/tmp/zephyr.sqlite3".into()),
            notify: Some(NotifyFile {
                endpoint_url: Some("https://signup.example.com".to_string()),
                bind: Some("0.0.0.0:8080".to_string()),
            }),
            email: Some(EmailFile {
                backend: Some(EmailBackend::Stdout),
                api_key_env: Some("ZEPHYR_MAIL_KEY".to_string()),
                api_base_url: Some("http://127.0.0.1:9999".to_string()),
            }),
        };
        let merged = merge_config(parsed).expect("merge");
        assert_eq!(
            merged.db_path.as_deref(),
            Some(Path::new("/tmp/zephyr.sqlite3"))
        );
        assert_eq!(merged.notify.endpoint_url.host_str(), Some("signup.example.com"));
        assert_eq!(merged.notify.bind.port(), 8080);
        assert_eq!(merged.email.backend, EmailBackend::Stdout);
        assert_eq!(merged.email.api_key_env, "ZEPHYR_MAIL_KEY");
        assert_eq!(merged.email.api_base_url.port(), Some(9999));
    }

    #[test]
    fn merge_config_rejects_non_http_endpoint() {
        let parsed = ConfigFile {
            notify: Some(NotifyFile {
                endpoint_url: Some("ftp://example.com".to_string()),
                bind: None,
            }),
            ..Default::default()
        };
        let err = merge_config(parsed).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn merge_config_rejects_bad_bind_and_env_name() {
        let parsed = ConfigFile {
            notify: Some(NotifyFile {
                endpoint_url: None,
                bind: Some("localhost".to_string()),
            }),
            ..Default::default()
        };
        assert!(matches!(
            merge_config(parsed).unwrap_err(),
            ConfigError::InvalidBind(_)
        ));

        let parsed = ConfigFile {
            email: Some(EmailFile {
                api_key_env: Some("  ".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(matches!(
            merge_config(parsed).unwrap_err(),
            ConfigError::InvalidApiKeyEnv
        ));
    }

    #[test]
    fn api_key_is_read_from_named_env_var() {
        let mut config = AppConfig::default().email;
        config.api_key_env = "ZEPHYR_TEST_API_KEY_SET".to_string();
        std::env::set_var("ZEPHYR_TEST_API_KEY_SET", " SG.secret ");
        assert_eq!(config.api_key().expect("api key"), "SG.secret");
        std::env::remove_var("ZEPHYR_TEST_API_KEY_SET");
    }

    #[test]
    fn api_key_missing_or_blank_is_an_error() {
        let mut config = AppConfig::default().email;
        config.api_key_env = "ZEPHYR_TEST_API_KEY_MISSING".to_string();
        std::env::remove_var("ZEPHYR_TEST_API_KEY_MISSING");
        assert!(matches!(
            config.api_key().unwrap_err(),
            ConfigError::MissingApiKey(_)
        ));

        config.api_key_env = "ZEPHYR_TEST_API_KEY_BLANK".to_string();
        std::env::set_var("ZEPHYR_TEST_API_KEY_BLANK", "   ");
        assert!(config.api_key().is_err());
        std::env::remove_var("ZEPHYR_TEST_API_KEY_BLANK");
    }

    #[test]
    fn load_at_path_requires_file_when_requested() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("config.toml");
        let err = load_at_path(&missing, true).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
        assert!(load_at_path(&missing, false).expect("optional").is_none());
    }

    #[test]
    fn load_at_path_parses_toml() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "[notify]\nendpoint_url = \"http://10.0.0.5:3000\"\n[email]\nbackend = \"stdout\"\n",
        )
        .expect("write config");
        restrict_permissions(&path);

        let config = load_at_path(&path, true).expect("load").expect("config");
        assert_eq!(config.notify.endpoint_url.host_str(), Some("10.0.0.5"));
        assert_eq!(config.email.backend, EmailBackend::Stdout);
    }

    #[test]
    fn load_at_path_rejects_unknown_keys() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "sender = \"someone@example.com\"\n").expect("write config");
        restrict_permissions(&path);

        let err = load_at_path(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn load_at_path_rejects_world_readable_file() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "").expect("write config");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).expect("chmod");

        let err = load_at_path(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::InsecurePermissions(_)));
    }
}
