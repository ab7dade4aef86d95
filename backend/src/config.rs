use clap::Parser;
use std::path::PathBuf;

/// Academy admin service.
///
/// Every option can also be given through the environment.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Address to bind the HTTP server to
    #[arg(long, env = "ACADEMY_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind the HTTP server to
    #[arg(long, env = "ACADEMY_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Path of the SQLite database file, created if missing
    #[arg(long, env = "ACADEMY_DATABASE", default_value = "academy.sqlite")]
    pub database: PathBuf,

    /// Lifetime of an admin session
    #[arg(long, env = "ACADEMY_SESSION_TTL_HOURS", default_value_t = 24)]
    pub session_ttl_hours: i64,

    /// Email of an administrator to provision at startup
    #[arg(long, env = "ACADEMY_ADMIN_EMAIL", requires = "admin_password")]
    pub admin_email: Option<String>,

    /// Password of the administrator provisioned at startup
    #[arg(long, env = "ACADEMY_ADMIN_PASSWORD", hide_env_values = true)]
    pub admin_password: Option<String>,

    /// Maximum accepted JSON body, in bytes
    #[arg(long, env = "ACADEMY_JSON_LIMIT", default_value_t = 1024 * 1024)]
    pub json_limit: usize,

    /// Maximum accepted lead import file, in bytes
    #[arg(long, env = "ACADEMY_UPLOAD_LIMIT", default_value_t = 10 * 1024 * 1024)]
    pub upload_limit: usize,
}

impl Config {
    pub fn bind_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// Settings the request handlers need at runtime.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub session_ttl: chrono::Duration,
}

impl From<&Config> for AuthSettings {
    fn from(config: &Config) -> Self {
        AuthSettings {
            session_ttl: chrono::Duration::hours(config.session_ttl_hours),
        }
    }
}

/// Limits applied to multipart uploads.
#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub max_bytes: usize,
}

impl From<&Config> for UploadSettings {
    fn from(config: &Config) -> Self {
        UploadSettings {
            max_bytes: config.upload_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_arguments() {
        let config = Config::try_parse_from(["academy-backend"]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.session_ttl_hours, 24);
        assert_eq!(config.bind_url(), "http://127.0.0.1:8080");
        assert_eq!(UploadSettings::from(&config).max_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn admin_email_needs_a_password() {
        let result =
            Config::try_parse_from(["academy-backend", "--admin-email", "root@example.com"]);
        assert!(result.is_err());
    }

    #[test]
    fn ttl_converts_to_duration() {
        let config =
            Config::try_parse_from(["academy-backend", "--session-ttl-hours", "2"]).unwrap();
        let settings = AuthSettings::from(&config);
        assert_eq!(settings.session_ttl, chrono::Duration::hours(2));
    }
}
