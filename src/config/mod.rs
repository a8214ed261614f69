use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub interview: InterviewConfig,
    pub gemini: GeminiConfig,
    pub execution: ExecutionConfig,
    pub seed_sample_questions: bool,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub frontend_url: String,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

/// Timers driving the interview hub
#[derive(Debug, Clone)]
pub struct InterviewConfig {
    pub sweep_interval: Duration,
    pub participant_max_age: Duration,
    pub stats_interval: Duration,
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Checked lazily: a missing key only fails generation calls
    pub api_key: Option<String>,
    pub model: String,
    pub api_url: String,
}

#[derive(Debug, Clone)]
pub struct ExecutionConfig {
    pub temp_dir: PathBuf,
    pub timeout: Duration,
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self {
            sweep_interval: Duration::from_secs(30 * 60),
            participant_max_age: Duration::from_secs(60 * 60),
            stats_interval: Duration::from_secs(5 * 60),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            api_url: DEFAULT_GEMINI_API_URL.to_string(),
        }
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            temp_dir: PathBuf::from("temp-code"),
            timeout: Duration::from_millis(5000),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let interview_defaults = InterviewConfig::default();
        let execution_defaults = ExecutionConfig::default();

        Self {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_var("PORT", 5000),
                frontend_url: env::var("FRONTEND_URL")
                    .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            },
            auth: AuthConfig {
                jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| {
                    tracing::warn!("JWT_SECRET not set, using development secret");
                    "dev-secret".to_string()
                }),
            },
            interview: InterviewConfig {
                sweep_interval: Duration::from_secs(parse_var(
                    "INTERVIEW_SWEEP_INTERVAL_SECS",
                    interview_defaults.sweep_interval.as_secs(),
                )),
                participant_max_age: Duration::from_secs(parse_var(
                    "INTERVIEW_MAX_AGE_SECS",
                    interview_defaults.participant_max_age.as_secs(),
                )),
                stats_interval: Duration::from_secs(parse_var(
                    "INTERVIEW_STATS_INTERVAL_SECS",
                    interview_defaults.stats_interval.as_secs(),
                )),
            },
            gemini: GeminiConfig {
                api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
                model: env::var("GEMINI_MODEL")
                    .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
                api_url: env::var("GEMINI_API_URL")
                    .unwrap_or_else(|_| DEFAULT_GEMINI_API_URL.to_string()),
            },
            execution: ExecutionConfig {
                temp_dir: env::var("CODE_TEMP_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(execution_defaults.temp_dir),
                timeout: Duration::from_millis(parse_var(
                    "CODE_TIMEOUT_MS",
                    execution_defaults.timeout.as_millis() as u64,
                )),
            },
            seed_sample_questions: parse_var("SEED_SAMPLE_QUESTIONS", false),
        }
    }

    pub fn bind_address(&self) -> ([u8; 4], u16) {
        let ip_addr = self.parse_host_to_ipv4();
        (ip_addr.octets(), self.server.port)
    }

    /// Origins allowed by CORS: the configured frontend plus local dev servers.
    /// A malformed frontend URL is skipped with a warning.
    pub fn allowed_origins(&self) -> Vec<String> {
        let mut origins = Vec::new();
        let frontend = self.server.frontend_url.trim().trim_end_matches('/');
        if is_origin(frontend) {
            origins.push(frontend.to_string());
        } else {
            tracing::warn!(frontend_url = %self.server.frontend_url, "FRONTEND_URL is not a valid origin, ignoring");
        }

        for dev in ["http://localhost:5173", "http://localhost:3000"] {
            if !origins.iter().any(|o| o == dev) {
                origins.push(dev.to_string());
            }
        }
        origins
    }

    fn parse_host_to_ipv4(&self) -> Ipv4Addr {
        if let Ok(addr) = self.server.host.parse::<IpAddr>() {
            match addr {
                IpAddr::V4(ipv4) => return ipv4,
                IpAddr::V6(_) => {
                    tracing::warn!(
                        host = %self.server.host,
                        "IPv6 address provided but only IPv4 supported, using 0.0.0.0"
                    );
                    return Ipv4Addr::new(0, 0, 0, 0);
                }
            }
        }

        match self.server.host.as_str() {
            "localhost" => Ipv4Addr::new(127, 0, 0, 1),
            "" | "0.0.0.0" => Ipv4Addr::new(0, 0, 0, 0),
            _ => {
                tracing::warn!(
                    host = %self.server.host,
                    "Unable to parse host as IPv4, using 0.0.0.0"
                );
                Ipv4Addr::new(0, 0, 0, 0)
            }
        }
    }
}

/// `scheme://host[:port]` with nothing after the authority
fn is_origin(value: &str) -> bool {
    match value.split_once("://") {
        Some((scheme, authority)) => {
            matches!(scheme, "http" | "https")
                && !authority.is_empty()
                && !authority.contains(['/', '?', '#', ' '])
        }
        None => false,
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(var = name, value = %raw, "Invalid value, using default");
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_host(host: &str, port: u16) -> Config {
        Config {
            server: ServerConfig {
                host: host.to_string(),
                port,
                frontend_url: "http://localhost:3000".to_string(),
            },
            auth: AuthConfig {
                jwt_secret: "test".to_string(),
            },
            interview: InterviewConfig::default(),
            gemini: GeminiConfig::default(),
            execution: ExecutionConfig::default(),
            seed_sample_questions: false,
        }
    }

    #[test]
    fn test_parse_localhost() {
        let config = config_with_host("localhost", 5000);
        assert_eq!(config.bind_address(), ([127, 0, 0, 1], 5000));
    }

    #[test]
    fn test_parse_ipv4_address() {
        let config = config_with_host("192.168.1.1", 3000);
        assert_eq!(config.bind_address(), ([192, 168, 1, 1], 3000));
    }

    #[test]
    fn test_parse_empty_host() {
        let config = config_with_host("", 5000);
        assert_eq!(config.bind_address(), ([0, 0, 0, 0], 5000));
    }

    #[test]
    fn test_parse_invalid_hostname_defaults_to_all() {
        let config = config_with_host("invalid-hostname", 9000);
        assert_eq!(config.bind_address(), ([0, 0, 0, 0], 9000));
    }

    #[test]
    fn test_allowed_origins_deduplicated() {
        let config = config_with_host("0.0.0.0", 5000);
        assert_eq!(
            config.allowed_origins(),
            vec!["http://localhost:3000".to_string(), "http://localhost:5173".to_string()]
        );

        let mut custom = config_with_host("0.0.0.0", 5000);
        custom.server.frontend_url = "https://prep.example.com".to_string();
        assert_eq!(custom.allowed_origins().len(), 3);
    }

    #[test]
    fn test_allowed_origins_skips_malformed_frontend() {
        let mut config = config_with_host("0.0.0.0", 5000);
        config.server.frontend_url = "https://prep.example.com/".to_string();
        assert_eq!(config.allowed_origins()[0], "https://prep.example.com");

        config.server.frontend_url = "prep.example.com".to_string();
        assert_eq!(
            config.allowed_origins(),
            vec!["http://localhost:5173".to_string(), "http://localhost:3000".to_string()]
        );
    }

    #[test]
    fn test_interview_defaults() {
        let interview = InterviewConfig::default();
        assert_eq!(interview.sweep_interval, Duration::from_secs(1800));
        assert_eq!(interview.participant_max_age, Duration::from_secs(3600));
        assert_eq!(interview.stats_interval, Duration::from_secs(300));
    }

    #[test]
    fn test_parse_var_falls_back_on_garbage() {
        std::env::set_var("INTERVIEW_TEST_PARSE_VAR", "not-a-number");
        assert_eq!(parse_var("INTERVIEW_TEST_PARSE_VAR", 42u64), 42);
        std::env::set_var("INTERVIEW_TEST_PARSE_VAR", " 7 ");
        assert_eq!(parse_var("INTERVIEW_TEST_PARSE_VAR", 42u64), 7);
        std::env::remove_var("INTERVIEW_TEST_PARSE_VAR");
    }
}
