use crate::adapters::{FileHolidaySource, HttpHolidaySource, DEFAULT_HOLIDAYS_URL};
use crate::core::{HolidaySource, DEFAULT_TIMEZONE};
use crate::utils::error::{Result, WorkingDaysError};
use crate::utils::validation::{self, Validate};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    pub calendar: CalendarConfig,
    pub holidays: HolidaysConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub timezone: String,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.name().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HolidaysConfig {
    pub source_url: String,
    /// Local JSON file; takes precedence over `source_url` when set.
    pub file: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for HolidaysConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_HOLIDAYS_URL.to_string(),
            file: None,
            timeout_seconds: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl ServiceConfig {
    /// 讀取並解析 TOML 配置檔
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(WorkingDaysError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| WorkingDaysError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Loads `path` when given, otherwise defaults, then applies environment
    /// overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// 替換環境變數 (例如 ${HOLIDAYS_TOKEN})
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::OnceLock;

        static PATTERN: OnceLock<Regex> = OnceLock::new();
        let re = PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static env pattern"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("HOST") {
            self.server.host = host;
        }
        if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
        if let Ok(url) = std::env::var("HOLIDAYS_URL") {
            self.holidays.source_url = url;
        }
        if let Ok(timezone) = std::env::var("BUSINESS_TIMEZONE") {
            self.calendar.timezone = timezone;
        }
    }

    pub fn timezone(&self) -> Result<Tz> {
        validation::validate_timezone("calendar.timezone", &self.calendar.timezone)
    }

    pub fn holidays_timeout(&self) -> Duration {
        Duration::from_secs(self.holidays.timeout_seconds)
    }

    /// The configured holiday source: the local file when set, else the URL.
    pub fn holiday_source(&self) -> Result<Box<dyn HolidaySource>> {
        match &self.holidays.file {
            Some(file) => Ok(Box::new(FileHolidaySource::new(file))),
            None => Ok(Box::new(HttpHolidaySource::new(
                self.holidays.source_url.clone(),
                self.holidays_timeout(),
            )?)),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("server.host", &self.server.host)?;
        validation::validate_range("server.port", self.server.port, 1, u16::MAX)?;
        self.timezone()?;

        match &self.holidays.file {
            Some(file) => validation::validate_non_empty_string("holidays.file", file)?,
            None => validation::validate_url("holidays.source_url", &self.holidays.source_url)?,
        }
        validation::validate_range(
            "holidays.timeout_seconds",
            self.holidays.timeout_seconds,
            1,
            300,
        )?;

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            other => Err(WorkingDaysError::InvalidConfigValueError {
                field: "logging.level".to_string(),
                value: other.to_string(),
                reason: "Valid levels: trace, debug, info, warn, error".to_string(),
            }),
        }
    }
}
