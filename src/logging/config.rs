use std::{env, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;
use znbt_error::{bail, StatusCode, ZnbtResult};

/// Формат вывода консольного слоя.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    #[default]
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(match self {
            Self::Pretty => "pretty",
            Self::Compact => "compact",
            Self::Json => "json",
        })
    }
}

/// Настройки логирования.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Директива фильтра: уровень (`info`) или полный список
    /// (`znbt=debug,warn`)
    pub level: String,
    pub format: LogFormat,
    pub with_ansi: bool,
    pub with_target: bool,
}

impl LoggingConfig {
    /// Переменная окружения, перекрывающая `level`.
    pub const ENV_VAR: &'static str = "ZNBT_LOG";

    pub fn with_level(
        mut self,
        level: impl Into<String>,
    ) -> Self {
        self.level = level.into();
        self
    }

    pub fn with_format(
        mut self,
        format: LogFormat,
    ) -> Self {
        self.format = format;
        self
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(level) = env::var(Self::ENV_VAR) {
            if !level.trim().is_empty() {
                self.level = level;
            }
        }
    }

    pub fn validate(&self) -> ZnbtResult<()> {
        if let Err(e) = EnvFilter::try_new(&self.level) {
            bail!(
                StatusCode::ConfigInvalid,
                "invalid log filter '{}': {}",
                self.level,
                e
            );
        }
        Ok(())
    }

    pub fn build_filter_directive(&self) -> String {
        self.level.trim().to_owned()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::default(),
            with_ansi: true,
            with_target: true,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
