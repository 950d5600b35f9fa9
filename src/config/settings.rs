use config::{Config, Environment};
use serde::{Deserialize, Serialize};
use znbt_error::{bail, GenericError, StatusCode, ZnbtResult};

use crate::codec::Charset;

/// Настройки бинарного кодека.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Кодировка имён и строк
    pub charset: Charset,
    /// Уровень gzip-сжатия при записи, 0–9
    pub compression_level: u32,
    /// Максимальная вложенность списков и составных тегов
    pub max_depth: usize,
}

impl CodecConfig {
    pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;
    pub const DEFAULT_MAX_DEPTH: usize = 512;
    pub const MAX_COMPRESSION_LEVEL: u32 = 9;

    /// Загружает настройки из переменных окружения с префиксом `ZNBT_`
    /// (`ZNBT_CHARSET`, `ZNBT_COMPRESSION_LEVEL`, `ZNBT_MAX_DEPTH`).
    pub fn load() -> ZnbtResult<Self> {
        Self::load_from(Environment::with_prefix("ZNBT").try_parsing(true))
    }

    fn load_from(env: Environment) -> ZnbtResult<Self> {
        let defaults = Self::default();
        let cfg = Config::builder()
            // Значения по умолчанию
            .set_default("charset", "utf8")
            .and_then(|b| b.set_default("compression_level", defaults.compression_level))
            .and_then(|b| b.set_default("max_depth", defaults.max_depth as u64))
            .map_err(config_error)?
            .add_source(env)
            .build()
            .map_err(config_error)?;

        let settings: Self = cfg.try_deserialize().map_err(config_error)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> ZnbtResult<()> {
        if self.compression_level > Self::MAX_COMPRESSION_LEVEL {
            bail!(
                StatusCode::ConfigInvalid,
                "compression_level must be in 0..={}, got {}",
                Self::MAX_COMPRESSION_LEVEL,
                self.compression_level
            );
        }
        if self.max_depth == 0 {
            bail!(StatusCode::ConfigInvalid, "max_depth must be at least 1");
        }
        Ok(())
    }

    pub fn with_charset(
        mut self,
        charset: Charset,
    ) -> Self {
        self.charset = charset;
        self
    }

    pub fn with_max_depth(
        mut self,
        max_depth: usize,
    ) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_compression_level(
        mut self,
        level: u32,
    ) -> Self {
        self.compression_level = level;
        self
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            charset: Charset::Utf8,
            compression_level: Self::DEFAULT_COMPRESSION_LEVEL,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

fn config_error(err: config::ConfigError) -> znbt_error::StackError {
    GenericError::new(StatusCode::ConfigInvalid, err.to_string()).into()
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix("ZNBT")
            .try_parsing(true)
            .source(Some(source))
    }

    #[test]
    fn test_defaults() {
        let cfg = CodecConfig::default();
        assert_eq!(cfg.charset, Charset::Utf8);
        assert_eq!(cfg.compression_level, 6);
        assert_eq!(cfg.max_depth, 512);
        assert!(cfg.validate().is_ok());
    }

    /// Тест проверяет, что без переменных окружения берутся значения по
    /// умолчанию.
    #[test]
    fn test_load_without_overrides() {
        let cfg = CodecConfig::load_from(env(&[])).unwrap();
        assert_eq!(cfg, CodecConfig::default());
    }

    /// Тест проверяет переопределение через переменные ZNBT_*.
    #[test]
    fn test_load_with_overrides() {
        let cfg = CodecConfig::load_from(env(&[
            ("ZNBT_CHARSET", "latin1"),
            ("ZNBT_MAX_DEPTH", "64"),
            ("ZNBT_COMPRESSION_LEVEL", "9"),
        ]))
        .unwrap();
        assert_eq!(cfg.charset, Charset::Latin1);
        assert_eq!(cfg.max_depth, 64);
        assert_eq!(cfg.compression_level, 9);
    }

    /// Тест проверяет, что некорректные значения отклоняются.
    #[test]
    fn test_invalid_values_rejected() {
        let err = CodecConfig::load_from(env(&[("ZNBT_COMPRESSION_LEVEL", "12")])).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::ConfigInvalid);

        let err = CodecConfig::load_from(env(&[("ZNBT_CHARSET", "ebcdic")])).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::ConfigInvalid);

        assert!(CodecConfig::default().with_max_depth(0).validate().is_err());
    }
}
