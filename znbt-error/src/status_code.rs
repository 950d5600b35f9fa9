use std::fmt;

use num_enum::TryFromPrimitive;

/// Коды статуса для категоризации ошибок кодека и реестра.
///
/// # Диапазоны:
/// - 0xxx: Успех
/// - 1xxx: Общие ошибки
/// - 2xxx: Ошибки модели тегов (несовпадение представлений, значений)
/// - 3xxx: Ошибки бинарного кодека (кадрирование, лимиты, кодировки)
/// - 4xxx: Ошибки реестра сериализации (конфигурация адаптеров)
/// - 5xxx: Ввод-вывод
/// - 6xxx: Конфигурация
///
/// `num_enum::TryFromPrimitive` даёт нативную реализацию `TryFrom<u32>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[repr(u32)]
#[non_exhaustive]
pub enum StatusCode {
    // === 0xxx: Успех ===
    Success = 0,

    // === 1xxx: Общие ошибки ===
    Unknown = 1000,
    Unsupported = 1001,
    Internal = 1002,
    InvalidArgs = 1003,
    NotImplemented = 1004,

    // === 2xxx: Модель тегов ===
    TypeMismatch = 2000,
    InvalidValue = 2001,
    ListTypeMismatch = 2002,
    MissingField = 2003,
    InvalidData = 2004,

    // === 3xxx: Бинарный кодек ===
    UnknownTagType = 3000,
    EndTagNotAllowed = 3001,
    SizeLimit = 3002,
    DepthLimit = 3003,
    InvalidLength = 3004,
    EncodingError = 3005,
    InvalidUtf8 = 3006,
    CompressionFailed = 3007,

    // === 4xxx: Реестр сериализации ===
    ParserConfig = 4000,
    SerializationFailed = 4001,
    DeserializationFailed = 4002,
    UnknownVariant = 4003,

    // === 5xxx: Ввод-вывод ===
    Io = 5000,
    UnexpectedEof = 5001,
    NotFound = 5002,
    PermissionDenied = 5003,
    Timeout = 5004,

    // === 6xxx: Конфигурация ===
    ConfigInvalid = 6000,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl StatusCode {
    /// Числовое представление кода статуса.
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Пытается получить вариант `StatusCode` из `u32`.
    pub fn from_u32(v: u32) -> Option<Self> {
        Self::try_from(v).ok()
    }

    /// Вернёт `true`, если переданный `code` означает успешный результат.
    pub fn is_success(code: u32) -> bool {
        Self::Success as u32 == code
    }

    /// Ошибка модели тегов (диапазон 2xxx).
    pub fn is_tag_error(&self) -> bool {
        (2000..=2999).contains(&self.code())
    }

    /// Ошибка бинарного кодека (диапазон 3xxx).
    ///
    /// Сюда же относятся ошибки ввода-вывода: повреждённый поток проявляется
    /// либо как 3xxx, либо как 5xxx.
    pub fn is_codec_error(&self) -> bool {
        matches!(self.code(), 3000..=3999 | 5000..=5999)
    }

    /// Ошибка настройки реестра, а не данных: адаптер не зарегистрирован.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::ParserConfig | Self::ConfigInvalid)
    }

    /// Имеет ли смысл повторять операцию целиком.
    ///
    /// Внутри кодека повторов нет, это подсказка для вызывающего.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout | Self::UnknownTagType)
    }

    /// Требуется ли логировать как критическую ошибку.
    pub fn is_critical(&self) -> bool {
        matches!(self, Self::Internal | Self::CompressionFailed)
    }

    /// Рекомендуемый уровень логирования для данного кода.
    pub fn log_level(&self) -> LogLevel {
        match self {
            Self::Success => LogLevel::Trace,
            Self::MissingField | Self::UnknownVariant => LogLevel::Debug,
            Self::TypeMismatch
            | Self::InvalidValue
            | Self::InvalidArgs
            | Self::ListTypeMismatch
            | Self::EndTagNotAllowed => LogLevel::Info,
            Self::Internal | Self::CompressionFailed | Self::ParserConfig => LogLevel::Error,
            _ => LogLevel::Warn,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов для StatusCode
////////////////////////////////////////////////////////////////////////////////

impl From<StatusCode> for u32 {
    fn from(c: StatusCode) -> Self {
        c.code()
    }
}

impl fmt::Display for StatusCode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{:?} ({})", self, self.code())
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
