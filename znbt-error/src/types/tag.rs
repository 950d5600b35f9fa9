use std::any::Any;

use crate::{ErrorExt, StatusCode};

/// Ошибки модели тегов и бинарного кодека.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagError {
    /// Идентификатор типа отсутствует в таблице декодеров
    UnknownTagType { id: u8 },

    /// Терминатор (id 0) нельзя писать как пользовательское значение
    EndTagNotAllowed,

    /// Сужающий аксессор вызван на несовместимом варианте
    UnsupportedOperation {
        operation: &'static str,
        variant: &'static str,
    },

    /// Значение байта вне {0, 1} для логического тега
    InvalidBoolean { value: i8 },

    /// Элемент списка не совпадает с объявленным типом содержимого
    ListTypeMismatch { expected: u8, got: u8 },

    /// Превышен лимит размера при записи
    SizeLimit {
        what: &'static str,
        size: usize,
        limit: usize,
    },

    /// Превышена глубина вложенности
    DepthLimit { limit: usize },

    /// Отрицательная длина массива или списка в потоке
    InvalidLength { what: &'static str, length: i32 },

    /// Текст не представим в выбранной кодировке
    Encoding {
        charset: &'static str,
        reason: String,
    },
}

impl std::fmt::Display for TagError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::UnknownTagType { id } => write!(f, "Unknown tag type: {id}"),
            Self::EndTagNotAllowed => write!(f, "End tag not allowed as a value"),
            Self::UnsupportedOperation { operation, variant } => {
                write!(f, "Unsupported operation {operation} for {variant} tag")
            }
            Self::InvalidBoolean { value } => {
                write!(f, "Boolean value must be 0 or 1 but got: {value}")
            }
            Self::ListTypeMismatch { expected, got } => write!(
                f,
                "List element type {got} does not match content type {expected}"
            ),
            Self::SizeLimit { what, size, limit } => {
                write!(f, "{what} size {size} exceeds limit {limit}")
            }
            Self::DepthLimit { limit } => {
                write!(f, "Tag nesting depth exceeds limit {limit}")
            }
            Self::InvalidLength { what, length } => {
                write!(f, "Invalid {what} length: {length}")
            }
            Self::Encoding { charset, reason } => {
                write!(f, "Cannot encode text as {charset}: {reason}")
            }
        }
    }
}

impl std::error::Error for TagError {}

impl ErrorExt for TagError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::UnknownTagType { .. } => StatusCode::UnknownTagType,
            Self::EndTagNotAllowed => StatusCode::EndTagNotAllowed,
            Self::UnsupportedOperation { .. } => StatusCode::Unsupported,
            Self::InvalidBoolean { .. } => StatusCode::InvalidValue,
            Self::ListTypeMismatch { .. } => StatusCode::ListTypeMismatch,
            Self::SizeLimit { .. } => StatusCode::SizeLimit,
            Self::DepthLimit { .. } => StatusCode::DepthLimit,
            Self::InvalidLength { .. } => StatusCode::InvalidLength,
            Self::Encoding { .. } => StatusCode::EncodingError,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            TagError::UnknownTagType { id: 99 }.status_code(),
            StatusCode::UnknownTagType
        );
        assert_eq!(
            TagError::UnsupportedOperation {
                operation: "as_i64",
                variant: "String"
            }
            .status_code(),
            StatusCode::Unsupported
        );
        assert_eq!(
            TagError::InvalidBoolean { value: 2 }.status_code(),
            StatusCode::InvalidValue
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            TagError::UnknownTagType { id: 99 }.to_string(),
            "Unknown tag type: 99"
        );
        assert_eq!(
            TagError::InvalidBoolean { value: -3 }.to_string(),
            "Boolean value must be 0 or 1 but got: -3"
        );
        assert!(TagError::SizeLimit {
            what: "string",
            size: 70_000,
            limit: 65_535
        }
        .to_string()
        .contains("70000"));
    }
}
