use std::any::Any;

use thiserror::Error;

use crate::{ErrorExt, StatusCode};

/// Ошибки реестра сериализации: объект ↔ дерево тегов.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParserError {
    #[error("No tag serializer registered for type: {type_name}")]
    NoSerializer { type_name: String },

    #[error("No tag deserializer registered for type: {type_name}")]
    NoDeserializer { type_name: String },

    #[error("Adapter for {expected} produced a value of type {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("Missing field '{field}'")]
    MissingField { field: String },

    #[error("Invalid value for {type_name}: {reason}")]
    InvalidValue { type_name: String, reason: String },

    #[error("No constant named '{name}' in enum {enum_name}")]
    UnknownVariant { enum_name: String, name: String },
}

impl ErrorExt for ParserError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NoSerializer { .. } | Self::NoDeserializer { .. } => StatusCode::ParserConfig,
            Self::TypeMismatch { .. } => StatusCode::TypeMismatch,
            Self::MissingField { .. } => StatusCode::MissingField,
            Self::InvalidValue { .. } => StatusCode::DeserializationFailed,
            Self::UnknownVariant { .. } => StatusCode::UnknownVariant,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
