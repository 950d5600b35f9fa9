use std::{any::Any, error::Error};

use crate::StatusCode;

/// Расширение для ошибок библиотеки (object-safe).
///
/// Любая доменная ошибка, которую можно положить в [`crate::StackError`],
/// реализует этот трейт.
pub trait ErrorExt: Error + Send + Sync + 'static {
    /// Статус ошибки.
    ///
    /// По умолчанию возвращает [`StatusCode::Internal`].
    fn status_code(&self) -> StatusCode {
        StatusCode::Internal
    }

    /// Возвращает ошибку как [`Any`], чтобы можно было выполнить downcast к
    /// конкретному типу.
    fn as_any(&self) -> &dyn Any;

    /// Детализированное сообщение для логов.
    fn log_message(&self) -> String {
        format!("{self:?}")
    }

    /// Короткое имя типа ошибки, без пути модулей.
    fn type_name(&self) -> String {
        std::any::type_name::<Self>()
            .rsplit("::")
            .next()
            .unwrap_or("Unknown")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::fmt;

    use super::*;

    #[derive(Debug)]
    struct PlainError;

    impl fmt::Display for PlainError {
        fn fmt(
            &self,
            f: &mut fmt::Formatter<'_>,
        ) -> fmt::Result {
            write!(f, "plain")
        }
    }

    impl Error for PlainError {}

    impl ErrorExt for PlainError {
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn test_default_status_is_internal() {
        assert_eq!(PlainError.status_code(), StatusCode::Internal);
    }

    #[test]
    fn test_type_name_is_short() {
        assert_eq!(PlainError.type_name(), "PlainError");
    }

    #[test]
    fn test_log_message_is_debug() {
        assert_eq!(PlainError.log_message(), "PlainError");
    }

    #[test]
    fn test_as_any_downcast() {
        let err = PlainError;
        assert!(err.as_any().downcast_ref::<PlainError>().is_some());
    }
}
