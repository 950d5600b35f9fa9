//! Инициализация `tracing` для бинарных целей и тестов.
//!
//! Библиотека только порождает события; подписчика ставит приложение.

pub mod config;
mod filters;
mod formatter;

use std::io;

pub use config::{LogFormat, LoggingConfig};
pub use filters::build_filter_from_config;
pub use formatter::build_formatter_from_config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use znbt_error::{GenericError, StatusCode, ZnbtResult};

/// Устанавливает глобальный подписчик: фильтр плюс консольный слой в
/// stderr.
///
/// Повторный вызов возвращает ошибку.
pub fn init_logging(mut config: LoggingConfig) -> ZnbtResult<()> {
    config.apply_env_overrides();
    config.validate()?;

    let filter = build_filter_from_config(&config);
    let console = build_formatter_from_config(&config, io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .try_init()
        .map_err(|e| {
            GenericError::new(
                StatusCode::Internal,
                format!("logging already initialized: {e}"),
            )
        })?;

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        level = %config.level,
        format = %config.format,
        "logging initialized"
    );
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_writer {
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    use tracing_subscriber::fmt::MakeWriter;

    /// Буфер в памяти для проверки вывода слоёв.
    #[derive(Clone, Default)]
    pub struct VecMakeWriter(Arc<Mutex<Vec<u8>>>);

    impl VecMakeWriter {
        pub fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl<'a> MakeWriter<'a> for VecMakeWriter {
        type Writer = VecWriterGuard;

        fn make_writer(&'a self) -> Self::Writer {
            VecWriterGuard(self.0.clone())
        }
    }

    pub struct VecWriterGuard(Arc<Mutex<Vec<u8>>>);

    impl io::Write for VecWriterGuard {
        fn write(
            &mut self,
            buf: &[u8],
        ) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
