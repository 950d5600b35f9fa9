use tracing_subscriber::{
    fmt::{self, format::FmtSpan, MakeWriter},
    layer::Layer,
    registry::LookupSpan,
};

use crate::logging::config::{LogFormat, LoggingConfig};

/// Консольный слой в формате из конфигурации.
///
/// Тип слоя стирается, поскольку у json/pretty/compact он разный.
pub fn build_formatter_from_config<S, W>(
    config: &LoggingConfig,
    writer: W,
) -> Box<dyn Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_target(config.with_target);

    match config.format {
        LogFormat::Json => Box::new(
            layer
                .with_ansi(false)
                .event_format(fmt::format().json().with_current_span(true)),
        ),
        LogFormat::Pretty => Box::new(
            layer
                .with_ansi(config.with_ansi)
                .with_span_events(FmtSpan::CLOSE)
                .event_format(fmt::format().pretty()),
        ),
        LogFormat::Compact => Box::new(
            layer
                .with_ansi(config.with_ansi)
                .event_format(fmt::format().compact()),
        ),
    }
}
