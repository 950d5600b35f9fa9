//! Печать содержимого файла именованных тегов.
//!
//! Выводит имя корня и дерево тегов в текстовом виде.

use std::{fs::File, io::BufReader, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use znbt::{
    logging::{init_logging, LogFormat, LoggingConfig},
    Charset, CodecConfig, NbtReader,
};

/// Аргументы командной строки
#[derive(Parser)]
#[command(name = "znbt-dump")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Print a gzip-compressed named binary tag file", long_about = None)]
struct Cli {
    /// Путь к файлу
    file: PathBuf,
    /// Кодировка имён и строк
    #[arg(long, default_value = "utf8", env = "ZNBT_CHARSET")]
    charset: Charset,
    /// Максимальная вложенность
    #[arg(long, default_value_t = CodecConfig::DEFAULT_MAX_DEPTH)]
    max_depth: usize,
    /// Директива фильтра логов
    #[arg(long, default_value = "warn")]
    log_level: String,
    /// Формат логов: compact, pretty или json
    #[arg(long, default_value = "compact")]
    log_format: LogFormat,
}

fn main() {
    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging(
        LoggingConfig::default()
            .with_level(cli.log_level)
            .with_format(cli.log_format),
    )?;

    let config = CodecConfig::default()
        .with_charset(cli.charset)
        .with_max_depth(cli.max_depth);
    config.validate()?;

    let file = File::open(&cli.file)
        .with_context(|| format!("cannot open {}", cli.file.display()))?;
    debug!(path = %cli.file.display(), charset = cli.charset.name(), "reading file");

    let mut reader = NbtReader::with_config(BufReader::new(file), &config);
    match reader
        .read_named_tag()
        .with_context(|| format!("cannot decode {}", cli.file.display()))?
    {
        Some((name, tag)) => {
            println!("{name:?}: {tag}");
        }
        None => println!("(empty)"),
    }
    Ok(())
}
