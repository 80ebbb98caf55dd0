// SPDX-FileCopyrightText: 2026 Binreader Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! binreader - read raw binary input through compiled-in reader plugins.
//!
//! This is the binary entry point: it loads configuration, loads the
//! built-in plugins into a plugin manager, and drives one reader.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod heartbeat;
mod output;
mod shutdown;

use std::path::PathBuf;
use std::time::Duration;

use binreader_config::BinreaderConfig;
use binreader_core::{
    Field, FieldType, InputReader, ReaderError, ReaderInfo, ReaderMode, RecordSink, UpdateOutcome,
};
use binreader_plugin::{PluginManager, builtin_plugins, pump};
use clap::{Args, Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::heartbeat::run_heartbeat;
use crate::output::{OUTPUT_NAME, PrintSink};

/// binreader - read raw binary input through reader plugins.
#[derive(Parser, Debug)]
#[command(name = "binreader", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the standard lookup.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List loaded plugins and the components they register.
    Plugins,
    /// Read a source and print one line per record.
    Read(ReadArgs),
}

#[derive(Args, Debug)]
struct ReadArgs {
    /// File to read.
    source: String,

    /// Reader component tag (defaults to `reader.tag`).
    #[arg(long)]
    reader: Option<String>,

    /// manual, reread, or stream (defaults to `reader.mode`).
    #[arg(long)]
    mode: Option<ReaderMode>,

    /// Bytes per record (defaults to `reader.chunk_size`).
    #[arg(long, value_parser = parse_chunk_size)]
    chunk_size: Option<usize>,

    /// Directory prepended to a relative source (defaults to `reader.path_prefix`).
    #[arg(long)]
    path_prefix: Option<String>,

    /// Print each record's bytes as hex.
    #[arg(long)]
    hex: bool,
}

fn parse_chunk_size(value: &str) -> Result<usize, String> {
    let size: usize = value.parse().map_err(|e| format!("`{value}` is not a size: {e}"))?;
    if size == 0 || size > binreader_config::MAX_CHUNK_SIZE {
        return Err(format!(
            "must be between 1 and {}",
            binreader_config::MAX_CHUNK_SIZE
        ));
    }
    Ok(size)
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => binreader_config::load_and_validate_path(path),
        None => binreader_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            binreader_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.log.level);

    let result = match cli.command {
        Commands::Plugins => list_plugins(),
        Commands::Read(args) => read(&config, args).await,
    };

    if let Err(e) = result {
        error!(error = %e, "binreader failed");
        eprintln!("binreader: {e}");
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` overrides the configured level.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_ascii_lowercase()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_manager() -> Result<PluginManager, ReaderError> {
    let mut manager = PluginManager::new();
    manager.load_all(&builtin_plugins())?;
    Ok(manager)
}

fn list_plugins() -> Result<(), ReaderError> {
    let manager = load_manager()?;
    for plugin in manager.plugins() {
        let configuration = &plugin.configuration;
        match &configuration.version {
            Some(version) => println!(
                "{} {version} - {}",
                configuration.name, configuration.description
            ),
            None => println!("{} - {}", configuration.name, configuration.description),
        }
        for tag in &plugin.components {
            if let Some(component) = manager.registry().get(tag) {
                println!("    {} {}", component.kind(), component.tag());
            }
        }
    }
    Ok(())
}

/// Per-stream reader description built from config and flags.
fn reader_info(config: &BinreaderConfig, args: &ReadArgs) -> ReaderInfo {
    let mode = args.mode.unwrap_or(config.reader.mode);
    let chunk_size = args.chunk_size.unwrap_or(config.reader.chunk_size);
    let mut info = ReaderInfo::new(
        args.source.clone(),
        mode,
        vec![Field::new("chunk", FieldType::String)],
    )
    .with_option("chunk_size", chunk_size.to_string());
    if let Some(prefix) = args
        .path_prefix
        .as_ref()
        .or(config.reader.path_prefix.as_ref())
    {
        info = info.with_option("path_prefix", prefix.clone());
    }
    info
}

async fn read(config: &BinreaderConfig, args: ReadArgs) -> Result<(), ReaderError> {
    let manager = load_manager()?;
    let tag = args.reader.as_deref().unwrap_or(&config.reader.tag);
    let mut reader = manager.instantiate(tag)?;
    let info = reader_info(config, &args);
    reader.open(&info)?;

    let period = Duration::from_millis(config.heartbeat.interval_ms);
    let cancel = if info.mode == ReaderMode::Manual {
        CancellationToken::new()
    } else {
        shutdown::install_signal_handler()
    };

    let stdout = std::io::stdout();
    let mut sink = PrintSink::new(stdout.lock(), args.hex);
    drive(reader.as_mut(), &info, &mut sink, period, cancel).await?;
    sink.finish()
        .map(|_| ())
        .map_err(|e| ReaderError::io(OUTPUT_NAME, e))
}

/// Deliver the initial pass of an open reader, keep it refreshed unless it
/// is manual, then close it. A read error wins over a close error.
async fn drive(
    reader: &mut dyn InputReader,
    info: &ReaderInfo,
    sink: &mut dyn RecordSink,
    period: Duration,
    cancel: CancellationToken,
) -> Result<(), ReaderError> {
    let outcome = async {
        let delivered = pump(reader, UpdateOutcome::initial(info.mode), sink)?;
        info!(source = %info.source, mode = %info.mode, delivered, "initial pass done");

        if info.mode != ReaderMode::Manual {
            run_heartbeat(reader, sink, period, cancel).await?;
        }
        Ok::<(), ReaderError>(())
    }
    .await;

    let closed = reader.close();
    if let (Err(_), Err(e)) = (&outcome, &closed) {
        warn!(error = %e, "closing reader after failure");
    }
    outcome?;
    closed
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn read_flags_override_config() {
        let cli = Cli::try_parse_from([
            "binreader",
            "read",
            "input.bin",
            "--mode",
            "stream",
            "--chunk-size",
            "16",
            "--path-prefix",
            "/data",
        ])
        .unwrap();
        let Commands::Read(args) = cli.command else {
            panic!("expected read command");
        };

        let info = reader_info(&BinreaderConfig::default(), &args);
        assert_eq!(info.source, "input.bin");
        assert_eq!(info.mode, ReaderMode::Stream);
        assert_eq!(info.options.get("chunk_size").map(String::as_str), Some("16"));
        assert_eq!(info.options.get("path_prefix").map(String::as_str), Some("/data"));
        assert_eq!(info.fields, vec![Field::new("chunk", FieldType::String)]);
    }

    #[test]
    fn read_falls_back_to_config() {
        let cli = Cli::try_parse_from(["binreader", "read", "input.bin"]).unwrap();
        let Commands::Read(args) = cli.command else {
            panic!("expected read command");
        };

        let mut config = BinreaderConfig::default();
        config.reader.mode = ReaderMode::Reread;
        config.reader.chunk_size = 32;
        let info = reader_info(&config, &args);
        assert_eq!(info.mode, ReaderMode::Reread);
        assert_eq!(info.options.get("chunk_size").map(String::as_str), Some("32"));
        assert!(!info.options.contains_key("path_prefix"));
    }

    #[test]
    fn unknown_mode_is_rejected_by_parser() {
        let result = Cli::try_parse_from(["binreader", "read", "x", "--mode", "tail"]);
        assert!(result.is_err());
    }

    #[test]
    fn chunk_size_flag_is_bounded() {
        let max = binreader_config::MAX_CHUNK_SIZE.to_string();
        assert!(Cli::try_parse_from(["binreader", "read", "x", "--chunk-size", &max]).is_ok());
        for bad in ["0", "18446744073709551615", "lots"] {
            let result = Cli::try_parse_from(["binreader", "read", "x", "--chunk-size", bad]);
            assert!(result.is_err(), "accepted --chunk-size {bad}");
        }
    }

    #[test]
    fn builtin_manager_has_binary_reader() {
        let manager = load_manager().unwrap();
        assert_eq!(manager.plugins().len(), 1);
        assert!(manager.registry().contains("Binary"));
    }

    /// Yields `records` one-byte chunks, then fails if `bad_read`; always
    /// fails to close.
    struct Flaky {
        records: usize,
        bad_read: bool,
    }

    impl InputReader for Flaky {
        fn name(&self) -> &str {
            "Flaky"
        }

        fn open(&mut self, _info: &ReaderInfo) -> Result<(), ReaderError> {
            Ok(())
        }

        fn read_next(&mut self) -> Result<Option<binreader_core::Record>, ReaderError> {
            if self.records > 0 {
                self.records -= 1;
                return Ok(Some(binreader_core::Record::new(vec![
                    binreader_core::Value::String(vec![b'x']),
                ])));
            }
            if self.bad_read {
                return Err(ReaderError::format("garbled chunk"));
            }
            Ok(None)
        }

        fn update(&mut self) -> Result<UpdateOutcome, ReaderError> {
            Ok(UpdateOutcome::Unchanged)
        }

        fn heartbeat(&mut self) -> Result<UpdateOutcome, ReaderError> {
            Ok(UpdateOutcome::Unchanged)
        }

        fn close(&mut self) -> Result<(), ReaderError> {
            Err(ReaderError::io(
                "flaky",
                std::io::Error::other("close failed"),
            ))
        }

        fn is_open(&self) -> bool {
            true
        }
    }

    fn manual_info() -> ReaderInfo {
        ReaderInfo::new(
            "flaky",
            ReaderMode::Manual,
            vec![Field::new("chunk", FieldType::String)],
        )
    }

    #[tokio::test]
    async fn read_error_is_not_hidden_by_close_error() {
        let mut reader = Flaky {
            records: 2,
            bad_read: true,
        };
        let mut sink = PrintSink::new(Vec::new(), false);
        let err = drive(
            &mut reader,
            &manual_info(),
            &mut sink,
            Duration::from_millis(10),
            CancellationToken::new(),
        )
        .await
        .unwrap_err();
        assert!(err.is_format(), "got {err}");
    }

    #[tokio::test]
    async fn close_error_surfaces_after_clean_read() {
        let mut reader = Flaky {
            records: 1,
            bad_read: false,
        };
        let mut sink = PrintSink::new(Vec::new(), false);
        let err = drive(
            &mut reader,
            &manual_info(),
            &mut sink,
            Duration::from_millis(10),
            CancellationToken::new(),
        )
        .await
        .unwrap_err();
        assert!(err.is_io());

        let printed = String::from_utf8(sink.finish().unwrap()).unwrap();
        assert_eq!(printed, "0\tentry\t1\n# end of snapshot (1 records)\n");
    }
}
