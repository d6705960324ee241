//! irqstatd - interrupt counter collector daemon.
//!
//! Reads `/proc/interrupts` on a fixed interval and writes one counter per
//! interrupt line to stdout, as collectd `PUTVAL` lines or JSON.

use tikv_jemallocator::Jemalloc;
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{Level, debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use irqstat::collector::{FileSystem, IrqCollector, Plugin, RealFs};
use irqstat::config::{self, DIRECTIVE_IGNORE_SELECTED, DIRECTIVE_IRQ};
use irqstat::sink::{JsonSink, MetricSink, PutvalSink};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    /// collectd plain-text protocol.
    Putval,
    /// One JSON object per line.
    Json,
}

/// Interrupt counter collector daemon.
#[derive(Parser)]
#[command(name = "irqstatd", about = "Interrupt counter collector daemon", version)]
struct Args {
    /// Collection interval in seconds.
    #[arg(short, long, default_value = "10")]
    interval: u64,

    /// Path to /proc filesystem (for testing/mocking).
    #[arg(long, default_value = "/proc")]
    proc_path: PathBuf,

    /// Directive file with `Irq` and `IgnoreSelected` lines.
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Interrupt name or /regex/ to select. May be repeated.
    /// Applied after the directive file.
    #[arg(long, value_name = "PATTERN")]
    irq: Vec<String>,

    /// Drop the selected interrupts (true) or report only them (false).
    #[arg(long, value_name = "BOOL", action = clap::ArgAction::Set)]
    ignore_selected: Option<bool>,

    /// Host name attached to every value. Defaults to the kernel host name.
    #[arg(long)]
    hostname: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value = "putval")]
    format: OutputFormat,

    /// Truncate interrupt names to this many bytes.
    #[arg(long, value_name = "BYTES")]
    name_limit: Option<usize>,

    /// Run a single collection cycle and exit.
    #[arg(long)]
    once: bool,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Initializes the tracing subscriber with the appropriate log level.
/// Logs go to stderr; stdout carries only metric output.
fn init_logging(verbose: u8, quiet: bool) -> Result<()> {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(format!("irqstatd={}", level).parse()?)
        .add_directive(format!("irqstat={}", level).parse()?);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

/// Routes the directive file and CLI selections through the plugin's
/// `configure`, in that order.
fn configure(plugin: &mut dyn Plugin, args: &Args) -> Result<()> {
    if let Some(ref path) = args.config {
        let directives = config::load_directives(path)?;
        for d in &directives {
            plugin
                .configure(&d.key, &d.value)
                .with_context(|| format!("{}:{}", path.display(), d.line))?;
        }
        info!("Loaded {} directives from {}", directives.len(), path.display());
    }

    for pattern in &args.irq {
        plugin.configure(DIRECTIVE_IRQ, pattern)?;
    }
    if let Some(ignore_selected) = args.ignore_selected {
        plugin.configure(DIRECTIVE_IGNORE_SELECTED, &ignore_selected.to_string())?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet)?;

    info!("irqstatd {} starting", env!("CARGO_PKG_VERSION"));
    info!(
        "Config: interval={}s, proc={}, format={:?}",
        args.interval,
        args.proc_path.display(),
        args.format
    );

    let fs = RealFs::new();
    if !fs.exists(&args.proc_path.join("interrupts")) {
        warn!(
            "{} does not exist yet; cycles will fail until it does",
            args.proc_path.join("interrupts").display()
        );
    }

    let interval = Duration::from_secs(args.interval);
    let mut collector = IrqCollector::new(fs, &args.proc_path).with_interval(interval);
    if let Some(ref host) = args.hostname {
        collector = collector.with_host(host);
    }
    if let Some(limit) = args.name_limit {
        collector = collector.with_name_limit(limit);
    }

    configure(&mut collector, &args).context("configuration failed")?;
    let filter = collector.filter();
    info!(
        "Host: {}, filter: {} patterns, {}",
        collector.host(),
        filter.len(),
        if filter.invert() { "ignore selected" } else { "select only" }
    );

    let mut sink: Box<dyn MetricSink> = match args.format {
        OutputFormat::Putval => Box::new(PutvalSink::new(io::stdout())),
        OutputFormat::Json => Box::new(JsonSink::new(io::stdout())),
    };

    // Setup graceful shutdown
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    if let Err(e) = ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        r.store(false, Ordering::SeqCst);
    }) {
        warn!("Failed to set Ctrl-C handler: {}", e);
    }

    let mut cycle_count: u64 = 0;
    let mut failed_cycles: u64 = 0;

    info!("Starting collection loop");

    while running.load(Ordering::SeqCst) {
        let started = Instant::now();
        cycle_count += 1;

        match collector.read(sink.as_mut()) {
            Ok(accepted) => {
                debug!(
                    "Cycle #{}: {} values in {:?}",
                    cycle_count,
                    accepted,
                    started.elapsed()
                );
            }
            Err(e) => {
                failed_cycles += 1;
                error!("Cycle #{} failed: {}", cycle_count, e);
            }
        }

        if args.once {
            break;
        }

        // Sleep with periodic checks for shutdown signal
        let sleep_interval = Duration::from_millis(100);
        let mut remaining = interval.saturating_sub(started.elapsed());
        while remaining > Duration::ZERO && running.load(Ordering::SeqCst) {
            let sleep_time = remaining.min(sleep_interval);
            std::thread::sleep(sleep_time);
            remaining = remaining.saturating_sub(sleep_time);
        }
    }

    info!(
        "Shutdown complete after {} cycles ({} failed)",
        cycle_count, failed_cycles
    );
    Ok(())
}
