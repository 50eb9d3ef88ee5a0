//! Strontium: remote automation server for the JSON wire protocol
//!
//! Accepts wire protocol commands over HTTP, binds each to a session and its
//! driver, and answers with the protocol's JSON envelope.
//!
//! Usage:
//!   strontium                              # Default port 4444, prefix /wd/hub/
//!   strontium --port 5555 --path grid/     # Custom port and prefix
//!   strontium --ignore-remote-shutdown     # Refuse SHUTDOWN requests

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use clap::Parser;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use wd_handlers::HandlerContext;
use wd_protocol::Capabilities;
use wd_server::{Dispatcher, HandlerRegistry, RouteTable};
use wd_session::{DriverRegistry, SessionRegistry};
use wd_transport::{ShutdownRequested, TransportConfig, TransportServer};

#[derive(Parser, Debug)]
#[command(name = "strontium", about = "Strontium remote automation server")]
struct Cli {
    /// Port to listen on (0 for OS-assigned)
    #[arg(long, default_value = "4444")]
    port: u16,

    /// Hostname to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Path prefix every command lives under
    #[arg(long, default_value = "wd/hub/")]
    path: String,

    /// Enable verbose logging
    #[arg(long)]
    verbose: bool,

    /// Write logs to a file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Directory uploaded files are extracted under (defaults to the OS temp dir)
    #[arg(long)]
    upload_dir: Option<PathBuf>,

    /// Log and ignore SHUTDOWN requests instead of stopping
    #[arg(long)]
    ignore_remote_shutdown: bool,
}

/// Driver mappings registered at startup. Each names a driver type that an
/// embedding build adds to the catalog; missing types are reported as
/// registration failures.
fn default_driver_mappings() -> Vec<(Capabilities, &'static str)> {
    vec![
        (Capabilities::internet_explorer(), "InternetExplorerDriver"),
        (Capabilities::firefox(), "FirefoxDriver"),
        (Capabilities::chrome(), "ChromeDriver"),
        (Capabilities::html_unit(), "HtmlUnitDriver"),
    ]
}

fn init_tracing(cli: &Cli) {
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    if let Some(ref log_path) = cli.log_file {
        if let Some(parent) = log_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        let file = match std::fs::OpenOptions::new().create(true).append(true).open(log_path) {
            Ok(file) => file,
            Err(e) => {
                eprintln!("Failed to open log file {}: {e}", log_path.display());
                std::process::exit(1);
            }
        };

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .init();

        eprintln!("Logging to {}", log_path.display());
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .init();
    }
}

/// Next remote shutdown request; never resolves once the channel is gone.
async fn next_shutdown_request(rx: &mut Option<UnboundedReceiver<ShutdownRequested>>) {
    match rx {
        Some(rx) => {
            if rx.recv().await.is_none() {
                std::future::pending::<()>().await;
            }
        }
        None => std::future::pending::<()>().await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    // Registry logs failures; we only count them for the banner
    let drivers = Arc::new(DriverRegistry::new());
    let failed_drivers = Arc::new(AtomicUsize::new(0));
    {
        let failed = failed_drivers.clone();
        drivers.on_registration_failed(move |_| {
            failed.fetch_add(1, Ordering::Relaxed);
        });
    }
    drivers.register_defaults(&default_driver_mappings());

    let sessions = Arc::new(SessionRegistry::new(drivers.clone()));
    let mut context = HandlerContext::new(sessions.clone());
    if let Some(dir) = cli.upload_dir.clone() {
        context = context.with_upload_dir(dir);
    }
    let upload_dir = context.upload_dir.clone();

    let config = TransportConfig {
        hostname: cli.host.clone(),
        port: cli.port,
        base_path: cli.path.clone(),
    };
    let base_path = config.normalized_base_path();

    let dispatcher = Dispatcher::new(
        RouteTable::new(&base_path),
        HandlerRegistry::with_builtin_handlers(),
        context,
    );

    let mut transport = match TransportServer::start(config, Arc::new(dispatcher)).await {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to start transport: {e}");
            std::process::exit(1);
        }
    };

    println!();
    println!("  Strontium remote server");
    println!();
    println!("  Endpoint:   http://{}:{}{}", cli.host, transport.port(), base_path);
    println!(
        "  Drivers:    {} registered, {} failed",
        drivers.len(),
        failed_drivers.load(Ordering::Relaxed)
    );
    println!("  Uploads:    {}", upload_dir.display());
    if cli.ignore_remote_shutdown {
        println!("  Shutdown:   remote requests ignored");
    }
    println!();
    println!("  Press Ctrl+C to stop.");
    println!();

    let mut shutdown_requests = transport.take_shutdown_requests();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = next_shutdown_request(&mut shutdown_requests) => {
                if cli.ignore_remote_shutdown {
                    warn!("Ignoring remote shutdown request");
                    continue;
                }
                info!("Remote shutdown requested");
                break;
            }
        }
    }

    println!();
    println!("  Shutting down...");
    transport.stop().await;

    let live = sessions.len();
    if live > 0 {
        info!("Quitting {live} live session(s)");
    }
    if let Err(e) = tokio::task::spawn_blocking(move || sessions.quit_all()).await {
        error!("Failed to quit sessions: {e}");
    }

    println!("  Server stopped.");
}
