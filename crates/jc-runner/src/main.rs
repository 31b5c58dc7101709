//! joyctl
//!
//! Runs a YAML action script against an emulated controller session:
//! privilege check, session open, a fixed warm-up delay, script execution,
//! and a session close that happens on every exit path.

use anyhow::{bail, Result};
use clap::Parser;
use jc_controller::{ControllerKind, FlashMemory, Session, SessionConfig};
use jc_script::{ScriptDocument, ScriptExecutor};
use std::path::PathBuf;
use std::time::Duration;
use tokio::signal;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Settle time the console needs after the session is established before it
/// accepts input
const WARM_UP_DELAY: Duration = Duration::from_secs(10);

#[derive(Parser)]
#[command(name = "joyctl")]
#[command(about = "Run a YAML action script against an emulated controller", long_about = None)]
#[command(version)]
struct Cli {
    /// Console Bluetooth address, for reconnecting as an already paired
    /// controller
    #[arg(value_name = "ADDR")]
    addr: String,

    /// The script YAML file
    #[arg(value_name = "SCRIPT")]
    script: PathBuf,

    /// Write controller input events to a file
    #[arg(short = 'l', long = "log", value_name = "FILE")]
    log: Option<PathBuf>,

    /// ID of the bluetooth adapter: the digit in the hci* notation or the
    /// adapter MAC address
    #[arg(short = 'd', long = "device-id", value_name = "ID")]
    device_id: Option<String>,

    /// Memory dump of a real controller, required for joystick emulation
    #[arg(long = "spi-flash", value_name = "FILE")]
    spi_flash: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // raw HID sockets need root, so fail before doing anything else
    if unsafe { libc::geteuid() } != 0 {
        bail!("joyctl must be run as root");
    }

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    let spi_flash = cli
        .spi_flash
        .as_deref()
        .map(FlashMemory::from_file)
        .transpose()?;
    let document = ScriptDocument::load(&cli.script)?;

    let mut session = Session::open(SessionConfig {
        reconnect_addr: cli.addr,
        device_id: cli.device_id,
        controller: ControllerKind::ProController,
        spi_flash,
        capture_path: cli.log,
    })?;

    // close must happen exactly once, on success and failure alike
    let run_result = run(&mut session, &document).await;
    info!("stopping communication");
    session.close()?;
    run_result
}

async fn run(session: &mut Session, document: &ScriptDocument) -> Result<()> {
    info!(
        "waiting {} seconds before executing the sequence",
        WARM_UP_DELAY.as_secs()
    );
    tokio::time::sleep(WARM_UP_DELAY).await;

    let mut executor = ScriptExecutor::new(session.controller_mut(), document.options.clone());
    tokio::select! {
        result = executor.execute_sequence(&document.sequence) => result?,
        _ = signal::ctrl_c() => info!("interrupted, shutting down"),
    }
    Ok(())
}
