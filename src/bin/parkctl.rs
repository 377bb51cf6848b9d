//! parkctl: remote control for a SmartPark controller over serial.
//!
//! One-shot actions (`status`, `open`, `close`, `reset`), a live
//! occupancy `monitor`, or an interactive `shell` with the numbered menu.

use std::io::Write as _;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, BufReader, Lines, Stdin};
use tokio_serial::SerialPortBuilderExt;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use smartpark::app::events::ParkingEvent;
use smartpark::remote::client::{ClientError, RemoteClient, SETTLE_DELAY};
use smartpark::remote::interrupt::Interrupt;
use smartpark::remote::{ActivityLog, MonitorReport, RemoteAction, StatusMonitor};

#[derive(Parser, Debug)]
#[command(name = "parkctl", about = "SmartPark remote control", version)]
struct Args {
    /// Serial device of the controller (e.g. /dev/ttyUSB0, COM3)
    #[arg(long)]
    port: String,

    #[arg(long, default_value = "9600")]
    baud: u32,

    /// Skip y/n confirmation for open, close and reset
    #[arg(long)]
    yes: bool,

    /// Print the activity log as JSON on exit
    #[arg(long)]
    json: bool,

    /// Seconds to wait after opening the port for the board to boot
    #[arg(long, default_value_t = SETTLE_DELAY.as_secs())]
    settle: u64,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Cmd {
    /// Query occupancy
    Status,
    /// Open the barrier gate
    Open,
    /// Close the barrier gate
    Close,
    /// Reset occupancy and close the gate
    Reset,
    /// Print occupancy changes and distance samples
    Monitor {
        /// Stop after this many seconds (default: until Ctrl+C)
        #[arg(long)]
        duration: Option<u64>,
    },
    /// Interactive menu
    Shell,
}

impl Cmd {
    fn action(self) -> Option<RemoteAction> {
        match self {
            Self::Status => Some(RemoteAction::CheckStatus),
            Self::Open => Some(RemoteAction::OpenGate),
            Self::Close => Some(RemoteAction::CloseGate),
            Self::Reset => Some(RemoteAction::Reset),
            Self::Monitor { .. } | Self::Shell => None,
        }
    }
}

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let args = Args::parse();

    let port = tokio_serial::new(&args.port, args.baud)
        .open_native_async()
        .with_context(|| format!("opening {}", args.port))?;
    info!(port = %args.port, baud = args.baud, "serial port opened");
    tokio::time::sleep(Duration::from_secs(args.settle)).await;
    println!("Connected to Smart Parking System on {}", args.port);

    let mut client = RemoteClient::new(port);
    let mut log = ActivityLog::new();
    let mut session = Session {
        input: BufReader::new(tokio::io::stdin()).lines(),
        interrupt: Interrupt::ctrl_c(),
        assume_yes: args.yes,
    };

    let result = match args.command {
        Cmd::Monitor { duration } => {
            monitor(&mut client, &mut log, &mut session, duration.map(Duration::from_secs)).await
        }
        Cmd::Shell => shell(&mut client, &mut log, &mut session).await,
        one_shot => {
            let action = one_shot.action().context("not a one-shot command")?;
            perform(&mut client, &mut log, &mut session, action).await
        }
    };

    if args.json {
        println!("{}", log.to_json()?);
    }
    result
}

fn now() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

struct Session {
    input: Input,
    interrupt: Interrupt,
    assume_yes: bool,
}

impl Session {
    /// Read one answer.  `None` on EOF or Ctrl+C.
    async fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        print!("{prompt} ");
        std::io::stdout().flush()?;
        tokio::select! {
            line = self.input.next_line() => Ok(line?.map(|l| l.trim().to_owned())),
            res = self.interrupt.wait() => {
                res?;
                println!();
                Ok(None)
            }
        }
    }

    async fn confirm(&mut self, action: RemoteAction) -> Result<bool> {
        if !action.needs_confirmation() || self.assume_yes {
            return Ok(true);
        }
        let answer = self.ask(&format!("{} (y/n):", action.prompt())).await?;
        Ok(answer.is_some_and(|a| a.eq_ignore_ascii_case("y")))
    }
}

/// Run one action end to end: confirm, send, await reply, record.
async fn perform<S: AsyncRead + AsyncWrite + Unpin>(
    client: &mut RemoteClient<S>,
    log: &mut ActivityLog,
    session: &mut Session,
    action: RemoteAction,
) -> Result<()> {
    if !session.confirm(action).await? {
        println!("Cancelled {action}");
        return Ok(());
    }

    let reply = tokio::select! {
        reply = client.request(action) => reply,
        res = session.interrupt.wait() => {
            res?;
            println!("\nCancelled {action}");
            return Ok(());
        }
    };

    match reply {
        Ok(event) => {
            let ts = now();
            if let Some(status) = action.record_status(&event) {
                log.record(ts.clone(), action.activity(), status);
            }
            match event {
                ParkingEvent::Status(occupancy) => {
                    println!("Current Status: {occupancy}");
                    println!("Last Updated: {ts}");
                }
                _ => println!("Done: {action}"),
            }
        }
        Err(ClientError::Timeout(_)) => {
            warn!(%action, "no reply from controller");
            println!("Failed: {action} (no reply)");
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

/// Stream occupancy changes until Ctrl+C, EOF, or `duration` elapses.
async fn monitor<S: AsyncRead + AsyncWrite + Unpin>(
    client: &mut RemoteClient<S>,
    log: &mut ActivityLog,
    session: &mut Session,
    duration: Option<Duration>,
) -> Result<()> {
    println!("Monitoring parking; press Ctrl+C to stop");
    println!("{}", "-".repeat(50));

    let mut monitor = StatusMonitor::new();
    let deadline = duration.map(|d| tokio::time::Instant::now() + d);
    let until_deadline = async {
        match deadline {
            Some(at) => tokio::time::sleep_until(at).await,
            None => std::future::pending().await,
        }
    };
    tokio::pin!(until_deadline);

    loop {
        tokio::select! {
            event = client.next_event() => {
                let event = event?;
                let Some(report) = monitor.observe(&event) else { continue };
                let stamp = Local::now().format("%H:%M:%S");
                match report {
                    MonitorReport::Distance(cm) => println!("[{stamp}] Distance: {cm} cm"),
                    MonitorReport::CarParked => println!("[{stamp}] PARKING OCCUPIED"),
                    MonitorReport::CarLeft => println!("[{stamp}] PARKING AVAILABLE"),
                }
                if let Some((activity, occupancy)) = report.activity() {
                    log.record(stamp.to_string(), activity, occupancy.name());
                }
            }
            res = session.interrupt.wait() => {
                res?;
                println!();
                break;
            }
            () = &mut until_deadline => break,
        }
    }
    println!("Monitoring stopped");
    Ok(())
}

fn print_menu() {
    println!();
    println!("=== SMART PARKING CONTROL SYSTEM ===");
    println!("1. Check parking status");
    println!("2. Open barrier gate");
    println!("3. Close barrier gate");
    println!("4. Monitor parking (real-time)");
    println!("5. View activity log");
    println!("6. Reset system");
    println!("7. Exit");
    println!("{}", "=".repeat(40));
}

async fn shell<S: AsyncRead + AsyncWrite + Unpin>(
    client: &mut RemoteClient<S>,
    log: &mut ActivityLog,
    session: &mut Session,
) -> Result<()> {
    println!("Smart Parking System Ready!");
    loop {
        print_menu();
        let Some(choice) = session.ask("Enter your choice (1-7):").await? else {
            println!("Goodbye! Closing connection...");
            break;
        };
        match choice.as_str() {
            "1" => perform(client, log, session, RemoteAction::CheckStatus).await?,
            "2" => perform(client, log, session, RemoteAction::OpenGate).await?,
            "3" => perform(client, log, session, RemoteAction::CloseGate).await?,
            "4" => monitor(client, log, session, None).await?,
            "5" => {
                println!("\nPARKING ACTIVITY LOG");
                println!("{}", "=".repeat(60));
                print!("{}", log.render());
                println!("{}", "=".repeat(60));
            }
            "6" => perform(client, log, session, RemoteAction::Reset).await?,
            "7" => {
                println!("Goodbye! Closing connection...");
                break;
            }
            _ => println!("Invalid choice! Please select 1-7"),
        }
    }
    Ok(())
}
