use clap::{Parser, Subcommand};
use escapify::{codec, Side, SyncConfig, SyncController, SyncEvent, INVALID_INPUT_MESSAGE};
use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "escapify")]
#[command(about = "escapify - JSON string literal ↔ raw text converter", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a JSON string literal into raw text
    Decode {
        /// Input file path (use '-' or omit for stdin)
        input: Option<String>,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Encode raw text as a JSON string literal
    Encode {
        /// Input file path (use '-' or omit for stdin)
        input: Option<String>,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Drop one trailing newline from the input before encoding
        #[arg(short = 'n', long)]
        strip_newline: bool,
    },
    /// Drive an interactive sync session from line-based events on stdin
    Session {
        /// Session config file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Re-derive the other side as soon as a side gains focus
        #[arg(long)]
        resync_on_focus: bool,
    },
}

/// One line of input to `escapify session`.
#[derive(Debug, PartialEq, Eq)]
enum SessionCommand {
    Event(SyncEvent),
    State,
    Reset,
    Quit,
}

fn parse_session_line(line: &str) -> Result<Option<SessionCommand>, String> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Ok(None);
    }

    let (keyword, rest) = match line.split_once(' ') {
        Some((keyword, rest)) => (keyword, rest),
        None => (line, ""),
    };

    let command = match keyword {
        "escaped" => SessionCommand::Event(SyncEvent::EscapedChanged(rest.to_string())),
        "raw" => SessionCommand::Event(SyncEvent::RawChanged(rest.to_string())),
        "focus" => SessionCommand::Event(SyncEvent::Focus(rest.parse::<Side>()?)),
        "state" => SessionCommand::State,
        "reset" => SessionCommand::Reset,
        "quit" | "exit" => SessionCommand::Quit,
        other => return Err(format!("Unknown command '{}'", other)),
    };

    Ok(Some(command))
}

fn read_input(input: Option<&str>) -> Result<String, Box<dyn std::error::Error>> {
    match input {
        None | Some("-") => {
            tracing::debug!("reading from stdin");
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
        Some(path) => {
            tracing::debug!(path, "reading from file");
            Ok(fs::read_to_string(path)?)
        }
    }
}

fn write_output(output: Option<PathBuf>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(output_path) = output {
        tracing::debug!(path = ?output_path, "writing to file");
        fs::write(output_path, content)?;
    } else {
        let mut stdout = io::stdout();
        stdout.write_all(content.as_bytes())?;
        stdout.flush()?;
    }
    Ok(())
}

fn run_decode(input: Option<String>, output: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let escaped = read_input(input.as_deref())?;
    tracing::info!(bytes = escaped.len(), "decoding");

    let raw = codec::decode(&escaped).map_err(|e| {
        tracing::debug!(error = %e, "decode failed");
        format!("{} ({})", INVALID_INPUT_MESSAGE, e)
    })?;

    write_output(output, &raw)
}

fn run_encode(
    input: Option<String>,
    output: Option<PathBuf>,
    strip_newline: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut raw = read_input(input.as_deref())?;
    if strip_newline {
        if raw.ends_with("\r\n") {
            raw.truncate(raw.len() - 2);
        } else if raw.ends_with('\n') {
            raw.pop();
        }
    }
    tracing::info!(bytes = raw.len(), "encoding");

    write_output(output, &codec::encode(&raw))
}

fn run_session(config: Option<PathBuf>, resync_on_focus: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match config {
        Some(path) => SyncConfig::load(path)?,
        None => SyncConfig::default(),
    };
    config.resync_on_focus |= resync_on_focus;

    let mut controller = SyncController::with_config(&config);
    tracing::info!(direction = %controller.direction(), "session started");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    print_state(&mut stdout, &controller)?;

    for line in stdin.lock().lines() {
        let line = line?;
        match parse_session_line(&line) {
            Ok(None) => continue,
            Ok(Some(SessionCommand::Quit)) => break,
            Ok(Some(SessionCommand::Event(event))) => controller.apply(event),
            Ok(Some(SessionCommand::Reset)) => controller.reset(),
            Ok(Some(SessionCommand::State)) => {}
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        }
        print_state(&mut stdout, &controller)?;
    }

    tracing::info!("session ended");
    Ok(())
}

fn print_state(out: &mut impl Write, controller: &SyncController) -> Result<(), Box<dyn std::error::Error>> {
    serde_json::to_writer(&mut *out, &controller.state())?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Decode { input, output } => run_decode(input, output),
        Commands::Encode { input, output, strip_newline } => run_encode(input, output, strip_newline),
        Commands::Session { config, resync_on_focus } => run_session(config, resync_on_focus),
    }
}
