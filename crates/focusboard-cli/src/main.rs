use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "focusboard", version, about = "Focusboard study dashboard CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Focus timer
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Daily and per-subject statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Subject catalog
    Subject {
        #[command(subcommand)]
        action: commands::subject::SubjectAction,
    },
    /// Task list
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Light/dark theme preference
    Theme {
        #[command(subcommand)]
        action: commands::theme::ThemeAction,
    },
    /// Print a motivational quote
    Quote,
    /// Guided breathing exercise
    Breathe {
        /// Number of inhale/hold/exhale cycles
        #[arg(long, default_value = "3")]
        cycles: u32,
        /// Phase length in milliseconds
        #[arg(long, default_value = "4000", hide = true)]
        phase_ms: u64,
    },
    /// Play the memory matching game
    Memory,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print a shell completion script
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("FOCUSBOARD_LOG")
        .unwrap_or_else(|_| EnvFilter::new("focusboard=warn,focusboard_core=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Subject { action } => commands::subject::run(action),
        Commands::Task { action } => commands::task::run(action),
        Commands::Theme { action } => commands::theme::run(action),
        Commands::Quote => commands::quote::run(),
        Commands::Breathe { cycles, phase_ms } => commands::breathe::run(cycles, phase_ms),
        Commands::Memory => commands::memory::run(),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "focusboard",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
