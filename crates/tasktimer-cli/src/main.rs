use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing_subscriber::EnvFilter;

mod commands;
mod input;
mod render;

#[derive(Parser)]
#[command(
    name = "tasktimer",
    version,
    about = "Task timer -- countdowns, breaks and completion stats"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a task
    Add(commands::task::AddArgs),
    /// List tasks
    List(commands::task::ListArgs),
    /// Show one task
    Show(commands::task::ShowArgs),
    /// Delete a task
    Delete(commands::task::DeleteArgs),
    /// Run the countdown for a task, optionally followed by a break
    Start(commands::timer::StartArgs),
    /// Completion statistics
    Stats(commands::stats::StatsArgs),
    /// Export all tasks as CSV
    Export(commands::export::ExportArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("TASKTIMER_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Add(args) => commands::task::add(args),
        Commands::List(args) => commands::task::list(args),
        Commands::Show(args) => commands::task::show(args),
        Commands::Delete(args) => commands::task::delete(args),
        Commands::Start(args) => commands::timer::run(args),
        Commands::Stats(args) => commands::stats::run(args),
        Commands::Export(args) => commands::export::run(args),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "tasktimer", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
