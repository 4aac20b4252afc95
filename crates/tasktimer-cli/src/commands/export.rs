use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::Args;
use crossterm::style::Color;
use tasktimer_core::{export, Config};

use super::{open_store, palette, CmdResult};

#[derive(Args)]
pub struct ExportArgs {
    /// Output file, or `-` for stdout
    #[arg(default_value = "task_timer_export.csv")]
    path: PathBuf,
}

pub fn run(args: ExportArgs) -> CmdResult {
    let config = Config::load_or_default();
    let store = open_store()?;

    if args.path.as_os_str() == "-" {
        let mut out = std::io::stdout().lock();
        export::write_csv(&mut out, store.tasks())?;
        out.flush()?;
        return Ok(());
    }

    if store.tasks().is_empty() {
        println!("No tasks to export.");
        return Ok(());
    }

    let mut out = BufWriter::new(File::create(&args.path)?);
    let rows = export::write_csv(&mut out, store.tasks())?;
    out.flush()?;

    let p = palette(&config);
    println!(
        "{}",
        p.paint(&format!("✓ Exported {rows} tasks to {}", args.path.display()), Color::Green)
    );
    Ok(())
}
