use clap::Args;
use crossterm::style::Color;
use tasktimer_core::Config;

use super::{open_store, palette, CmdResult};

#[derive(Args)]
pub struct StatsArgs {
    /// Restrict the numbers to one tag
    #[arg(long)]
    tag: Option<String>,
    #[arg(long)]
    json: bool,
}

pub fn run(args: StatsArgs) -> CmdResult {
    let config = Config::load_or_default();
    let store = open_store()?;
    let stats = store.stats(args.tag.as_deref());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    let p = palette(&config);
    let title = match &stats.tag {
        Some(tag) => format!("📊 Statistics for '{tag}':"),
        None => "📊 Your Statistics:".to_string(),
    };
    println!("\n{}", p.bold(&p.paint(&title, Color::Blue)));
    println!("{}", p.rule());
    println!("Total tasks: {}", p.bold(&p.paint(&stats.total.to_string(), Color::Cyan)));
    println!("Completed: {}", p.bold(&p.paint(&stats.completed.to_string(), Color::Green)));
    println!("Pending: {}", p.bold(&p.paint(&stats.pending.to_string(), Color::Yellow)));
    println!(
        "Total time spent: {}",
        p.bold(&p.paint(&format!("{} minutes", stats.total_completed_minutes), Color::Magenta))
    );

    if let Some(by_tag) = stats.by_tag.as_ref().filter(|m| !m.is_empty()) {
        println!("{}", p.rule());
        println!("{}", p.bold("By tag:"));
        for (tag, t) in by_tag {
            println!(
                "  {:<16} {}/{} done, {} min",
                p.paint(tag, Color::Cyan),
                t.completed,
                t.total,
                t.completed_minutes
            );
        }
    }
    println!("{}", p.rule());
    Ok(())
}
