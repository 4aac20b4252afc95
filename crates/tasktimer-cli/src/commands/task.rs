//! Task management commands for CLI.

use clap::Args;
use crossterm::style::Color;
use tasktimer_core::Config;

use super::{open_store, palette, CmdResult};

#[derive(Args)]
pub struct AddArgs {
    /// Task name
    name: String,
    /// Planned length in minutes (default: timer.default_duration)
    minutes: Option<u32>,
    /// Tag to attach (repeatable)
    #[arg(long = "tag", short = 't', value_name = "TAG")]
    tags: Vec<String>,
    /// Print the created task as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
pub struct ListArgs {
    /// Only tasks carrying this tag (case-insensitive)
    #[arg(long)]
    tag: Option<String>,
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Task ID
    id: u64,
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Task ID
    id: u64,
}

pub fn add(args: AddArgs) -> CmdResult {
    let config = Config::load_or_default();
    let minutes = args.minutes.unwrap_or(config.timer.default_duration);
    let mut store = open_store()?;
    let task = store.add(&args.name, minutes, &args.tags)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&task)?);
        return Ok(());
    }
    let p = palette(&config);
    println!(
        "{} {} {}",
        p.paint("✓ Task added:", Color::Green),
        p.bold(&task.name),
        p.paint(&format!("({} minutes) [id {}]", task.duration_minutes, task.id), Color::Cyan),
    );
    Ok(())
}

pub fn list(args: ListArgs) -> CmdResult {
    let config = Config::load_or_default();
    let store = open_store()?;
    let tasks = store.list(args.tag.as_deref());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }

    let p = palette(&config);
    if tasks.is_empty() {
        match args.tag {
            Some(tag) => println!("{}", p.paint(&format!("No tasks tagged '{tag}'."), Color::Yellow)),
            None => println!("{}", p.paint("No tasks found. Add one with 'add'!", Color::Yellow)),
        }
        return Ok(());
    }

    println!("\n{}", p.bold(&p.paint("📋 Your Tasks:", Color::Blue)));
    println!("{}", p.rule());
    for task in tasks {
        println!("{}", p.task_line(task));
    }
    println!("{}", p.rule());
    Ok(())
}

pub fn show(args: ShowArgs) -> CmdResult {
    let config = Config::load_or_default();
    let store = open_store()?;
    let task = store.get_task(args.id)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(task)?);
        return Ok(());
    }

    let p = palette(&config);
    println!("{}", p.task_line(task));
    println!("  created:   {}", task.created_at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M"));
    if let Some(done) = task.completed_at {
        println!("  completed: {}", done.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M"));
    }
    Ok(())
}

pub fn delete(args: DeleteArgs) -> CmdResult {
    let config = Config::load_or_default();
    let mut store = open_store()?;
    let task = store.delete(args.id)?;
    let p = palette(&config);
    println!(
        "{}",
        p.paint(&format!("✓ Task {} deleted ({})", task.id, task.name), Color::Green)
    );
    Ok(())
}
