//! `start`: the interactive countdown.

use std::io::IsTerminal;
use std::time::Duration;

use clap::Args;
use crossterm::style::Color;
use tasktimer_core::notify;
use tasktimer_core::session::FixedAnswer;
use tasktimer_core::{
    BreakOutcome, BreakPlan, BreakPrompt, Config, Outcome, SessionOrchestrator, SystemClock,
    TickSource,
};

use super::{open_store, palette, CmdResult};
use crate::input::{interrupt_ticker, KeyboardTicker, StdinPrompt};
use crate::render::TerminalRenderer;

const MIN_TICK_MILLIS: u64 = 50;

#[derive(Args)]
pub struct StartArgs {
    /// Task ID
    id: u64,
    /// Offer a break afterwards (MINUTES defaults to timer.default_break)
    #[arg(long = "break", value_name = "MINUTES", num_args = 0..=1)]
    break_minutes: Option<Option<u32>>,
    /// No completion sound
    #[arg(long)]
    silent: bool,
    /// Start the break without asking
    #[arg(long, short = 'y')]
    yes: bool,
}

fn break_plan(arg: Option<Option<u32>>) -> BreakPlan {
    match arg {
        None => BreakPlan::None,
        Some(None) => BreakPlan::Default,
        Some(Some(minutes)) => BreakPlan::Minutes(minutes),
    }
}

pub fn run(args: StartArgs) -> CmdResult {
    let config = Config::load_or_default();
    let mut store = open_store()?;
    let p = palette(&config);

    let interactive = std::io::stdin().is_terminal() && std::io::stdout().is_terminal();
    let ticker: Box<dyn TickSource> = if interactive {
        Box::new(KeyboardTicker)
    } else {
        Box::new(interrupt_ticker()?)
    };
    let prompt: Box<dyn BreakPrompt> = if args.yes {
        Box::new(FixedAnswer(true))
    } else {
        Box::new(StdinPrompt)
    };
    let tick = Duration::from_millis(config.timer.tick_millis.max(MIN_TICK_MILLIS));

    let mut orchestrator = SessionOrchestrator::new(SystemClock, ticker, prompt)
        .with_renderer(Box::new(TerminalRenderer::new(p, interactive)))
        .with_notifier(notify::from_config(&config.notifications, args.silent))
        .with_default_break(config.timer.default_break)
        .with_tick_interval(tick);

    let plan = break_plan(args.break_minutes);
    match orchestrator.start_task(&mut store, args.id, plan)? {
        Outcome::AlreadyCompleted => {
            println!("{}", p.paint(&format!("Task {} is already completed.", args.id), Color::Yellow));
        }
        Outcome::WorkCancelled => {}
        Outcome::Completed { break_outcome } => match break_outcome {
            BreakOutcome::Completed => {
                println!("{}", p.bold(&p.paint("✓ Task and break completed!", Color::Green)));
            }
            BreakOutcome::NotRequested => {
                println!(
                    "\n{}",
                    p.paint("💡 Tip: Use --break to add a break timer after completing a task!", Color::Cyan)
                );
            }
            BreakOutcome::Declined | BreakOutcome::Cancelled => {}
        },
    }
    Ok(())
}
