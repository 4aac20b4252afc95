use clap::Subcommand;
use tasktimer_core::Config;

use super::CmdResult;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value by dot-separated key (e.g. timer.default_break)
    Get {
        key: String,
    },
    /// Set a config value
    Set {
        key: String,
        value: String,
    },
    /// List all config values
    List,
    /// Print the config file location
    Path,
}

pub fn run(action: ConfigAction) -> CmdResult {
    match action {
        ConfigAction::Get { key } => {
            let cfg = Config::load()?;
            match cfg.get(&key) {
                Some(val) => println!("{val}"),
                None => return Err(format!("unknown config key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let path = Config::path()?;
            let mut cfg = Config::load_from(&path)?;
            cfg.set(&key, &value)?;
            cfg.save_to(&path)?;
            println!("{key} = {value}");
        }
        ConfigAction::List => {
            let cfg = Config::load()?;
            for (key, value) in cfg.entries() {
                println!("{key} = {value}");
            }
        }
        ConfigAction::Path => {
            println!("{}", Config::path()?.display());
        }
    }
    Ok(())
}
