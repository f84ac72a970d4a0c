use std::env;
use std::fs::File;

use anyhow::Context;
use clap::Parser;
use env_logger::{Env, Target};
use log::LevelFilter;

use recipe_finder::cli::{self, Cli};
use recipe_finder::ui::{run_app, App};
use recipe_finder::{FinderConfig, RecipeFinder};

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let config = FinderConfig::load().context("failed to load configuration")?;
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let mut finder = RecipeFinder::from_config(&config).context("failed to create HTTP client")?;

    let Some(command) = args.command else {
        init_tui_logging();
        let mut app = App::new(finder, runtime.handle().clone());
        app.start();
        return run_app(&mut app);
    };

    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let output = runtime.block_on(cli::run(&command, &mut finder))?;
    println!("{}", output);
    Ok(())
}

/// Log to a file while the terminal is in raw mode; stderr would corrupt the screen.
fn init_tui_logging() {
    let path = env::temp_dir().join("recipe-finder.log");
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    match File::create(&path) {
        Ok(file) => {
            builder.target(Target::Pipe(Box::new(file)));
        }
        Err(_) => {
            builder.filter_level(LevelFilter::Off);
        }
    }
    builder.init();
}
