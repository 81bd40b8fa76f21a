use anyhow::Result;
use console::style;
use log::{info, warn};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use wallpaper_organize::component::AutoMoveByResolution;
use wallpaper_organize::config::Config;
use wallpaper_organize::init;

fn main() -> ExitCode {
    init::init();

    let args: Vec<_> = env::args_os().skip(1).collect();
    let [target] = args.as_slice() else {
        eprintln!("Usage: wallpaper_organize <path_to_wallpaper_folder>");
        return ExitCode::FAILURE;
    };

    match run(PathBuf::from(target)) {
        Ok(()) => {
            info!("Program exited normally");
            ExitCode::SUCCESS
        }
        Err(e) => {
            warn!("Program error: {e:#}");
            eprintln!("{} {}", style("Error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(directory: PathBuf) -> Result<()> {
    let config = Config::new()?;
    let organizer = AutoMoveByResolution::new(config);
    organizer.run(&directory)?;
    Ok(())
}
