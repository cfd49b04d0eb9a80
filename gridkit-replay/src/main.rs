use std::process::ExitCode;

use clap::Parser;
use gridkit_replay::cli::Args;
use gridkit_replay::config::ReplayConfig;
use gridkit_replay::fixture::{Fixture, load_script};
use gridkit_replay::{ReplayError, paths, replay};
use log::info;
use simplelog::{
    ColorChoice, CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

fn init_logging(config: &ReplayConfig, level: LevelFilter) {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level.min(LevelFilter::Warn),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    if config.log_to_file {
        paths::rotate_logs();
        if let Some(path) = paths::log_file() {
            match paths::create_log_file(&path) {
                Ok(file) => loggers.push(WriteLogger::new(level, Config::default(), file)),
                Err(e) => eprintln!("Warning: cannot create log file {}: {}", path.display(), e),
            }
        }
    }

    if let Err(e) = CombinedLogger::init(loggers) {
        eprintln!("Warning: failed to initialize logger: {}", e);
    }
}

fn run(args: &Args, config: &ReplayConfig) -> Result<String, ReplayError> {
    let fixture = Fixture::load(&args.fixture)?;
    let steps = match &args.script {
        Some(path) => load_script(path)?,
        None => Vec::new(),
    };
    info!(
        "replaying {} steps against '{}'",
        steps.len(),
        args.fixture.display()
    );
    let report = replay::run(&fixture, &steps)?;
    Ok(report.render(config.column_width))
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match ReplayConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let level = match config.level(args.log_level.as_deref()) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config, level);

    match run(&args, &config) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            info!("replay failed: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
