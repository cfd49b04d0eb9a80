use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "gridkit-replay",
    version,
    about = "Replay table interactions against a fixture",
    long_about = "Builds a sortable, filterable table from a JSON fixture, replays a script of \
                  interactions through the page dispatcher and prints the rows left visible.\n\n\
                  Examples:\n  gridkit-replay fixtures/recommendations.json\n  \
                  gridkit-replay fixtures/recommendations.json --script fixtures/recommendations.script.json"
)]
pub struct Args {
    #[arg(value_name = "FIXTURE", help = "Table fixture (JSON).")]
    pub fixture: PathBuf,

    #[arg(
        short = 's',
        long = "script",
        value_name = "FILE",
        help = "JSON list of steps to replay."
    )]
    pub script: Option<PathBuf>,

    #[arg(
        short = 'l',
        long = "log-level",
        value_name = "LEVEL",
        help = "Log level (off, error, warn, info, debug, trace); overrides the config file."
    )]
    pub log_level: Option<String>,

    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to config file (defaults to <config dir>/config.json)."
    )]
    pub config: Option<PathBuf>,
}
