use std::path::PathBuf;

/// Long-range projection flow explorer
#[derive(clap::Parser, Debug)]
#[command(name = "projflow", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// JSON settings file overriding the built-in defaults
    #[arg(long, global = true, value_hint = clap::ValueHint::FilePath, env = "PROJFLOW_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Download the projection recipe archive
    #[cfg(feature = "download")]
    Download(DownloadArgs),

    /// List target regions in a recipe
    Regions(RegionsArgs),

    /// Build a flow graph for one target region (JSON output)
    Flow(FlowArgs),
}

#[cfg(feature = "download")]
#[derive(clap::Args, Debug)]
pub struct DownloadArgs {
    /// Output location (directory), defaults to "."
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Archive URL, defaults to the configured recipe URL
    #[arg(long)]
    pub url: Option<String>,

    /// Overwrite if the file exists
    #[arg(long)]
    pub force: bool,
}

#[derive(clap::Args, Debug)]
pub struct RegionsArgs {
    /// Recipe file (.yaml) or archive (.zip)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub recipe: PathBuf,

    /// Recipe entry inside a .zip archive, defaults to the configured entry
    #[arg(long)]
    pub entry: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct FlowArgs {
    /// Recipe file (.yaml) or archive (.zip)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub recipe: PathBuf,

    /// Recipe entry inside a .zip archive, defaults to the configured entry
    #[arg(long)]
    pub entry: Option<String>,

    /// Target region, defaults to the configured region
    #[arg(short, long)]
    pub region: Option<String>,

    /// Level as "LAYERS:GROUPING", e.g. "With layers:By region" (repeatable)
    #[arg(short, long = "level")]
    pub levels: Vec<String>,

    /// Minimum edge value (exclusive)
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// JSON color configuration (BrainParcellation + Colors)
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub colors: Option<PathBuf>,

    /// Output file, defaults to stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}
