mod cmd_cfd;
mod cmd_config;
mod cmd_forecast;
mod cmd_scatter;
mod cmd_throughput;
mod input;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use flowcast_derive::Interval;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "flowcast",
    version,
    about = "Flow metrics and delivery forecasts from issue exports"
)]
struct Cli {
    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    cmd: Command,
}

/// Options shared by every report command.
#[derive(Args, Clone, Debug)]
pub struct Source {
    /// JSON file holding an array of issue snapshots
    #[arg(long, default_value = "issues.json")]
    pub issues: PathBuf,
    /// Indent the JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Cumulative flow table
    Cfd {
        #[command(flatten)]
        source: Source,
        /// First day of the chart (YYYY-MM-DD, exclusive)
        #[arg(long)]
        from: Option<String>,
        /// Last day of the chart (YYYY-MM-DD, exclusive)
        #[arg(long)]
        to: Option<String>,
        /// Chart the children of one epic instead of every story
        #[arg(long)]
        epic: Option<String>,
    },
    /// Cycle time scatterplot with percentile bands
    Scatter {
        #[command(flatten)]
        source: Source,
        /// Start of the completion window (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End of the completion window (YYYY-MM-DD, exclusive)
        #[arg(long)]
        to: Option<String>,
        /// Drop cycle times outside the Tukey fences
        #[arg(long)]
        exclude_outliers: bool,
    },
    /// Completed issues per interval
    Throughput {
        #[command(flatten)]
        source: Source,
        /// Start of the completion window (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End of the completion window (YYYY-MM-DD, exclusive)
        #[arg(long)]
        to: Option<String>,
        /// Bucket size: daily, weekly, biweekly, monthly
        #[arg(long)]
        interval: Option<Interval>,
    },
    /// Monte Carlo forecast of when a backlog will be done
    Forecast {
        #[command(flatten)]
        source: Source,
        /// Number of items left to deliver
        #[arg(long)]
        backlog: usize,
        /// Start of the history window (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End of the history window (YYYY-MM-DD, exclusive)
        #[arg(long)]
        to: Option<String>,
        /// Number of simulated trials
        #[arg(long)]
        trials: Option<usize>,
        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
        /// Print the percentile table instead of the full report
        #[arg(long)]
        table: bool,
    },
    /// Manage report settings (.flowcast/config.json)
    Config {
        #[command(subcommand)]
        cmd: cmd_config::ConfigCmd,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let cwd = std::env::current_dir()?;

    match cli.cmd {
        Command::Cfd {
            source,
            from,
            to,
            epic,
        } => cmd_cfd::execute(&source, from.as_deref(), to.as_deref(), epic),
        Command::Scatter {
            source,
            from,
            to,
            exclude_outliers,
        } => cmd_scatter::execute(
            &cwd,
            &source,
            from.as_deref(),
            to.as_deref(),
            exclude_outliers,
        ),
        Command::Throughput {
            source,
            from,
            to,
            interval,
        } => cmd_throughput::execute(&cwd, &source, from.as_deref(), to.as_deref(), interval),
        Command::Forecast {
            source,
            backlog,
            from,
            to,
            trials,
            seed,
            table,
        } => cmd_forecast::execute(
            &cwd,
            &source,
            cmd_forecast::Overrides {
                backlog,
                from,
                to,
                trials,
                seed,
                table,
            },
        ),
        Command::Config { cmd } => cmd_config::run(cmd, &cwd),
    }
}
