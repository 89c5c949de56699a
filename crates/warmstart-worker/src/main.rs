use std::path::PathBuf;

use clap::Parser;
use warmstart_config::{AppConfig, ConfigDir};
use warmstart_error_handler::{ErrorHandler, ErrorSink, Theme};
use warmstart_logging::LoggerBuilder;
use warmstart_logging::tracing_subscriber::util::SubscriberInitExt;
use warmstart_server::{Handler, run_as_service, run_directly};
use warmstart_worker::{WorkerConfig, WorkerService};

#[derive(clap::Subcommand, Debug)]
enum Arg {
    /// Run the service under the service manager
    Run,
    /// Print the location and contents of the config file
    Config,
}

#[derive(clap::Parser, Debug)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    arg: Option<Arg>,
    /// Directory holding config.toml. Defaults to the per-user config directory.
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,
}

pub fn main() -> Result<(), ErrorSink> {
    let cli = Cli::parse();
    let label = WorkerService::label();

    let config_dir = match cli.config_dir {
        Some(config_dir) => ConfigDir::Custom(config_dir),
        None => ConfigDir::ProjectDir(label.clone()),
    };
    let config = AppConfig::<WorkerConfig>::load(config_dir)?;

    if let Some(Arg::Config) = cli.arg {
        println!("{}", config.full_path().display());
        println!("{}", config.contents()?);
        return Ok(());
    }

    let snapshot = config.snapshot();
    let _guard = warmstart_logging::init();
    LoggerBuilder::new(label)
        .with_user_config(snapshot.logging.clone())
        .build()?
        .init();

    // Under a service manager nobody reads stderr, so reports go to the log
    // only.
    let as_service = matches!(cli.arg, Some(Arg::Run));
    if as_service {
        ErrorHandler::default()
            .with_theme(Theme::default())
            .with_write_to_stderr(false)
            .with_log(true)
            .install()?;
    } else {
        ErrorHandler::default().install()?;
    }

    let input_data = WorkerConfig::clone(&snapshot);
    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(async move {
        if as_service {
            run_as_service::<WorkerService>(Some(input_data)).await
        } else {
            run_directly::<WorkerService>(Some(input_data)).await
        }
    });

    // The log writers shut down with `_guard`, before `main`'s error is
    // formatted.
    result.map_err(|e| ErrorSink::new(e).log_now())
}
