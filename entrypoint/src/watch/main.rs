use std::{future::pending, process::ExitCode};

use clap::Parser;
use common::locale::NamedLocale;
use strum::IntoEnumIterator;
use tokio::signal::ctrl_c;
use tracing::{error, info};
use utils::{cli::Args, errors::WatchError, logger::configure_logger, watch::Watcher};

#[tokio::main]
async fn main() -> ExitCode {
    configure_logger();

    let args = Args::parse();

    if args.list_locales {
        print_locales();
        return ExitCode::SUCCESS;
    }

    match watch(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn watch(args: Args) -> Result<(), WatchError> {
    let target = args.watch_target()?;
    let schedule = args.schedule()?;
    let fetcher = args.build_fetcher()?;
    let notifier = args.build_notifier().await?;

    let watcher = Watcher::new(fetcher, notifier, target)
        .with_report(args.report);

    let runs = watcher.run(&schedule, args.max_runs, shutdown_signal()).await?;

    info!("Finished after {runs} checks");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = ctrl_c().await {
        // without a signal handler the watcher runs until killed
        error!("Failed to listen for Ctrl-C: {err}");
        pending::<()>().await;
    }
}

fn print_locales() {
    for locale in NamedLocale::iter() {
        let descriptor = locale.descriptor();

        println!(
            "{locale}\tdecimal '{}'\tgrouping '{}'",
            descriptor.decimal_separator(),
            descriptor.grouping_separator()
        );
    }
}
