use clap::ValueEnum;
use common::{check::PriceCheck, locale::LocaleDescriptor, price::normalize};
use crawler::traits::PageFetcher;
use notifier::traits::{Notification, Notifier};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, error, info, warn};

use crate::{errors::WatchError, schedule::Schedule};

#[derive(Debug, Clone, PartialEq)]
pub struct WatchTarget {
    pub url: String,
    pub selector: String,
    pub target_price: f64,
    pub locale: LocaleDescriptor,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Print the scraped price only
    #[default]
    Text,
    /// Print every check as a JSON line
    Json,
    /// Print nothing, rely on logs and notifications
    Quiet,
}

/// Fetches the price, compares it against the target and notifies when it
/// dropped. One call is one independent check.
pub async fn check_price(
    fetcher: &dyn PageFetcher,
    notifier: &dyn Notifier,
    target: &WatchTarget,
) -> Result<PriceCheck, WatchError> {
    let element = fetcher.fetch_text(&target.url, &target.selector).await?;

    debug!("Raw price text: '{}'", element.text);

    let actual_price = normalize(&element.text, &target.locale)?;

    let title = if element.title.is_empty() {
        target.url.clone()
    } else {
        element.title
    };

    info!("Current price of '{}' is {}", title, actual_price);

    let check = PriceCheck::new(title, actual_price, target.target_price);

    if check.is_reduced() {
        info!("Price at or below target price {}", target.target_price);

        let notification =
            Notification::new(check.notification_title(), check.notification_message());
        notifier.notify(&notification).await?;
    } else {
        info!("Price higher than target price {}", target.target_price);
    }

    Ok(check)
}

pub struct Watcher {
    fetcher: Box<dyn PageFetcher>,
    notifier: Box<dyn Notifier>,
    target: WatchTarget,
    report: ReportFormat,
}

impl Watcher {
    pub fn new(
        fetcher: Box<dyn PageFetcher>,
        notifier: Box<dyn Notifier>,
        target: WatchTarget,
    ) -> Self {
        Self {
            fetcher,
            notifier,
            target,
            report: ReportFormat::default(),
        }
    }

    pub fn with_report(mut self, report: ReportFormat) -> Self {
        self.report = report;

        self
    }

    pub async fn check(&self) -> Result<PriceCheck, WatchError> {
        let check = check_price(self.fetcher.as_ref(), self.notifier.as_ref(), &self.target).await?;

        match self.report {
            ReportFormat::Text => println!("{}", check.actual_price),
            ReportFormat::Json => println!("{}", serde_json::to_string(&check)?),
            ReportFormat::Quiet => {}
        }

        Ok(check)
    }

    /// Runs the checks `schedule` asks for and returns how many were done.
    ///
    /// A single run returns any error. Repeated runs log recoverable errors
    /// and wait for the next tick, fatal ones end the loop. `shutdown`
    /// is only polled between checks.
    pub async fn run<F>(
        &self,
        schedule: &Schedule,
        max_runs: Option<u64>,
        shutdown: F,
    ) -> Result<u64, WatchError>
    where
        F: Future<Output = ()>,
    {
        if max_runs == Some(0) {
            info!("No checks requested, stopping");
            return Ok(0);
        }

        let Some(period) = schedule.period() else {
            self.check().await?;
            return Ok(1);
        };

        info!("Checking {} every {}", self.target.url, schedule);

        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tokio::pin!(shutdown);

        let mut runs: u64 = 0;

        loop {
            tokio::select! {
                biased;

                _ = &mut shutdown => {
                    info!("Shutdown requested after {runs} checks");
                    return Ok(runs);
                }
                _ = ticker.tick() => {}
            }

            runs += 1;

            match self.check().await {
                Ok(_) => {}
                Err(err) if err.is_fatal() => {
                    error!("Check {runs} failed, stopping: {err}");
                    return Err(err);
                }
                Err(err) => warn!("Check {runs} failed, next check in {schedule}: {err}"),
            }

            if max_runs.is_some_and(|max| runs >= max) {
                info!("Reached {runs} checks, stopping");
                return Ok(runs);
            }
        }
    }
}
