use clap::{Parser, ValueEnum};
use common::locale::LocaleDescriptor;
use crawler::{
    errors::CrawlerError, html::is_xpath, protected::ProtectedCrawler, traits::PageFetcher,
    unprotected::UnprotectedCrawler,
};
use notifier::{
    DiscordNotifier, desktop::DesktopNotifier, log::LogNotifier, multi::MultiNotifier,
    traits::Notifier,
};
use tracing::{debug, warn};

use crate::{
    errors::WatchError,
    schedule::{Schedule, TimeUnit},
    watch::{ReportFormat, WatchTarget},
};

pub const DISCORD_WEBHOOK_ENV: &str = "PRICE_WATCH_DISCORD_WEBHOOK";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NotifierKind {
    /// Desktop notification (notify-send / osascript)
    Desktop,
    /// Discord webhook message
    Discord,
    /// Log line only
    Log,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FetcherKind {
    /// Plain HTTP request, CSS selectors only
    #[default]
    Http,
    /// Headless Chrome, runs page scripts, CSS or XPath selectors
    Browser,
}

#[derive(Debug, Parser)]
#[command(name = "price_watch", version, about = "Watch prices on e-commerce websites")]
pub struct Args {
    /// URL of the product page
    #[arg(required_unless_present = "list_locales")]
    pub url: Option<String>,

    /// Selector of the element that contains the product's price, CSS or
    /// XPath (XPath needs --fetcher browser)
    #[arg(required_unless_present = "list_locales")]
    pub selector: Option<String>,

    /// Target price to activate a notification
    #[arg(required_unless_present = "list_locales")]
    pub target_price: Option<f64>,

    /// Locale used to read the price, e.g. en_US or pt_BR.UTF-8
    #[arg(short, long, default_value = "en_US.UTF-8")]
    pub locale: String,

    /// Decimal separator, overrides --locale
    #[arg(long, requires = "grouping_separator")]
    pub decimal_separator: Option<char>,

    /// Grouping separator, overrides --locale
    #[arg(long, requires = "decimal_separator")]
    pub grouping_separator: Option<char>,

    /// Check again every N units instead of once
    #[arg(long)]
    pub every: Option<u64>,

    /// Unit of --every
    #[arg(long, value_enum, default_value_t = TimeUnit::Hours)]
    pub unit: TimeUnit,

    /// Stop after this many scheduled checks
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_runs: Option<u64>,

    /// How product pages are loaded
    #[arg(long, value_enum, default_value_t = FetcherKind::Http)]
    pub fetcher: FetcherKind,

    /// Extra request header as NAME:VALUE, can be repeated (http fetcher)
    #[arg(long = "header", value_name = "NAME:VALUE", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Where to send price drop notifications, can be repeated
    #[arg(long = "notifier", value_enum, default_values_t = [NotifierKind::Desktop])]
    pub notifiers: Vec<NotifierKind>,

    /// Discord webhook URL, required by --notifier discord
    #[arg(long, env = DISCORD_WEBHOOK_ENV)]
    pub discord_webhook: Option<String>,

    /// What to print on stdout after every check
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub report: ReportFormat,

    /// Print the known locales and exit
    #[arg(long)]
    pub list_locales: bool,
}

impl Args {
    pub fn locale_descriptor(&self) -> Result<LocaleDescriptor, WatchError> {
        let descriptor = match (self.decimal_separator, self.grouping_separator) {
            (Some(decimal), Some(grouping)) => LocaleDescriptor::new(decimal, grouping)?,
            _ => self.locale.parse::<LocaleDescriptor>()?,
        };

        debug!("Reading prices with {descriptor:?}");

        Ok(descriptor)
    }

    pub fn watch_target(&self) -> Result<WatchTarget, WatchError> {
        let Some(url) = self.url.clone() else {
            return Err(WatchError::MissingArgument("url".into()));
        };

        let Some(selector) = self.selector.clone() else {
            return Err(WatchError::MissingArgument("selector".into()));
        };

        let Some(target_price) = self.target_price else {
            return Err(WatchError::MissingArgument("target_price".into()));
        };

        if !target_price.is_finite() || target_price < 0.0 {
            return Err(WatchError::InvalidTargetPrice(target_price));
        }

        if self.fetcher == FetcherKind::Http && is_xpath(&selector) {
            return Err(CrawlerError::XPathNeedsBrowser(selector).into());
        }

        Ok(WatchTarget {
            url,
            selector,
            target_price,
            locale: self.locale_descriptor()?,
        })
    }

    pub fn schedule(&self) -> Result<Schedule, WatchError> {
        match self.every {
            Some(amount) => Schedule::every(amount, self.unit),
            None => Ok(Schedule::Once),
        }
    }

    pub fn build_fetcher(&self) -> Result<Box<dyn PageFetcher>, WatchError> {
        match self.fetcher {
            FetcherKind::Http => Ok(Box::new(UnprotectedCrawler::with_headers(
                self.headers.clone(),
            )?)),
            FetcherKind::Browser => {
                if !self.headers.is_empty() {
                    warn!("--header only applies to the http fetcher, ignoring it");
                }

                Ok(Box::new(ProtectedCrawler::new()?))
            }
        }
    }

    /// Builds the requested notifiers, wrapping them when there is more than one.
    pub async fn build_notifier(&self) -> Result<Box<dyn Notifier>, WatchError> {
        let mut kinds: Vec<NotifierKind> = Vec::new();
        let mut notifiers: Vec<Box<dyn Notifier>> = Vec::new();

        for kind in self.notifiers.iter().copied() {
            if kinds.contains(&kind) {
                continue;
            }
            kinds.push(kind);

            let notifier: Box<dyn Notifier> = match kind {
                NotifierKind::Desktop => Box::new(DesktopNotifier::new()),
                NotifierKind::Log => Box::new(LogNotifier),
                NotifierKind::Discord => {
                    let Some(webhook) = self.discord_webhook.clone() else {
                        return Err(WatchError::MissingArgument(format!(
                            "--discord-webhook or {DISCORD_WEBHOOK_ENV}"
                        )));
                    };

                    Box::new(DiscordNotifier::new(webhook).await?)
                }
            };

            notifiers.push(notifier);
        }

        match notifiers.len() {
            0 => Err(WatchError::MissingArgument("--notifier".into())),
            1 => Ok(notifiers.remove(0)),
            _ => Ok(Box::new(MultiNotifier::new(notifiers))),
        }
    }
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    let Some((name, value)) = raw.split_once(':') else {
        return Err(format!("expected NAME:VALUE, got '{raw}'"));
    };

    let name = name.trim();

    if name.is_empty() {
        return Err(format!("header name is empty in '{raw}'"));
    }

    Ok((name.to_string(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use common::errors::LocaleError;

    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("price_watch").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn positional_arguments() {
        let args = parse(&["https://shop.example/item", "#price", "1200"]);
        let target = args.watch_target().unwrap();

        assert_eq!(target.url, "https://shop.example/item");
        assert_eq!(target.selector, "#price");
        assert_eq!(target.target_price, 1200.0);
        assert_eq!(target.locale, LocaleDescriptor::default());
        assert_eq!(args.schedule().unwrap(), Schedule::Once);
        assert_eq!(args.notifiers, vec![NotifierKind::Desktop]);
        assert_eq!(args.report, ReportFormat::Text);
    }

    #[test]
    fn locale_flag() {
        let args = parse(&["https://loja.example", ".preco", "3500", "-l", "pt_BR.UTF-8"]);

        assert_eq!(
            args.locale_descriptor().unwrap(),
            LocaleDescriptor::COMMA_DECIMAL
        );
    }

    #[test]
    fn unknown_locale_is_an_error() {
        let args = parse(&["https://shop.example", "#price", "10", "--locale", "xx_XX"]);

        assert!(matches!(
            args.locale_descriptor(),
            Err(WatchError::Locale(LocaleError::UnknownLocale(_)))
        ));
    }

    #[test]
    fn separator_overrides() {
        let args = parse(&[
            "https://shop.example",
            "#price",
            "10",
            "--decimal-separator",
            ",",
            "--grouping-separator",
            ".",
        ]);

        assert_eq!(
            args.locale_descriptor().unwrap(),
            LocaleDescriptor::COMMA_DECIMAL
        );

        let args = parse(&[
            "https://shop.example",
            "#price",
            "10",
            "--decimal-separator",
            ",",
            "--grouping-separator",
            ",",
        ]);

        assert!(matches!(
            args.locale_descriptor(),
            Err(WatchError::Locale(LocaleError::SameSeparators(',')))
        ));
    }

    #[test]
    fn separators_must_come_in_pairs() {
        let result = Args::try_parse_from([
            "price_watch",
            "https://shop.example",
            "#price",
            "10",
            "--decimal-separator",
            ",",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn repeating_schedule() {
        let args = parse(&[
            "https://shop.example",
            "#price",
            "10",
            "--every",
            "30",
            "--unit",
            "minutes",
            "--max-runs",
            "4",
        ]);

        assert_eq!(
            args.schedule().unwrap(),
            Schedule::Every {
                amount: 30,
                unit: TimeUnit::Minutes
            }
        );
        assert_eq!(args.max_runs, Some(4));

        let args = parse(&["https://shop.example", "#price", "10", "--every", "0"]);
        assert!(args.schedule().is_err());
    }

    #[test]
    fn positionals_required_unless_listing() {
        assert!(Args::try_parse_from(["price_watch", "https://shop.example"]).is_err());

        let args = parse(&["--list-locales"]);
        assert!(args.list_locales);
        assert!(matches!(
            args.watch_target(),
            Err(WatchError::MissingArgument(_))
        ));
    }

    #[tokio::test]
    async fn builds_requested_notifiers() {
        let args = parse(&[
            "https://shop.example",
            "#price",
            "10",
            "--notifier",
            "log",
            "--notifier",
            "desktop",
        ]);

        assert!(args.build_notifier().await.is_ok());
    }

    #[tokio::test]
    async fn discord_needs_a_webhook() {
        let mut args = parse(&["https://shop.example", "#price", "10", "--notifier", "discord"]);
        args.discord_webhook = None;

        assert!(matches!(
            args.build_notifier().await,
            Err(WatchError::MissingArgument(_))
        ));
    }

    #[test]
    fn max_runs_must_be_positive() {
        let result = Args::try_parse_from([
            "price_watch",
            "https://shop.example",
            "#price",
            "10",
            "--every",
            "1",
            "--max-runs",
            "0",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn rejects_unusable_target_prices() {
        for bad in [f64::NAN, f64::INFINITY, -1.0] {
            let mut args = parse(&["https://shop.example", "#price", "10"]);
            args.target_price = Some(bad);

            assert!(matches!(
                args.watch_target(),
                Err(WatchError::InvalidTargetPrice(_))
            ));
        }

        let args = parse(&["https://shop.example", "#price", "0"]);
        assert_eq!(args.watch_target().unwrap().target_price, 0.0);
    }

    #[test]
    fn xpath_needs_browser_fetcher() {
        let args = parse(&["https://shop.example", "//span[@id='price']", "10"]);

        assert!(matches!(
            args.watch_target(),
            Err(WatchError::Crawler(CrawlerError::XPathNeedsBrowser(_)))
        ));

        let args = parse(&[
            "https://shop.example",
            "//span[@id='price']",
            "10",
            "--fetcher",
            "browser",
        ]);

        assert_eq!(args.fetcher, FetcherKind::Browser);
        assert_eq!(args.watch_target().unwrap().selector, "//span[@id='price']");
    }

    #[test]
    fn repeated_headers() {
        let args = parse(&[
            "https://shop.example",
            "#price",
            "10",
            "--header",
            "Accept-Language: pt-BR",
            "--header",
            "Cookie:region=sp",
        ]);

        assert_eq!(
            args.headers,
            vec![
                ("Accept-Language".to_string(), "pt-BR".to_string()),
                ("Cookie".to_string(), "region=sp".to_string()),
            ]
        );
        assert!(args.build_fetcher().is_ok());

        assert!(
            Args::try_parse_from(["price_watch", "https://shop.example", "#price", "10", "--header", "Cookie"])
                .is_err()
        );
    }

    #[test]
    fn invalid_header_fails_fetcher_construction() {
        let args = parse(&[
            "https://shop.example",
            "#price",
            "10",
            "--header",
            "Accept Language:pt-BR",
        ]);

        assert!(matches!(
            args.build_fetcher(),
            Err(WatchError::Crawler(CrawlerError::UnprotectedClientInvalidHeader))
        ));
    }

    #[tokio::test]
    async fn empty_notifier_list_is_an_error() {
        let mut args = parse(&["https://shop.example", "#price", "10"]);
        args.notifiers = Vec::new();

        assert!(matches!(
            args.build_notifier().await,
            Err(WatchError::MissingArgument(_))
        ));
    }
}
