//! Run the monthly Bonusly giving-balance lottery once.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::sync::Arc;

use bonus_lottery::config::{LotteryConfig, LotterySettings};
use bonus_lottery::domain::{MonthlyLotteryService, RunOutcome};
use bonus_lottery::outbound::bonusly::BonuslyHttpClient;
use color_eyre::eyre::{Context, Result, eyre};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    runtime.block_on(async_main())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(error) = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        warn!(error = %error, "tracing init failed");
    }
}

async fn async_main() -> Result<()> {
    let settings = LotterySettings::load_from_iter(std::env::args_os())
        .map_err(|error| eyre!("load settings: {error}"))?;
    let LotteryConfig {
        token,
        api_base_url,
        request_timeout,
        rules,
    } = settings.resolve().wrap_err("invalid configuration")?;

    let client = BonuslyHttpClient::new(api_base_url, token, request_timeout)
        .wrap_err("create Bonusly HTTP client")?;
    let service = MonthlyLotteryService::new(Arc::new(client), Arc::new(DefaultClock), rules);

    match service.run().await.wrap_err("lottery run failed")? {
        RunOutcome::Skipped { days_left } => {
            println!("status=skipped");
            println!("days_left={days_left}");
        }
        RunOutcome::Completed(report) => {
            println!("status=completed");
            println!("initial_balance={}", report.initial_balance);
            println!("awards={}", report.awards.len());
            println!("awarded={}", report.total_awarded());
            println!("remaining_balance={}", report.remaining_balance);
        }
    }

    Ok(())
}
