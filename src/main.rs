use chrono::{Local, Timelike};
use elpris_clock::advisor;
use elpris_clock::analyzer::AnalyzerImpl;
use elpris_clock::config::{AppConfig, load_config};
use elpris_clock::dashboard::{FrameWriter, RegionBoard, refresh_region, render_tick};
use elpris_clock::fetcher::ElprisClient;
use elpris_clock::render::SvgRenderer;
use futures::future::join_all;
use std::sync::Arc;
use tokio::time::{Duration, MissedTickBehavior, interval, sleep};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("😱 Panic occurred: {:?}", panic_info);
    }));

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    let config: Arc<AppConfig> = match load_config(&config_path) {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            error!("Config load error ({}): {}", config_path, e);
            return;
        }
    };

    let source = match ElprisClient::new(&config.api_endpoint) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to create price client: {}", e);
            return;
        }
    };
    let advisor = match advisor::from_config(&config) {
        Ok(a) => a,
        Err(e) => {
            error!("Failed to create advisory client: {}", e);
            return;
        }
    };

    let analyzer = AnalyzerImpl::from_config(&config);
    let boards: Vec<Arc<RegionBoard>> = config
        .regions
        .iter()
        .map(|region| Arc::new(RegionBoard::new(region, &analyzer)))
        .collect();

    info!("🚀 Price clock started for regions: {}", config.regions.join(", "));

    // Clock tick: pointer and re-render only
    let tick_boards = boards.clone();
    let mut writer = FrameWriter::new(SvgRenderer::new(config.geometry()), &config.output_dir);
    let clock = tokio::spawn(async move {
        let mut ticker = interval(Duration::from_secs(1));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            let hour = Local::now().hour();
            render_tick(&tick_boards, &analyzer, &mut writer, hour).await;
        }
    });

    // Data refresh loop
    loop {
        let today = Local::now().date_naive();
        let tasks: Vec<_> = boards
            .iter()
            .map(|board| {
                refresh_region(
                    board.clone(),
                    today,
                    &source,
                    &analyzer,
                    advisor.clone(),
                    config.ai_prompt.clone(),
                )
            })
            .collect();
        join_all(tasks).await;

        info!("Waiting {}s for the next refresh...", config.update_interval_seconds);
        tokio::select! {
            _ = sleep(Duration::from_secs(config.update_interval_seconds)) => {
                info!("Refresh timer triggered.");
            }
            _ = tokio::signal::ctrl_c() => {
                info!("🛑 Shutting down.");
                break;
            }
        }
    }

    clock.abort();
}
