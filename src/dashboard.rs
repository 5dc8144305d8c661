// Refresh and render glue: everything here does I/O, the analyzer does not.
use crate::advisor::Advisor;
use crate::advisor::prompt::build_prompt;
use crate::analyzer::{Analyzer, AnalyzerImpl};
use crate::fetcher::PriceSource;
use crate::model::{Frame, RenderError};
use crate::render::{SvgRenderer, render_report};
use crate::state::{Snapshot, SnapshotCell};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// One region's clock: its name and current snapshot.
pub struct RegionBoard {
    pub region: String,
    pub cell: SnapshotCell,
    generation: AtomicU64,
}

impl RegionBoard {
    pub fn new(region: &str, analyzer: &AnalyzerImpl) -> Self {
        Self {
            region: region.to_string(),
            cell: SnapshotCell::new(Snapshot::empty(region, analyzer.currency)),
            generation: AtomicU64::new(0),
        }
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// Fetches `date` for the board's region and publishes a new snapshot.
/// A fetch failure keeps the previous snapshot. If an advisor is given and
/// there is data, the advisory request runs in the background and the
/// returned handle resolves once it has been attached (or dropped).
pub async fn refresh_region(
    board: Arc<RegionBoard>,
    date: NaiveDate,
    source: &dyn PriceSource,
    analyzer: &AnalyzerImpl,
    advisor: Option<Arc<dyn Advisor>>,
    ai_prompt: Option<String>,
) -> Option<JoinHandle<()>> {
    info!("Refreshing prices for {} ({})", board.region, date);
    let record = match source.fetch_day(date, &board.region).await {
        Ok(record) => record,
        Err(e) => {
            warn!("Fetch failed for {}: {}", board.region, e);
            return None;
        }
    };

    let generation = board.next_generation();
    let snapshot = analyzer.snapshot(&board.region, date, generation, record);
    let valid_hours = snapshot.series.len();
    let prompt = snapshot
        .has_data()
        .then(|| build_prompt(&snapshot.series, snapshot.currency.unit(), ai_prompt.as_deref()));
    board.cell.store(snapshot).await;
    info!(
        "✅ Snapshot #{} published for {} ({} valid hours)",
        generation, board.region, valid_hours
    );

    let (Some(advisor), Some(prompt)) = (advisor, prompt) else {
        return None;
    };
    Some(tokio::spawn(async move {
        match advisor.advise(&prompt).await {
            Ok(Some(text)) => {
                if board.cell.store_advisory(generation, text).await {
                    info!("✅ Advisory from {} attached for {}", advisor.name(), board.region);
                } else {
                    info!("Advisory for {} arrived after a newer refresh; dropped", board.region);
                }
            }
            Ok(None) => warn!("{} returned no advisory text for {}", advisor.name(), board.region),
            Err(e) => warn!("Advisory failed for {}: {}", board.region, e),
        }
    }))
}

/// Per-tick renderer. Remembers what it last wrote so that unchanged frames
/// cause no file writes and unchanged reports are not logged again.
pub struct FrameWriter {
    renderer: SvgRenderer,
    output_dir: PathBuf,
    last_svg: HashMap<String, String>,
    last_report: HashMap<String, String>,
}

impl FrameWriter {
    pub fn new(renderer: SvgRenderer, output_dir: &Path) -> Self {
        Self {
            renderer,
            output_dir: output_dir.to_path_buf(),
            last_svg: HashMap::new(),
            last_report: HashMap::new(),
        }
    }

    pub fn output_path(&self, region: &str) -> PathBuf {
        self.output_dir.join(format!("{}.svg", region))
    }

    /// Returns `true` when the SVG file was rewritten.
    pub async fn write(&mut self, region: &str, frame: &Frame) -> Result<bool, RenderError> {
        let report = render_report(region, frame);
        if self.last_report.get(region) != Some(&report) {
            info!("\n{}", report);
            self.last_report.insert(region.to_string(), report);
        }

        let svg = self.renderer.render(frame);
        if self.last_svg.get(region) == Some(&svg) {
            return Ok(false);
        }
        tokio::fs::create_dir_all(&self.output_dir).await?;
        tokio::fs::write(self.output_path(region), &svg).await?;
        self.last_svg.insert(region.to_string(), svg);
        Ok(true)
    }
}

/// Builds and writes the frame of every board for `now_hour`.
pub async fn render_tick(
    boards: &[Arc<RegionBoard>],
    analyzer: &AnalyzerImpl,
    writer: &mut FrameWriter,
    now_hour: u32,
) {
    for board in boards {
        let snapshot = board.cell.load().await;
        let frame = analyzer.build_frame(&snapshot, now_hour);
        if let Err(e) = writer.write(&board.region, &frame).await {
            warn!("Failed to write clock for {}: {}", board.region, e);
        }
    }
}
