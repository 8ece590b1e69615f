use std::path::Path;

use anyhow::Result;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::track::Slide;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetStatus {
    NoImage,
    Loaded { width: u32, height: u32 },
    /// Shown as an error placeholder instead of the image.
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetReport {
    pub slide: usize,
    pub status: AssetStatus,
}

// Sniffs the format and reads the header only; pixel data is left for the renderer.
fn probe(path: &Path) -> Result<(u32, u32)> {
    let dims = image::ImageReader::open(path)?
        .with_guessed_format()?
        .into_dimensions()?;
    Ok(dims)
}

/// Probes every slide image concurrently. Failures are reported, never fatal.
/// The report is ordered by slide id.
pub async fn run<'a>(slides: impl IntoIterator<Item = &'a Slide>) -> Vec<AssetReport> {
    let mut reports = Vec::new();
    let mut tasks: JoinSet<AssetReport> = JoinSet::new();

    for slide in slides {
        let Some(path) = slide.image.clone() else {
            reports.push(AssetReport {
                slide: slide.id,
                status: AssetStatus::NoImage,
            });
            continue;
        };
        let id = slide.id;
        tasks.spawn(async move {
            let probed = {
                let path = path.clone();
                tokio::task::spawn_blocking(move || probe(&path)).await
            };
            let status = match probed {
                Ok(Ok((width, height))) => {
                    debug!(slide = id, width, height, path = %path.display(), "image ready");
                    AssetStatus::Loaded { width, height }
                }
                Ok(Err(err)) => {
                    warn!(slide = id, path = %path.display(), "failed to load image: {err:#}");
                    AssetStatus::Failed {
                        reason: format!("{err:#}"),
                    }
                }
                Err(err) => AssetStatus::Failed {
                    reason: format!("probe task failed: {err}"),
                },
            };
            AssetReport { slide: id, status }
        });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(report) => reports.push(report),
            Err(err) => warn!("preload task panicked: {err}"),
        }
    }
    reports.sort_by_key(|r| r.slide);
    reports
}
