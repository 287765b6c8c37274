//! Image display
//!
//! There is no viewer; showing an image logs a summary of it instead.

use imgops_image::{DoubleType, Img};
use imgops_special::{HybridHandle, OpArgs, OpKind, OpService, ResolutionError, UnaryHybridCF};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Something that can present an image to the user
pub trait DisplayService {
    /// Present `image` under `title`
    fn show(&self, title: &str, image: &Img<DoubleType>);
}

/// Display that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct Headless;

impl DisplayService for Headless {
    fn show(&self, title: &str, _image: &Img<DoubleType>) {
        tracing::debug!(title, "display disabled");
    }
}

/// Dimensions and statistics of a shown image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSummary {
    /// Title the image was shown under
    pub title: String,
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
    /// Smallest sample
    pub min: f64,
    /// Largest sample
    pub max: f64,
    /// Mean sample
    pub mean: f64,
}

impl fmt::Display for ImageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}x{}): min={} max={} mean={}",
            self.title, self.width, self.height, self.min, self.max, self.mean
        )
    }
}

/// Display that logs an [`ImageSummary`] at info level
///
/// The statistics ops are resolved when the display is created and reused
/// for every image shown.
pub struct LogDisplay {
    min: HybridHandle<Img<DoubleType>, DoubleType>,
    max: HybridHandle<Img<DoubleType>, DoubleType>,
    mean: HybridHandle<Img<DoubleType>, DoubleType>,
}

impl LogDisplay {
    /// Resolve the statistics this display reports
    ///
    /// # Errors
    /// Returns [`ResolutionError`] if `ops` lacks min, max or mean on
    /// `Img<DoubleType>`
    pub fn new(ops: &OpService) -> Result<Self, ResolutionError> {
        let resolve =
            |kind| ops.resolve_hybrid::<Img<DoubleType>, DoubleType>(kind, &OpArgs::new());
        Ok(Self {
            min: resolve(OpKind::StatsMin)?,
            max: resolve(OpKind::StatsMax)?,
            mean: resolve(OpKind::StatsMean)?,
        })
    }

    /// Summarize `image` without logging it
    #[must_use]
    pub fn summarize(&self, title: &str, image: &Img<DoubleType>) -> ImageSummary {
        ImageSummary {
            title: title.to_string(),
            width: image.width(),
            height: image.height(),
            min: self.min.run(image).0,
            max: self.max.run(image).0,
            mean: self.mean.run(image).0,
        }
    }
}

impl fmt::Debug for LogDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogDisplay").finish_non_exhaustive()
    }
}

impl DisplayService for LogDisplay {
    fn show(&self, title: &str, image: &Img<DoubleType>) {
        tracing::info!("{}", self.summarize(title, image));
    }
}
