//! imgops tutorial
//!
//! A guided run through the special operation styles: computer, function,
//! inplace and hybrid, plus the map and loop compositions and a timing of
//! resolving per call against resolving once.
//!
//! # Core Concepts
//!
//! - [`TutorialConfig`]: Image size, sample value, add constant and counts
//! - [`Tutorial`]: Runs each section against an [`imgops_special::OpService`]
//! - [`TutorialReport`]: Values every section computed
//! - [`DisplayService`]: Where images would be shown; [`LogDisplay`] logs a
//!   summary instead
//!
//! # Example
//!
//! ```rust
//! use imgops_special::OpService;
//! use imgops_tutorial::{Tutorial, TutorialConfig};
//!
//! let ops = OpService::with_defaults();
//! let config = TutorialConfig::new().with_dimensions(8, 8).with_repetitions(10);
//! let report = Tutorial::new(&ops, config).run()?;
//! assert_eq!(report.loop_result, 30.0);
//! # Ok::<(), imgops_special::ResolutionError>(())
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

mod config;
mod display;
mod timing;
mod walkthrough;

pub use config::TutorialConfig;
pub use display::{DisplayService, Headless, ImageSummary, LogDisplay};
pub use timing::{compare_lookup_vs_cached, TimingReport};
pub use walkthrough::{Tutorial, TutorialReport};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
