//! The walk-through itself
//!
//! One method per section. Each section logs a banner, resolves what it
//! needs from the shared [`OpService`] and records its result in a
//! [`TutorialReport`].

use crate::config::TutorialConfig;
use crate::display::{DisplayService, Headless};
use crate::timing::{compare_lookup_vs_cached, TimingReport};
use imgops_image::{ArrayImgs, DoubleType, Img};
use imgops_special::{
    ComputerHandle, Computers, HybridHandle, IIs, OpArgs, OpKind, OpService, OpType,
    ResolutionError, RTs, UnaryComputerOp, UnaryFunctionOp, UnaryHybridCF, UnaryInplaceOp,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Everything a run computed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TutorialReport {
    /// `value + constant` from the computer section
    pub computer_out: f64,
    /// Message of the call-time error raised by the erased add, if any
    pub erased_error: Option<String>,
    /// Mean of the coordinate image from the function section
    pub function_mean: f64,
    /// Scalar after the loop section
    pub loop_result: f64,
    /// Mean from the hybrid used as a computer
    pub hybrid_mean: f64,
    /// Max from the hybrid used as a function
    pub hybrid_max: f64,
    /// Mean of the image before mapping the add over it
    pub map_input_mean: f64,
    /// Mean of the mapped output
    pub map_output_mean: f64,
    /// Lookup-versus-cached timing
    pub timing: TimingReport,
}

/// State shared between sections
struct Session {
    add: ComputerHandle<DoubleType, DoubleType>,
    sample: DoubleType,
    image: Img<DoubleType>,
    mean: Option<HybridHandle<Img<DoubleType>, DoubleType>>,
}

/// A configured walk-through over an [`OpService`]
pub struct Tutorial<'a> {
    ops: &'a OpService,
    config: TutorialConfig,
    display: Box<dyn DisplayService + 'a>,
}

impl<'a> Tutorial<'a> {
    /// Create a walk-through that shows nothing
    #[must_use]
    pub fn new(ops: &'a OpService, config: TutorialConfig) -> Self {
        Self {
            ops,
            config,
            display: Box::new(Headless),
        }
    }

    /// With a display for the images the walk-through produces
    #[must_use]
    pub fn with_display(mut self, display: impl DisplayService + 'a) -> Self {
        self.display = Box::new(display);
        self
    }

    /// Configuration of this run
    #[inline]
    #[must_use]
    pub fn config(&self) -> &TutorialConfig {
        &self.config
    }

    /// Run every section in order
    ///
    /// # Errors
    /// Returns the first [`ResolutionError`] any section hits
    pub fn run(&self) -> Result<TutorialReport, ResolutionError> {
        let (mut session, computer_out) = self.computer_section()?;
        let erased_error = self.erased_section(&session)?;
        self.image_section(&mut session);
        let function_mean = self.function_section(&session)?;
        let loop_result = self.loop_section(&mut session)?;
        let (hybrid_mean, hybrid_max) = self.hybrid_section(&mut session)?;
        let (map_input_mean, map_output_mean) = self.map_section(&session)?;
        let timing = self.timing_section(&session)?;

        info!("--------- All done! ---------");
        Ok(TutorialReport {
            computer_out,
            erased_error,
            function_mean,
            loop_result,
            hybrid_mean,
            hybrid_max,
            map_input_mean,
            map_output_mean,
            timing,
        })
    }

    fn add_args(&self) -> OpArgs {
        OpArgs::new().with(self.config.constant)
    }

    fn computer_section(&self) -> Result<(Session, f64), ResolutionError> {
        info!("--------- Computer op: Stores results in an output reference ---------");
        let add = Computers::unary::<DoubleType, DoubleType>(
            self.ops,
            OpKind::MathAdd,
            self.add_args(),
        )?;

        let sample = DoubleType(self.config.value);
        let mut out = DoubleType::default();
        add.compute(&sample, &mut out);
        info!("Out = {out}");

        let session = Session {
            add,
            sample,
            image: ArrayImgs::doubles(self.config.width, self.config.height),
            mean: None,
        };
        Ok((session, out.0))
    }

    fn erased_section(&self, session: &Session) -> Result<Option<String>, ResolutionError> {
        info!("--------- Resolve with typed helpers to keep container types checked ---------");
        info!("--------- Without them, mismatches only surface when the op runs ---------");
        let image_type = OpType::of::<Img<DoubleType>>();
        let bad_add = Computers::raw(
            self.ops,
            OpKind::MathAdd,
            image_type,
            image_type,
            self.add_args(),
        )?;
        let mut byte_image = ArrayImgs::bytes(self.config.width, self.config.height);
        let erased_error = match bad_add.compute_any(&session.image, &mut byte_image) {
            Ok(()) => None,
            Err(error) => {
                warn!(%error, "erased add rejected the byte image");
                Some(error.to_string())
            }
        };

        info!("--------- Typed helpers: RTs for sample outputs, IIs for image outputs ---------");
        let good_add = Computers::unary_like(
            self.ops,
            OpKind::MathAdd,
            &session.image,
            &session.image,
            self.add_args(),
        )?;
        // Passing `byte_image` to `good_add.compute` would not compile.
        let mut scratch = ArrayImgs::doubles(self.config.width, self.config.height);
        good_add.compute(&session.image, &mut scratch);

        Ok(erased_error)
    }

    fn image_section(&self, session: &mut Session) {
        // Pixel value is the sum of its coordinates.
        #[allow(clippy::cast_precision_loss)]
        let image = Img::from_fn(self.config.width, self.config.height, |x, y| (x + y) as f64);
        session.image = image;
        self.display.show("Image", &session.image);
    }

    fn function_section(&self, session: &Session) -> Result<f64, ResolutionError> {
        info!("--------- Function op: Returns the result as a new object ---------");
        let function_mean =
            RTs::function(self.ops, OpKind::StatsMean, &session.image, OpArgs::new())?;
        let mean = function_mean.calculate(&session.image);
        info!("--------- Stats: Mean = {mean} ---------");
        Ok(mean.0)
    }

    fn loop_section(&self, session: &mut Session) -> Result<f64, ResolutionError> {
        info!("--------- Inplace op: mutate the given input ---------");
        info!("--------- Loop op: Execute op on the input for a certain number of times ---------");
        let add_loop = RTs::inplace(
            self.ops,
            OpKind::Loop,
            &session.sample,
            OpArgs::new()
                .with(session.add.clone())
                .with(self.config.iterations),
        )?;
        let before = session.sample;
        add_loop.mutate(&mut session.sample);
        info!(
            "--------- 'In' is modified from {before} to {} ---------",
            session.sample
        );
        Ok(session.sample.0)
    }

    fn hybrid_section(&self, session: &mut Session) -> Result<(f64, f64), ResolutionError> {
        info!("--------- Hybrid op: Can be used either as a function or computer op ---------");
        let mean_op = RTs::hybrid(self.ops, OpKind::StatsMean, &session.image, OpArgs::new())?;
        let max_op = RTs::hybrid(self.ops, OpKind::StatsMax, &session.image, OpArgs::new())?;

        let mut mean = DoubleType(0.0);
        mean_op.compute(&session.image, &mut mean);
        let max = max_op.run(&session.image);
        info!("--------- Stats: Mean = {mean} Max = {max} ---------");

        session.mean = Some(mean_op);
        Ok((mean.0, max.0))
    }

    fn map_section(&self, session: &Session) -> Result<(f64, f64), ResolutionError> {
        info!("--------- Map op: Execute op on every pixel of an image ---------");
        let map_op = IIs::computer(
            self.ops,
            OpKind::Map,
            &session.image,
            OpArgs::new().with(session.add.clone()),
        )?;
        let mut output = ArrayImgs::doubles(self.config.width, self.config.height);
        map_op.compute(&session.image, &mut output);

        let mean_op = match &session.mean {
            Some(op) => op.clone(),
            None => RTs::hybrid(self.ops, OpKind::StatsMean, &session.image, OpArgs::new())?,
        };
        let input_mean = mean_op.run(&session.image);
        let output_mean = mean_op.run(&output);
        info!("--------- Input mean: {input_mean} Output mean: {output_mean} ---------");
        self.display.show("Map output", &output);

        Ok((input_mean.0, output_mean.0))
    }

    fn timing_section(&self, session: &Session) -> Result<TimingReport, ResolutionError> {
        info!("--------- Searching for the op is slower: ---------");
        let report = compare_lookup_vs_cached(
            self.ops,
            &session.add,
            session.sample,
            self.config.constant,
            self.config.repetitions,
        )?;
        info!("--------- Slow = {:.3}ms ---------", report.slow_ms);
        info!("--------- Fast = {:.3}ms ---------", report.fast_ms);
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        shown: RefCell<Vec<(String, (usize, usize))>>,
    }

    impl DisplayService for &Recorder {
        fn show(&self, title: &str, image: &Img<DoubleType>) {
            self.shown
                .borrow_mut()
                .push((title.to_string(), image.dimensions()));
        }
    }

    fn small() -> TutorialConfig {
        TutorialConfig::new()
            .with_dimensions(6, 4)
            .with_repetitions(10)
    }

    #[test]
    fn run_reports_each_section() {
        let ops = OpService::with_defaults();
        let report = Tutorial::new(&ops, small()).run().unwrap();

        assert_eq!(report.computer_out, 15.0);
        assert_eq!(report.loop_result, 30.0);
        // x + y over 6x4: mean 2.5 + 1.5, max 5 + 3
        assert_eq!(report.function_mean, 4.0);
        assert_eq!(report.hybrid_mean, 4.0);
        assert_eq!(report.hybrid_max, 8.0);
        assert_eq!(report.map_input_mean, 4.0);
        assert_eq!(report.map_output_mean, 9.0);
        assert_eq!(report.timing.repetitions, 10);
    }

    #[test]
    fn erased_add_error_is_recorded() {
        let ops = OpService::with_defaults();
        let report = Tutorial::new(&ops, small()).run().unwrap();
        assert_eq!(
            report.erased_error.as_deref(),
            Some("output is not a Img<DoubleType>")
        );
    }

    #[test]
    fn images_are_shown() {
        let ops = OpService::with_defaults();
        let recorder = Recorder::default();
        Tutorial::new(&ops, small())
            .with_display(&recorder)
            .run()
            .unwrap();

        let shown = recorder.shown.borrow();
        let titles: Vec<_> = shown.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(titles, ["Image", "Map output"]);
        assert!(shown.iter().all(|(_, dims)| *dims == (6, 4)));
    }

    #[test]
    fn missing_ops_abort_the_run() {
        let ops = OpService::new();
        let result = Tutorial::new(&ops, small()).run();
        assert!(matches!(
            result,
            Err(ResolutionError::UnknownKind(OpKind::MathAdd))
        ));
    }
}
