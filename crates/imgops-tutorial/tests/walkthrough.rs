//! End-to-end runs of the tutorial

use imgops_image::DoubleType;
use imgops_special::{
    OpArgs, OpKind, OpService, OpType, Priority, ResolutionError, UnaryComputerOp,
};
use imgops_test_utils::{assert_close, setup_ops};
use imgops_tutorial::{LogDisplay, Tutorial, TutorialConfig};
use pretty_assertions::assert_eq;

fn quick(width: usize, height: usize) -> TutorialConfig {
    TutorialConfig::new()
        .with_dimensions(width, height)
        .with_repetitions(20)
}

#[test]
fn default_values_reproduce_walkthrough() {
    let ops = setup_ops();
    let report = Tutorial::new(&ops, quick(32, 32)).run().unwrap();

    assert_eq!(report.computer_out, 15.0);
    assert_eq!(report.loop_result, 30.0);
    assert_close(report.function_mean, 31.0);
    assert_close(report.hybrid_mean, report.function_mean);
    assert_eq!(report.hybrid_max, 62.0);
    assert_close(report.map_output_mean, report.map_input_mean + 5.0);
    assert!(report.erased_error.is_some());
}

#[test]
fn show_mode_runs_with_log_display() {
    let ops = setup_ops();
    let display = LogDisplay::new(&ops).unwrap();
    let config = quick(5, 3).with_show(true);
    let report = Tutorial::new(&ops, config).with_display(display).run().unwrap();
    assert_close(report.map_input_mean, 3.0);
}

#[test]
fn zero_iterations_leave_sample() {
    let ops = setup_ops();
    let report = Tutorial::new(&ops, quick(2, 2).with_iterations(0))
        .run()
        .unwrap();
    assert_eq!(report.loop_result, 10.0);
}

#[test]
fn non_finite_constant_aborts() {
    let ops = setup_ops();
    let result = Tutorial::new(&ops, quick(2, 2).with_constant(f64::INFINITY)).run();
    assert!(matches!(
        result,
        Err(ResolutionError::InvalidArgument {
            kind: OpKind::MathAdd,
            ..
        })
    ));
}

struct Subtract(f64);

impl UnaryComputerOp<DoubleType, DoubleType> for Subtract {
    fn compute(&self, input: &DoubleType, output: &mut DoubleType) {
        output.0 = input.0 - self.0;
    }
}

#[test]
fn registered_override_flows_through_every_section() {
    let mut ops = OpService::with_defaults();
    ops.register_computer::<DoubleType, DoubleType, _, _>(
        OpKind::MathAdd,
        [OpType::of::<f64>()],
        Priority::HIGH,
        |args: &OpArgs| Ok(Subtract(*args.require::<f64>(OpKind::MathAdd, 0)?)),
    );

    let report = Tutorial::new(&ops, quick(4, 4)).run().unwrap();
    assert_eq!(report.computer_out, 5.0);
    assert_eq!(report.loop_result, -10.0);
    assert_close(report.map_output_mean, report.map_input_mean - 5.0);
}

#[test]
fn timing_report_serializes() {
    let ops = setup_ops();
    let report = Tutorial::new(&ops, quick(2, 2)).run().unwrap();
    let json = serde_json::to_value(report.timing).unwrap();
    assert_eq!(json["repetitions"], 20);
}
