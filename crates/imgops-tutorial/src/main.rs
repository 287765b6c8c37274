use anyhow::{Context, Result};
use clap::builder::RangedU64ValueParser;
use clap::{Arg, ArgAction, Command, value_parser};
use imgops_special::OpService;
use imgops_tutorial::{LogDisplay, Tutorial, TutorialConfig};
use tracing_subscriber::EnvFilter;

/// Largest accepted image side; keeps `width * height` far from overflow
const MAX_IMAGE_SIDE: u64 = 1 << 16;

fn image_side() -> RangedU64ValueParser<usize> {
    RangedU64ValueParser::<usize>::new().range(1..=MAX_IMAGE_SIDE)
}

fn cli() -> Command {
    Command::new("imgops-tutorial")
        .version(imgops_tutorial::VERSION)
        .about("Walk through computer, function, inplace and hybrid ops")
        .arg(
            Arg::new("width")
                .long("width")
                .default_value("256")
                .value_parser(image_side())
                .help("Image width in pixels"),
        )
        .arg(
            Arg::new("height")
                .long("height")
                .default_value("256")
                .value_parser(image_side())
                .help("Image height in pixels"),
        )
        .arg(
            Arg::new("value")
                .long("value")
                .default_value("10.0")
                .value_parser(value_parser!(f64))
                .allow_negative_numbers(true)
                .help("Starting value of the scalar sample"),
        )
        .arg(
            Arg::new("constant")
                .long("constant")
                .default_value("5.0")
                .value_parser(value_parser!(f64))
                .allow_negative_numbers(true)
                .help("Constant the add op adds"),
        )
        .arg(
            Arg::new("iterations")
                .long("iterations")
                .default_value("4")
                .value_parser(value_parser!(usize))
                .help("Loop iterations"),
        )
        .arg(
            Arg::new("repetitions")
                .long("repetitions")
                .default_value("1000")
                .value_parser(value_parser!(usize))
                .help("Calls per side of the lookup-versus-cached timing"),
        )
        .arg(
            Arg::new("show")
                .long("show")
                .action(ArgAction::SetTrue)
                .help("Log a summary of each image instead of displaying it"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print the timing report as JSON"),
        )
}

fn config_from(matches: &clap::ArgMatches) -> TutorialConfig {
    // Every argument has a default, so the lookups cannot miss.
    let usize_arg = |name: &str| matches.get_one::<usize>(name).copied().unwrap_or_default();
    let f64_arg = |name: &str| matches.get_one::<f64>(name).copied().unwrap_or_default();

    TutorialConfig::new()
        .with_dimensions(usize_arg("width"), usize_arg("height"))
        .with_value(f64_arg("value"))
        .with_constant(f64_arg("constant"))
        .with_iterations(usize_arg("iterations"))
        .with_repetitions(usize_arg("repetitions"))
        .with_show(matches.get_flag("show"))
        .with_json(matches.get_flag("json"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = config_from(&cli().get_matches());
    tracing::debug!(?config, "starting tutorial");

    let ops = OpService::with_defaults();
    let mut tutorial = Tutorial::new(&ops, config.clone());
    if config.show {
        let display = LogDisplay::new(&ops).context("resolving display statistics")?;
        tutorial = tutorial.with_display(display);
    }

    let report = tutorial.run().context("tutorial aborted")?;

    if config.json {
        println!("{}", serde_json::to_string_pretty(&report.timing)?);
    }
    Ok(())
}
