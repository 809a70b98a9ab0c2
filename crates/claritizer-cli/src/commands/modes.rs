//! Mode table listing command.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use std::path::PathBuf;

use clap::Args;
use claritizer_effects::{CONTROL_DESCRIPTORS, FACTORY_MODES, Mode, ModeConfig};

use super::common::load_tuning;

#[derive(Args)]
pub struct ModesArgs {
    /// Show the tables from a tuning file instead of the factory modes
    #[arg(long, value_name = "FILE")]
    tuning: Option<PathBuf>,

    /// Show a single mode (0-3 or A-D)
    #[arg(value_name = "MODE")]
    mode: Option<String>,
}

pub fn run(args: ModesArgs) -> anyhow::Result<()> {
    let configs = match &args.tuning {
        Some(path) => load_tuning(path)?.to_configs(),
        None => FACTORY_MODES,
    };

    let selected: Vec<Mode> = match &args.mode {
        Some(name) => vec![parse_mode(name)?],
        None => Mode::ALL.to_vec(),
    };

    for mode in selected {
        print_mode(mode, &configs[mode.index()]);
        println!();
    }

    if args.mode.is_none() {
        println!("Controls:");
        println!();
        println!("  {:10}  {:>8}  {:>8}  {:>8}", "Name", "Min", "Max", "Default");
        println!("  {:10}  {:>8}  {:>8}  {:>8}", "----", "---", "---", "-------");
        for desc in &CONTROL_DESCRIPTORS {
            println!(
                "  {:10}  {:>8.2}  {:>8.2}  {:>8.2}{}",
                desc.name,
                desc.min,
                desc.max,
                desc.default,
                desc.unit.suffix()
            );
        }
    }

    Ok(())
}

fn parse_mode(name: &str) -> anyhow::Result<Mode> {
    if let Ok(index) = name.parse::<usize>() {
        return Ok(Mode::from_index(index));
    }
    Mode::ALL
        .into_iter()
        .find(|m| m.label().eq_ignore_ascii_case(name) || m.name().eq_ignore_ascii_case(name))
        .ok_or_else(|| anyhow::anyhow!("Unknown mode: {}", name))
}

fn print_mode(mode: Mode, config: &ModeConfig) {
    let title = format!("Mode {} - {}", mode.label(), mode.name());
    println!("{title}");
    println!("{}", "=".repeat(title.len()));
    println!();
    println!(
        "  {:10}  {:>9}  {:>8}  {:>10}  {:>9}  {:>6}",
        "Stage", "Time ms", "Feedback", "Depth ms", "Rate Hz", "Mix"
    );
    println!(
        "  {:10}  {:>9}  {:>8}  {:>10}  {:>9}  {:>6}",
        "-----", "-------", "--------", "--------", "-------", "---"
    );

    let c = &config.chorus;
    println!(
        "  {:10}  {:>9.1}  {:>8.2}  {:>10.1}  {:>9.2}  {:>6.2}",
        "Chorus", c.time_ms, c.feedback, c.mod_depth_ms, c.mod_rate_hz, c.mix
    );
    for (label, d) in [("Echo 1", &config.delay1), ("Echo 2", &config.delay2)] {
        println!(
            "  {:10}  {:>9.1}  {:>8.2}  {:>10.1}  {:>9.2}  {:>6.2}",
            label, d.base_time_ms, d.feedback, d.mod_depth_ms, d.mod_rate_hz, d.mix
        );
    }

    let taps: Vec<String> = config
        .diffusion
        .tap_times_ms
        .iter()
        .map(|t| format!("{t:.1}"))
        .collect();
    println!();
    println!(
        "  Diffusion taps {} ms, feedback {:.2}, mix {:.2}",
        taps.join(" / "),
        config.diffusion.feedback,
        config.diffusion.mix
    );
    println!(
        "  Longest delay {:.1} ms, tail {:.1} s at time 1.0",
        config.max_delay_ms(),
        config.tail_seconds(1.0)
    );
}
