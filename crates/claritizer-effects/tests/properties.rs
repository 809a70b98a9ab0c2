//! Property-based tests for the effect graph.
//!
//! Uses proptest to verify that any control setting, any tuning table and
//! any finite input keep the output finite and within ±1.0, and keep every
//! delay line within the soft-clip ceiling.

use claritizer_core::SOFT_CLIP_CEILING;
use claritizer_effects::{
    ControlSnapshot, EffectGraph, FactoryModes, Mode, ModeConfig, ParameterSource,
};
use proptest::prelude::*;

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK: usize = 256;

/// Serves one arbitrary table for every mode.
#[derive(Debug, Clone, Copy)]
struct FixedTable(ModeConfig);

impl ParameterSource for FixedTable {
    fn mode_config(&self, _mode: Mode) -> ModeConfig {
        self.0
    }
}

fn controls_strategy() -> impl Strategy<Value = ControlSnapshot> {
    (-1.0f32..=2.0, -1.0f32..=5.0, -1.0f32..=2.0, 0usize..8).prop_map(
        |(wet_dry, time_scale, tone, mode)| ControlSnapshot {
            wet_dry,
            time_scale,
            tone,
            mode: Mode::from_index(mode),
        },
    )
}

/// Field indices of the chorus, echo and diffusion mix amounts.
const MIX_FIELDS: [usize; 4] = [4, 9, 14, 20];

/// A mix amount that is either left alone or replaced by a non-finite value.
fn mix_override() -> impl Strategy<Value = Option<f32>> {
    prop_oneof![
        4 => Just(None),
        1 => Just(Some(f32::INFINITY)),
        1 => Just(Some(f32::NEG_INFINITY)),
        1 => Just(Some(f32::NAN)),
    ]
}

/// Tables well outside the sensible ranges, including negative times,
/// feedback above unity and non-finite mixes.
fn table_strategy() -> impl Strategy<Value = ModeConfig> {
    (
        prop::array::uniform21(-2.0f32..=5.0),
        prop::array::uniform4(-50.0f32..=3000.0),
        prop::array::uniform4(mix_override()),
    )
        .prop_map(|(raw, taps, mixes)| {
            let mut fields = raw;
            // Delay times in ms
            fields[0] = raw[0].abs() * 20.0;
            fields[5] = raw[5].abs() * 600.0;
            fields[10] = raw[10].abs() * 600.0;
            fields[15..19].copy_from_slice(&taps);
            for (&index, mix) in MIX_FIELDS.iter().zip(mixes) {
                if let Some(value) = mix {
                    fields[index] = value;
                }
            }
            ModeConfig::from_fields(&fields)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Factory modes: any controls and any input in [-4, 4] stay bounded.
    #[test]
    fn factory_output_bounded(
        controls in controls_strategy(),
        input in prop::collection::vec(-4.0f32..=4.0, BLOCK),
    ) {
        let mut graph = EffectGraph::new(1, FactoryModes);
        graph.prepare(SAMPLE_RATE, BLOCK);

        for _ in 0..16 {
            let mut block = input.clone();
            graph.process(&mut [&mut block[..]], &controls);
            for &y in &block {
                prop_assert!(y.is_finite(), "non-finite output {}", y);
                prop_assert!(y.abs() <= 1.0, "output {} above unity", y);
            }
        }

        let peak = graph.channel(0).map_or(0.0, |c| c.peak_stored());
        prop_assert!(peak <= SOFT_CLIP_CEILING, "stored peak {}", peak);
    }

    /// Arbitrary tuning tables cannot destabilize the graph.
    #[test]
    fn tuned_output_bounded(
        table in table_strategy(),
        controls in controls_strategy(),
        input in prop::collection::vec(-1.0f32..=1.0, BLOCK),
    ) {
        let mut graph = EffectGraph::new(1, FixedTable(table));
        graph.prepare(SAMPLE_RATE, BLOCK);

        for _ in 0..16 {
            let mut block = input.clone();
            graph.process(&mut [&mut block[..]], &controls);
            prop_assert!(block.iter().all(|y| y.is_finite() && y.abs() <= 1.0));
        }

        let peak = graph.channel(0).map_or(0.0, |c| c.peak_stored());
        prop_assert!(peak <= SOFT_CLIP_CEILING, "stored peak {}", peak);
    }

    /// After `reset`, silence in gives exact zeros out for any controls.
    #[test]
    fn silence_after_reset(
        controls in controls_strategy(),
        input in prop::collection::vec(-1.0f32..=1.0, BLOCK),
    ) {
        let mut graph = EffectGraph::new(2, FactoryModes);
        graph.prepare(SAMPLE_RATE, BLOCK);

        let mut left = input.clone();
        let mut right = input;
        graph.process(&mut [&mut left[..], &mut right[..]], &controls);
        graph.reset();

        for _ in 0..8 {
            let mut left = vec![0.0_f32; BLOCK];
            let mut right = vec![0.0_f32; BLOCK];
            graph.process(&mut [&mut left[..], &mut right[..]], &controls);
            prop_assert!(left.iter().chain(&right).all(|&s| s == 0.0));
        }
    }

    /// With the wet/dry control at zero the graph is an exact passthrough.
    #[test]
    fn dry_passthrough(
        mode in 0usize..4,
        input in prop::collection::vec(-1.0f32..=1.0, BLOCK),
    ) {
        let mut graph = EffectGraph::new(1, FactoryModes);
        graph.prepare(SAMPLE_RATE, BLOCK);
        let controls = ControlSnapshot {
            wet_dry: 0.0,
            mode: Mode::from_index(mode),
            ..ControlSnapshot::default()
        };

        let mut block = input.clone();
        graph.process(&mut [&mut block[..]], &controls);
        prop_assert_eq!(block, input);
    }
}
