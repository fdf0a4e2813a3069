use super::*;

#[test]
fn defaults_validate() {
    TimingSpec::default().validate().unwrap();
}

#[test]
fn terminal_exceeds_every_possible_delay_for_96_tiles() {
    let timing = TimingSpec::default();
    let terminal = terminal_delay(&timing, 96);
    assert_eq!(terminal, Millis(2328));

    // Maximum possible per-tile delay: last rank plus the full jitter bound.
    let max_delay = 95 * timing.base_interval.0 + timing.jitter_bound.0;
    assert_eq!(max_delay, 1930);
    assert!(max_delay < terminal.0);
}

#[test]
fn terminal_bound_holds_for_any_validated_spec() {
    let specs = [
        TimingSpec::default(),
        TimingSpec {
            base_interval: Millis(5),
            jitter_bound: Millis(500),
            closing_buffer: Millis(505),
            ..TimingSpec::default()
        },
        TimingSpec {
            base_interval: Millis(40),
            jitter_bound: Millis(0),
            closing_buffer: Millis(40),
            ..TimingSpec::default()
        },
    ];
    for timing in specs {
        timing.validate().unwrap();
        for n in [1usize, 2, 96, 1000] {
            let terminal = terminal_delay(&timing, n);
            let worst = (n as u64 - 1) * timing.base_interval.0 + timing.jitter_bound.0;
            assert!(worst < terminal.0, "bound broken for n={n} {timing:?}");
        }
    }
}

#[test]
fn delays_grow_with_rank_and_stay_within_jitter() {
    let timing = TimingSpec::default();
    let mut rng = Rng64::new(99);
    for rank in 0..96u32 {
        let d = scheduled_delay(&timing, rank, &mut rng);
        let base = u64::from(rank) * timing.base_interval.0;
        assert!(d.0 >= base);
        assert!(d.0 < base + timing.jitter_bound.0);
    }
}

#[test]
fn undersized_closing_buffer_is_rejected() {
    let timing = TimingSpec {
        closing_buffer: Millis(200),
        ..TimingSpec::default()
    };
    assert!(timing.validate().is_err());

    let timing = TimingSpec {
        closing_buffer: Millis(238),
        ..TimingSpec::default()
    };
    timing.validate().unwrap();
}

#[test]
fn zero_jitter_is_allowed_and_deterministic() {
    let timing = TimingSpec {
        jitter_bound: Millis(0),
        closing_buffer: Millis(18),
        ..TimingSpec::default()
    };
    timing.validate().unwrap();
    let mut rng = Rng64::new(1);
    assert_eq!(scheduled_delay(&timing, 10, &mut rng), Millis(180));
}
