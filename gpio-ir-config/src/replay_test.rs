use gpio_ir::config::GpioIrConfig;

use super::*;

fn bt848() -> Settings {
    GpioIrConfig {
        gpio_lock_mask: 0x8000,
        soft_gap_ms: 500,
        sample_rate: 12,
        ..GpioIrConfig::polled(0x1f00)
    }
    .validate()
    .unwrap()
}

fn ts(time_ms: u64, raw: Option<u32>) -> TraceSample {
    TraceSample { time_ms, raw }
}

#[test]
fn parse() {
    let trace = parse_trace(
        r#"
# time raw
0    0x1500
83   0x1500   # held
166  fail
249  5376
"#,
    )
    .unwrap();

    assert_eq!(
        trace,
        vec![
            ts(0, Some(0x1500)),
            ts(83, Some(0x1500)),
            ts(166, None),
            ts(249, Some(0x1500)),
        ]
    );
}

#[test]
fn parse_errors() {
    let src = "0 1\n10\n";
    let err = parse_trace(src).unwrap_err();
    assert_eq!(err.message, "Expected <time_ms> <raw>");
    assert_eq!(err.span, Some(4..6));

    let src = "0 1\n10 zz\n";
    let err = parse_trace(src).unwrap_err();
    assert_eq!(err.message, r#"Invalid raw value "zz""#);
    assert_eq!(&src[err.span.unwrap()], "zz");

    let src = "0 0x1_0000_0000\n";
    let err = parse_trace(src).unwrap_err();
    assert_eq!(err.message, "0x1_0000_0000 does not fit the register");

    let src = "soon 1\n";
    let err = parse_trace(src).unwrap_err();
    assert_eq!(err.message, r#"Invalid time "soon""#);
    assert_eq!(err.span, Some(0..4));

    let src = "0 1\n20000000000000000 0x1500\n";
    let err = parse_trace(src).unwrap_err();
    assert_eq!(
        err.message,
        format!("Time 20000000000000000 out of range; must be at most {MAX_TIME_MS}")
    );
    assert_eq!(&src[err.span.unwrap()], "20000000000000000");

    let src = "100 1\n50 1\n";
    let err = parse_trace(src).unwrap_err();
    assert_eq!(err.message, "Time goes backwards");
}

#[test]
fn replay_register() {
    let trace = [ts(0, Some(3)), ts(1, None)];
    let mut reg = ReplayRegister::new(&trace);

    assert_eq!(reg.remaining(), 2);
    assert_eq!(reg.read(0), Ok(3));
    assert_eq!(reg.read(0), Err(ReplayError::Recorded));
    assert_eq!(reg.read(0), Err(ReplayError::Exhausted));
}

#[test]
fn replay_trace() {
    let trace = [
        ts(1000, Some(0x1500)),
        ts(1083, Some(0x1500)),
        ts(1166, Some(0x9500)),
        ts(1249, Some(0x1500)),
        ts(1332, None),
        ts(1415, Some(0x1600)),
        ts(1498, Some(0x1600)),
        ts(1915, Some(0x1600)),
    ];

    let samples: Vec<_> = replay(bt848(), &trace)
        .into_iter()
        .map(|r| (r.time_ms, r.sample))
        .collect();

    assert_eq!(
        samples,
        vec![
            (1000, Sample::Code(21)),
            (1083, Sample::Suppressed(21)),
            (1166, Sample::Locked),
            (1249, Sample::Code(21)),
            (1332, Sample::ReadFailed),
            (1415, Sample::Code(22)),
            (1498, Sample::Suppressed(22)),
            (1915, Sample::Code(22)),
        ]
    );
}

#[test]
fn replay_interrupt_trace() {
    let settings = GpioIrConfig::interrupt(0x0f88000, 9)
        .validate()
        .unwrap();
    // 0x0f88000 >> 15 = 0x1f1
    let trace = [
        ts(0, Some(0x0f88000)),
        ts(100, Some(0x0008000)),
        ts(400, Some(0x0008000)),
        ts(500, Some(0x0008000)),
    ];

    let codes: Vec<_> = replay(settings, &trace)
        .into_iter()
        .filter_map(|r| r.sample.code().map(|c| (r.time_ms, c)))
        .collect();

    assert_eq!(codes, vec![(0, 0x1f1), (400, 1)]);
}

#[test]
fn replay_latest_time() {
    let trace = parse_trace(&format!("{MAX_TIME_MS} 0x1500\n")).unwrap();

    assert_eq!(
        replay(bt848(), &trace),
        vec![Replayed {
            time_ms: MAX_TIME_MS,
            sample: Sample::Code(21),
        }]
    );
}
