use super::*;

#[test]
fn polled_defaults() {
    let settings = GpioIrConfig::polled(0x1f00).validate().unwrap();
    assert_eq!(settings.variant(), Variant::Polled);
    assert_eq!(settings.code_length(), 5);
    assert_eq!(settings.mask().pre_shift(), 8);
    assert_eq!(settings.gap(), Duration::from_millis(soft_gap::DEFAULT_MS as u64));
    assert_eq!(settings.sample_rate(), Some(sample_rate::DEFAULT));
    assert_eq!(settings.sample_period(), Some(Duration::from_millis(100)));
}

#[test]
fn zero_mask() {
    assert_eq!(
        GpioIrConfig::polled(0).validate(),
        Err(ConfigError::ZeroMask)
    );
    assert_eq!(
        GpioIrConfig::interrupt(0, 8).validate(),
        Err(ConfigError::ZeroMask)
    );
}

#[test]
fn minor_range() {
    let mut config = GpioIrConfig::polled(0xff);
    config.minor = limits::MAX_DEVICES - 1;
    assert_eq!(config.validate().unwrap().minor(), limits::MAX_DEVICES - 1);

    config.minor = limits::MAX_DEVICES;
    assert_eq!(
        config.validate(),
        Err(ConfigError::MinorOutOfRange(limits::MAX_DEVICES))
    );
}

#[test]
fn polled_gap_bounded_by_sample_rate() {
    let mut config = GpioIrConfig::polled(0x1f00);
    config.sample_rate = 12;

    config.soft_gap_ms = 100;
    assert_eq!(
        config.validate(),
        Err(ConfigError::GapTooShort {
            gap_ms: 100,
            min_ms: 167
        })
    );

    config.soft_gap_ms = 166;
    assert!(config.validate().is_err());

    config.soft_gap_ms = 167;
    assert_eq!(config.validate().unwrap().gap(), Duration::from_millis(167));

    config.soft_gap_ms = 500;
    assert_eq!(config.validate().unwrap().gap(), Duration::from_millis(500));
}

#[test]
fn polled_default_gap_widens_for_slow_rates() {
    let config = GpioIrConfig {
        sample_rate: 3,
        ..GpioIrConfig::polled(0x1f00)
    };
    assert_eq!(config.validate().unwrap().gap(), Duration::from_millis(667));

    let config = GpioIrConfig {
        sample_rate: 2,
        ..GpioIrConfig::polled(0x1f00)
    };
    assert_eq!(config.validate().unwrap().gap(), Duration::from_millis(1000));

    let config = GpioIrConfig {
        sample_rate: 3,
        soft_gap_ms: 400,
        ..GpioIrConfig::polled(0x1f00)
    };
    assert_eq!(
        config.validate(),
        Err(ConfigError::GapTooShort {
            gap_ms: 400,
            min_ms: 667
        })
    );
}

#[test]
fn sample_rate_range() {
    let mut config = GpioIrConfig::polled(0x1f00);
    for rate in [0, 1, 51, 255] {
        config.sample_rate = rate;
        assert_eq!(
            config.validate(),
            Err(ConfigError::SampleRateOutOfRange(rate))
        );
    }
    config.sample_rate = 50;
    assert!(config.validate().is_ok());
}

#[test]
fn interrupt_settings() {
    let mut config = GpioIrConfig::interrupt(0x1f00, 8);
    config.gpio_xor_mask = 0xffff;
    config.sample_rate = 0;
    let settings = config.validate().unwrap();

    assert_eq!(settings.variant(), Variant::Interrupt);
    assert_eq!(settings.code_length(), 8);
    assert_eq!(settings.xor_mask(), 0);
    assert_eq!(settings.sample_rate(), None);
    assert_eq!(settings.sample_period(), None);
    assert_eq!(
        settings.gap(),
        Duration::from_millis(soft_gap::INTERRUPT_DEFAULT_MS as u64)
    );
    assert_eq!(settings.variant().debounce_policy(), DebouncePolicy::FixedWindow);
}

#[test]
fn interrupt_gap_range() {
    let mut config = GpioIrConfig::interrupt(0x1f00, 8);
    for gap in [0, 99, 1001] {
        config.soft_gap_ms = gap;
        assert_eq!(config.validate(), Err(ConfigError::GapOutOfRange(gap)));
    }
    for gap in [100, 1000] {
        config.soft_gap_ms = gap;
        assert!(config.validate().is_ok());
    }
}

#[test]
fn interrupt_code_length() {
    for len in [0, 17] {
        assert_eq!(
            GpioIrConfig::interrupt(0x1f00, len).validate(),
            Err(ConfigError::CodeLengthOutOfRange(len))
        );
    }

    // bits 8 and 12 span five code bits once shifted
    assert_eq!(
        GpioIrConfig::interrupt(0x1100, 4).validate(),
        Err(ConfigError::CodeLengthTooShort {
            code_length: 4,
            needed: 5
        })
    );
    assert!(GpioIrConfig::interrupt(0x1100, 5).validate().is_ok());
}

#[test]
fn error_messages() {
    extern crate std;
    use std::string::ToString;

    assert_eq!(
        ConfigError::GapTooShort {
            gap_ms: 100,
            min_ms: 167
        }
        .to_string(),
        "soft_gap 100ms too short for the sample rate; must be at least 167ms"
    );
    assert_eq!(
        ConfigError::MinorOutOfRange(9).to_string(),
        "minor 9 out of range; must be less than 4"
    );
}
