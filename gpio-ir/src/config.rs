use core::fmt;

use embassy_time::Duration;
use gpio_ir_common::{
    limits::{self, code_length, sample_rate, soft_gap},
    math,
};

use crate::{debounce::DebouncePolicy, mask::NormalizedMask};

/// How the host drives extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Variant {
    /// Extraction runs once per "GPIO changed" interrupt.
    Interrupt,
    /// Extraction runs `sample_rate` times a second.
    Polled,
}
impl Variant {
    pub fn debounce_policy(&self) -> DebouncePolicy {
        match self {
            Variant::Interrupt => DebouncePolicy::FixedWindow,
            Variant::Polled => DebouncePolicy::ValueAware,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    ZeroMask,
    MinorOutOfRange(u8),
    SampleRateOutOfRange(u8),
    /// A polled gap must cover two sample periods.
    GapTooShort {
        gap_ms: u16,
        min_ms: u16,
    },
    GapOutOfRange(u16),
    CodeLengthOutOfRange(u8),
    /// The interrupt variant's code length cannot hold the shifted mask.
    CodeLengthTooShort {
        code_length: u8,
        needed: u8,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroMask => write!(f, "gpio_mask must select at least one bit"),
            ConfigError::MinorOutOfRange(minor) => write!(
                f,
                "minor {} out of range; must be less than {}",
                minor,
                limits::MAX_DEVICES
            ),
            ConfigError::SampleRateOutOfRange(rate) => write!(
                f,
                "sample_rate {} out of range {}..={}",
                rate,
                sample_rate::MIN,
                sample_rate::MAX
            ),
            ConfigError::GapTooShort { gap_ms, min_ms } => write!(
                f,
                "soft_gap {}ms too short for the sample rate; must be at least {}ms",
                gap_ms, min_ms
            ),
            ConfigError::GapOutOfRange(gap_ms) => write!(
                f,
                "soft_gap {}ms out of range {}..={}",
                gap_ms,
                soft_gap::INTERRUPT_MIN_MS,
                soft_gap::INTERRUPT_MAX_MS
            ),
            ConfigError::CodeLengthOutOfRange(len) => write!(
                f,
                "code_length {} out of range {}..={}",
                len,
                code_length::MIN,
                code_length::MAX
            ),
            ConfigError::CodeLengthTooShort {
                code_length,
                needed,
            } => write!(
                f,
                "code_length {} too short; gpio_mask needs {} bits",
                code_length, needed
            ),
        }
    }
}

/// Driver parameters as supplied by the host; nothing is checked until [`GpioIrConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GpioIrConfig {
    pub variant: Variant,
    /// Which capture card to read.
    pub minor: u8,
    pub gpio_mask: u32,
    /// Register bits that are set while the latch is changing. Zero disables the check.
    pub gpio_lock_mask: u32,
    /// Bits to invert before extraction. Polled variant only.
    pub gpio_xor_mask: u32,
    /// Debounce window in milliseconds. Zero selects the default for the polled variant.
    pub soft_gap_ms: u16,
    /// Samples per second. Polled variant only.
    pub sample_rate: u8,
    /// Width of the reported code. Interrupt variant only; the polled variant derives it from
    /// `gpio_mask`.
    pub code_length: u8,
}

impl Default for GpioIrConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Polled,
            minor: 0,
            gpio_mask: 0,
            gpio_lock_mask: 0,
            gpio_xor_mask: 0,
            soft_gap_ms: 0,
            sample_rate: sample_rate::DEFAULT,
            code_length: 0,
        }
    }
}

impl GpioIrConfig {
    pub fn polled(gpio_mask: u32) -> Self {
        Self {
            gpio_mask,
            ..Default::default()
        }
    }

    pub fn interrupt(gpio_mask: u32, code_length: u8) -> Self {
        Self {
            variant: Variant::Interrupt,
            gpio_mask,
            soft_gap_ms: soft_gap::INTERRUPT_DEFAULT_MS,
            code_length,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<Settings, ConfigError> {
        let result = self.check();
        match &result {
            Ok(settings) => crate::info!(
                "minor {}: mask {:#x} shift {} length {}",
                self.minor,
                settings.mask.mask(),
                settings.mask.pre_shift(),
                settings.code_length
            ),
            Err(err) => crate::warn!("minor {}: rejected config {:?}", self.minor, err),
        }
        result
    }

    fn check(&self) -> Result<Settings, ConfigError> {
        if !limits::is_valid_minor(self.minor) {
            return Err(ConfigError::MinorOutOfRange(self.minor));
        }
        let mask = NormalizedMask::new(self.gpio_mask).ok_or(ConfigError::ZeroMask)?;

        match self.variant {
            Variant::Polled => {
                if !(sample_rate::MIN..=sample_rate::MAX).contains(&self.sample_rate) {
                    return Err(ConfigError::SampleRateOutOfRange(self.sample_rate));
                }
                let min_ms = math::min_poll_gap_ms(self.sample_rate);
                // An unset gap is widened to cover slow sample rates.
                let gap_ms = if self.soft_gap_ms == 0 {
                    soft_gap::DEFAULT_MS.max(min_ms)
                } else {
                    self.soft_gap_ms
                };
                if gap_ms < min_ms {
                    return Err(ConfigError::GapTooShort { gap_ms, min_ms });
                }

                Ok(Settings {
                    variant: self.variant,
                    minor: self.minor,
                    mask,
                    lock_mask: self.gpio_lock_mask,
                    xor_mask: self.gpio_xor_mask,
                    gap: Duration::from_millis(gap_ms as u64),
                    sample_rate: Some(self.sample_rate),
                    code_length: mask.code_length(),
                })
            }
            Variant::Interrupt => {
                if !(soft_gap::INTERRUPT_MIN_MS..=soft_gap::INTERRUPT_MAX_MS)
                    .contains(&self.soft_gap_ms)
                {
                    return Err(ConfigError::GapOutOfRange(self.soft_gap_ms));
                }
                if !(code_length::MIN..=code_length::MAX).contains(&self.code_length) {
                    return Err(ConfigError::CodeLengthOutOfRange(self.code_length));
                }
                let needed = math::bit_width(mask.mask()) as u8;
                if self.code_length < needed {
                    return Err(ConfigError::CodeLengthTooShort {
                        code_length: self.code_length,
                        needed,
                    });
                }
                if self.gpio_xor_mask != 0 {
                    crate::warn!("minor {}: gpio_xor_mask ignored", self.minor);
                }

                Ok(Settings {
                    variant: self.variant,
                    minor: self.minor,
                    mask,
                    lock_mask: self.gpio_lock_mask,
                    xor_mask: 0,
                    gap: Duration::from_millis(self.soft_gap_ms as u64),
                    sample_rate: None,
                    code_length: self.code_length,
                })
            }
        }
    }
}

/// A validated configuration. Only [`GpioIrConfig::validate`] makes these, so holding one means
/// every bound has been checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    variant: Variant,
    minor: u8,
    mask: NormalizedMask,
    lock_mask: u32,
    xor_mask: u32,
    gap: Duration,
    sample_rate: Option<u8>,
    code_length: u8,
}

impl Settings {
    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn minor(&self) -> u8 {
        self.minor
    }

    pub fn mask(&self) -> &NormalizedMask {
        &self.mask
    }

    pub fn lock_mask(&self) -> u32 {
        self.lock_mask
    }

    pub fn xor_mask(&self) -> u32 {
        self.xor_mask
    }

    pub fn gap(&self) -> Duration {
        self.gap
    }

    pub fn sample_rate(&self) -> Option<u8> {
        self.sample_rate
    }

    /// Time between polls, for the polled variant.
    pub fn sample_period(&self) -> Option<Duration> {
        self.sample_rate
            .map(|rate| Duration::from_millis(math::sample_period_ms(rate) as u64))
    }

    pub fn code_length(&self) -> u8 {
        self.code_length
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod test;
