/// Smallest soft gap, in milliseconds, a polled instance may use at `sample_rate` samples per
/// second.
///
/// A repeat of the same key must span at least two sample periods, otherwise a held button would
/// be reported on every other sample.
///
/// ```
/// assert_eq!(gpio_ir_common::math::min_poll_gap_ms(12), 167);
/// assert_eq!(gpio_ir_common::math::min_poll_gap_ms(0), u16::MAX);
/// ```
pub fn min_poll_gap_ms(sample_rate: u8) -> u16 {
    if sample_rate == 0 {
        return u16::MAX;
    }
    2000u16.div_ceil(sample_rate as u16)
}

/// Milliseconds between two samples at `sample_rate` samples per second, rounded down.
pub fn sample_period_ms(sample_rate: u8) -> u16 {
    if sample_rate == 0 {
        return u16::MAX;
    }
    1000 / sample_rate as u16
}

/// Number of bits needed to hold `value`; zero for zero.
pub fn bit_width(value: u32) -> u32 {
    u32::BITS - value.leading_zeros()
}

#[cfg(test)]
#[path = "math_test.rs"]
mod test;
