//! Names of the driver parameters as they appear in config files and on load
//! command lines.

pub const GPIO_MASK: &str = "gpio_mask";
pub const GPIO_LOCK_MASK: &str = "gpio_lock_mask";
pub const GPIO_XOR_MASK: &str = "gpio_xor_mask";
pub const SOFT_GAP: &str = "soft_gap";
pub const SAMPLE_RATE: &str = "sample_rate";
pub const MINOR: &str = "minor";
pub const CODE_LENGTH: &str = "code_length";
pub const VARIANT: &str = "variant";

pub const VARIANT_POLLED: &str = "polled";
pub const VARIANT_INTERRUPT: &str = "interrupt";

pub const ALL: [&str; 8] = [
    GPIO_MASK,
    GPIO_LOCK_MASK,
    GPIO_XOR_MASK,
    SOFT_GAP,
    SAMPLE_RATE,
    MINOR,
    CODE_LENGTH,
    VARIANT,
];

pub fn is_known(name: &str) -> bool {
    ALL.contains(&name)
}
