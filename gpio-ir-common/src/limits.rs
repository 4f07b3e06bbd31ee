//! Bounds applied when validating a driver instance's parameters.

/// Width in bits of the GPIO register word.
pub const REGISTER_BITS: u32 = 32;

/// Number of capture card instances a host can bind.
pub const MAX_DEVICES: u8 = 4;

pub mod sample_rate {
    /// Samples per second.
    pub const MIN: u8 = 2;
    pub const MAX: u8 = 50;
    pub const DEFAULT: u8 = 10;
}

pub mod soft_gap {
    /// Interrupt variant window, in milliseconds.
    pub const INTERRUPT_MIN_MS: u16 = 100;
    pub const INTERRUPT_MAX_MS: u16 = 1000;
    pub const INTERRUPT_DEFAULT_MS: u16 = 400;

    /// Used by the polled variant when no gap is configured, unless the sample rate needs longer.
    pub const DEFAULT_MS: u16 = 400;
}

pub mod code_length {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 16;
}

pub fn is_valid_minor(minor: u8) -> bool {
    minor < MAX_DEVICES
}
