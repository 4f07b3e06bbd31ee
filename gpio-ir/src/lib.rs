#![no_std]
//! Key code extraction for remote controls wired to a TV capture card's GPIO register.
//!
//! A [`plugin::GpioIrPlugin`] reads the register, skips samples taken while the card's lock bits
//! say the latch is changing, gathers the bits selected by `gpio_mask` into a code and debounces
//! it. Interrupt driven cards use a fixed quiet window after each code; polled cards suppress
//! repeats of the same code until the soft gap has passed.

#[macro_use]
mod macros;

pub mod config;
pub mod debounce;
pub mod extractor;
pub mod mask;
pub mod plugin;
pub mod register;

#[cfg(any(test, feature = "test-utils"))]
pub mod register_test_stub;
#[cfg(any(test, feature = "test-utils"))]
pub mod time_driver_test_stub;

/// A decoded key; at most `code_length` bits wide.
pub type Code = u32;

#[cfg(test)]
#[path = "lib_test.rs"]
mod test;
