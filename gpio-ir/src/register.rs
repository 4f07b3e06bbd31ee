//! Sources of raw GPIO register values.

use embedded_hal::digital::InputPin;
use gpio_ir_common::limits::REGISTER_BITS;

/// Read access to a capture card's GPIO register.
///
/// Reads must not block. An error means "no value this time"; the extractor reports it as no code
/// and tries again on the next poll or interrupt.
pub trait GpioRegister {
    type Error: core::fmt::Debug;

    fn read(&mut self, minor: u8) -> Result<u32, Self::Error>;
}

impl<T: GpioRegister + ?Sized> GpioRegister for &mut T {
    type Error = T::Error;

    fn read(&mut self, minor: u8) -> Result<u32, Self::Error> {
        T::read(self, minor)
    }
}

/// Wraps a host supplied read function.
///
/// ```ignore
/// let register = FnRegister::new(|minor| bttv::read_gpio(minor));
/// ```
pub struct FnRegister<F>(F);

impl<F> FnRegister<F> {
    pub fn new(read: F) -> Self {
        Self(read)
    }
}

impl<F, E> GpioRegister for FnRegister<F>
where
    F: FnMut(u8) -> Result<u32, E>,
    E: core::fmt::Debug,
{
    type Error = E;

    fn read(&mut self, minor: u8) -> Result<u32, E> {
        (self.0)(minor)
    }
}

/// A register assembled from individual input pins; pin `i` is register bit `i`.
///
/// Boards without a latched GPIO word wire the remote's code lines to ordinary pins. All pins are
/// read on every call and a failure on any of them fails the whole read, so a value is never
/// assembled from a partial set of pins. The minor is ignored.
pub struct PinBank<I: InputPin, const N: usize> {
    pins: [I; N],
}

impl<I: InputPin, const N: usize> PinBank<I, N> {
    const FITS: () = assert!(N <= REGISTER_BITS as usize, "at most 32 pins");

    pub fn new(pins: [I; N]) -> Self {
        let () = Self::FITS;
        Self { pins }
    }

    pub fn into_pins(self) -> [I; N] {
        self.pins
    }
}

impl<I: InputPin, const N: usize> GpioRegister for PinBank<I, N> {
    type Error = I::Error;

    fn read(&mut self, _minor: u8) -> Result<u32, Self::Error> {
        let mut raw = 0;
        for (i, pin) in self.pins.iter_mut().enumerate() {
            if pin.is_high()? {
                raw |= 1 << i;
            }
        }
        Ok(raw)
    }
}

#[cfg(test)]
#[path = "register_test.rs"]
mod test;
