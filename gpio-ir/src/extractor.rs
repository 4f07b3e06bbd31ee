use embassy_time::Instant;

use crate::{
    config::{Settings, Variant},
    debounce::Debouncer,
    register::GpioRegister,
    Code,
};

/// What happened to one register sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Sample {
    /// A code to report.
    Code(Code),
    /// The debounce filter held back this code.
    Suppressed(Code),
    /// The lock bits were set; the latch was still changing.
    Locked,
    /// The register could not be read.
    ReadFailed,
}
impl Sample {
    pub fn code(&self) -> Option<Code> {
        match self {
            Sample::Code(code) => Some(*code),
            _ => None,
        }
    }
}

/// The register value is not safe to decode while any lock bit is set.
#[inline]
pub fn is_locked(raw: u32, lock_mask: u32) -> bool {
    lock_mask != 0 && raw & lock_mask != 0
}

/// Turns register samples for one device instance into debounced key codes.
///
/// The host must not call into one instance from two contexts at once; `&mut self` on the
/// extraction methods is the only serialization there is.
pub struct Extractor<R: GpioRegister> {
    register: R,
    settings: Settings,
    debouncer: Debouncer,
}

impl<R: GpioRegister> Extractor<R> {
    pub fn new(register: R, settings: Settings) -> Self {
        Self {
            register,
            debouncer: Debouncer::new(settings.variant().debounce_policy(), settings.gap()),
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn debouncer(&self) -> &Debouncer {
        &self.debouncer
    }

    pub fn into_register(self) -> R {
        self.register
    }

    /// Read the register now and return a code if one should be reported.
    pub fn try_extract(&mut self) -> Option<Code> {
        self.extract_at(Instant::now())
    }

    pub fn extract_at(&mut self, now: Instant) -> Option<Code> {
        self.sample_at(now).code()
    }

    pub fn sample_at(&mut self, now: Instant) -> Sample {
        let minor = self.settings.minor();
        let raw = match self.register.read(minor) {
            Ok(raw) => raw,
            Err(_) => {
                crate::debug!("minor {}: gpio read failed", minor);
                return Sample::ReadFailed;
            }
        };

        let Some(code) = self.decode(raw) else {
            crate::debug!("minor {}: locked {:#x}", minor, raw);
            self.debouncer.unsettled();
            return Sample::Locked;
        };

        if self.debouncer.accept(code, now) {
            crate::debug!("minor {}: code {:#x}", minor, code);
            Sample::Code(code)
        } else {
            Sample::Suppressed(code)
        }
    }

    /// Decode `raw` without debouncing. `None` when the lock bits are set.
    pub fn decode(&self, raw: u32) -> Option<Code> {
        decode(&self.settings, raw)
    }

    /// Forget debounce history, as after re-opening the device.
    pub fn reset(&mut self) {
        self.debouncer.reset();
    }
}

/// Apply the lock gate, polarity correction and extraction for `settings` to one register value.
pub fn decode(settings: &Settings, raw: u32) -> Option<Code> {
    if is_locked(raw, settings.lock_mask()) {
        return None;
    }
    let mask = settings.mask();
    Some(match settings.variant() {
        Variant::Polled => mask.extract(raw ^ settings.xor_mask()),
        Variant::Interrupt => mask.masked_shift(raw),
    })
}

#[cfg(test)]
#[path = "extractor_test.rs"]
mod test;
