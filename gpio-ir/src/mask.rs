use crate::Code;

/// A code mask shifted down to its lowest set bit.
///
/// The shift and code length depend only on the configured mask, so they are computed once when
/// an instance is configured and never change afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NormalizedMask {
    /// Configured mask shifted right by `pre_shift`; bit 0 is always set.
    mask: u32,
    /// Index of the lowest set bit of the configured mask.
    pre_shift: u8,
    /// Number of set bits in `mask`.
    code_length: u8,
}

impl NormalizedMask {
    /// Returns `None` for a zero mask, which selects no bits.
    pub fn new(gpio_mask: u32) -> Option<Self> {
        if gpio_mask == 0 {
            return None;
        }
        let pre_shift = gpio_mask.trailing_zeros();
        let mask = gpio_mask >> pre_shift;

        Some(Self {
            mask,
            pre_shift: pre_shift as u8,
            code_length: mask.count_ones() as u8,
        })
    }

    pub fn mask(&self) -> u32 {
        self.mask
    }

    pub fn pre_shift(&self) -> u8 {
        self.pre_shift
    }

    pub fn code_length(&self) -> u8 {
        self.code_length
    }

    /// The mask as it was configured, in register bit positions.
    pub fn gpio_mask(&self) -> u32 {
        self.mask << self.pre_shift
    }

    /// Collect the register bits selected by the mask into a contiguous code.
    ///
    /// Selected bits keep their relative order: the lowest selected register bit becomes bit 0 of
    /// the code, the next selected bit becomes bit 1 and so on, whatever the gaps between them.
    pub fn extract(&self, raw: u32) -> Code {
        let mut value = raw >> self.pre_shift;
        let mut mask = self.mask;
        let mut code = 0;
        let mut bit = 0;

        while mask != 0 {
            if mask & 1 == 1 {
                code |= (value & 1) << bit;
                bit += 1;
            }
            mask >>= 1;
            value >>= 1;
        }
        code
    }

    /// Select the masked bits and shift them down without closing the gaps between them.
    pub fn masked_shift(&self, raw: u32) -> Code {
        (raw >> self.pre_shift) & self.mask
    }
}

#[cfg(test)]
#[path = "mask_test.rs"]
mod test;
