//! Reads driver parameters from a config file:
//!
//! ```text
//! # Hauppauge WinTV with the remote on GPIO 8..12
//! [gpio_ir]
//! variant = polled
//! minor = 0
//! gpio_mask = 0x1f00
//! gpio_lock_mask = 0x8000
//! soft_gap = 500
//! sample_rate = 12
//! ```

use std::ops::Range;

use gpio_ir::config::{GpioIrConfig, Variant};
use gpio_ir_common::params;

use crate::ConfigFileError;

type Result<T> = std::result::Result<T, ConfigFileError>;

const SECTION: &str = "gpio_ir";

#[derive(Default)]
struct Values {
    variant: Option<Variant>,
    minor: Option<u8>,
    gpio_mask: Option<u32>,
    gpio_lock_mask: Option<u32>,
    gpio_xor_mask: Option<u32>,
    soft_gap: Option<u16>,
    sample_rate: Option<u8>,
    code_length: Option<u8>,
}

struct Parser<'source> {
    source: &'source str,
    in_section: bool,
    seen: Vec<&'source str>,
    values: Values,
}

pub fn parse(source: &str) -> Result<GpioIrConfig> {
    let mut parser = Parser::new(source);
    parser.parse_lines()?;
    parser.build_config()
}

/// Parse a decimal or `0x` prefixed hexadecimal number.
pub fn parse_number(text: &str) -> Option<u64> {
    let text = text.replace('_', "");
    match text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => text.parse().ok(),
    }
}

impl<'source> Parser<'source> {
    fn new(source: &'source str) -> Self {
        Self {
            source,
            in_section: false,
            seen: Vec::new(),
            values: Values::default(),
        }
    }

    fn parse_lines(&mut self) -> Result<()> {
        let source = self.source;
        let mut start = 0;
        for line in source.split_inclusive('\n') {
            let end = start + line.len();
            let content = match line.find('#') {
                Some(i) => &line[..i],
                None => line,
            };
            let trimmed = content.trim();
            if !trimmed.is_empty() {
                let offset = start + (content.len() - content.trim_start().len());
                self.parse_line(trimmed, offset)?;
            }
            start = end;
        }
        Ok(())
    }

    fn parse_line(&mut self, line: &'source str, offset: usize) -> Result<()> {
        let span = offset..offset + line.len();

        if let Some(name) = line.strip_prefix('[') {
            let Some(name) = name.strip_suffix(']') else {
                return Err(self.error("Missing ]", span));
            };
            if name.trim() != SECTION {
                return Err(self.error(format!("Unknown section [{}]", name.trim()), span));
            }
            if self.in_section {
                return Err(self.error("Duplicate section", span));
            }
            self.in_section = true;
            return Ok(());
        }

        if !self.in_section {
            return Err(self.error(format!("Expected [{SECTION}] section"), span));
        }

        let Some(eq) = line.find('=') else {
            return Err(self.error("Expected name = value", span));
        };
        let name = line[..eq].trim_end();
        let value = line[eq + 1..].trim_start();
        let name_span = offset..offset + name.len();
        let value_span = offset + (line.len() - value.len())..span.end;

        if !params::is_known(name) {
            return Err(self.error(format!("Unknown parameter {name:?}"), name_span));
        }
        if self.seen.contains(&name) {
            return Err(self.error(format!("Duplicate parameter {name:?}"), name_span));
        }
        if value.is_empty() {
            return Err(self.error("Missing value", span));
        }
        self.seen.push(name);
        self.assign(name, value, value_span)
    }

    fn assign(&mut self, name: &str, value: &str, span: Range<usize>) -> Result<()> {
        match name {
            params::VARIANT => {
                self.values.variant = Some(match value {
                    params::VARIANT_POLLED => Variant::Polled,
                    params::VARIANT_INTERRUPT => Variant::Interrupt,
                    _ => {
                        return Err(self.error(
                            format!(
                                "Invalid variant; expected {} or {}",
                                params::VARIANT_POLLED,
                                params::VARIANT_INTERRUPT
                            ),
                            span,
                        ))
                    }
                })
            }
            params::MINOR => self.values.minor = Some(self.number(value, span)?),
            params::GPIO_MASK => self.values.gpio_mask = Some(self.number(value, span)?),
            params::GPIO_LOCK_MASK => self.values.gpio_lock_mask = Some(self.number(value, span)?),
            params::GPIO_XOR_MASK => self.values.gpio_xor_mask = Some(self.number(value, span)?),
            params::SOFT_GAP => self.values.soft_gap = Some(self.number(value, span)?),
            params::SAMPLE_RATE => self.values.sample_rate = Some(self.number(value, span)?),
            params::CODE_LENGTH => self.values.code_length = Some(self.number(value, span)?),
            _ => unreachable!("params::is_known checked {name}"),
        }
        Ok(())
    }

    fn number<T: TryFrom<u64>>(&self, value: &str, span: Range<usize>) -> Result<T> {
        let Some(n) = parse_number(value) else {
            return Err(self.error(format!("Invalid number {value:?}"), span));
        };
        T::try_from(n).map_err(|_| self.error(format!("{value} is too large"), span))
    }

    fn error(&self, message: impl Into<String>, span: Range<usize>) -> ConfigFileError {
        ConfigFileError::new(message, span)
    }

    fn build_config(self) -> Result<GpioIrConfig> {
        if !self.in_section {
            return Err(format!("Missing [{SECTION}] section").as_str().into());
        }
        let v = self.values;
        let Some(gpio_mask) = v.gpio_mask else {
            return Err(format!("Missing {}", params::GPIO_MASK).as_str().into());
        };

        let mut config = match v.variant.unwrap_or(Variant::Polled) {
            Variant::Polled => GpioIrConfig::polled(gpio_mask),
            Variant::Interrupt => GpioIrConfig::interrupt(gpio_mask, v.code_length.unwrap_or(0)),
        };
        if let Some(minor) = v.minor {
            config.minor = minor;
        }
        if let Some(lock_mask) = v.gpio_lock_mask {
            config.gpio_lock_mask = lock_mask;
        }
        if let Some(xor_mask) = v.gpio_xor_mask {
            config.gpio_xor_mask = xor_mask;
        }
        if let Some(gap) = v.soft_gap {
            config.soft_gap_ms = gap;
        }
        if let Some(rate) = v.sample_rate {
            config.sample_rate = rate;
        }
        if let Some(code_length) = v.code_length {
            config.code_length = code_length;
        }
        Ok(config)
    }
}

#[cfg(test)]
#[path = "parser_test.rs"]
mod test;
