//! Recorded register traces, one `<time_ms> <raw>` sample per line.

use std::collections::VecDeque;

use embassy_time::Instant;
use gpio_ir::{
    config::Settings,
    extractor::{Extractor, Sample},
    register::GpioRegister,
};

use crate::{parser::parse_number, ConfigFileError};

/// Written in place of a raw value when the register could not be read.
pub const FAIL: &str = "fail";

/// Latest time a trace may use; later times overflow the tick counter.
pub const MAX_TIME_MS: u64 = u64::MAX / embassy_time::TICK_HZ;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceSample {
    pub time_ms: u64,
    /// `None` for a failed read.
    pub raw: Option<u32>,
}

pub fn parse_trace(source: &str) -> Result<Vec<TraceSample>, ConfigFileError> {
    let mut samples: Vec<TraceSample> = Vec::new();
    let mut start = 0;
    for line in source.split_inclusive('\n') {
        let line_start = start;
        start += line.len();
        let content = match line.find('#') {
            Some(i) => &line[..i],
            None => line,
        };
        let trimmed = content.trim();
        if trimmed.is_empty() {
            continue;
        }
        let offset = line_start + (content.len() - content.trim_start().len());
        let span = offset..offset + trimmed.len();

        let mut fields = trimmed.split_whitespace();
        let (Some(time), Some(raw), None) = (fields.next(), fields.next(), fields.next()) else {
            return Err(ConfigFileError::new("Expected <time_ms> <raw>", span));
        };
        let Some(time_ms) = parse_number(time) else {
            return Err(ConfigFileError::new(
                format!("Invalid time {time:?}"),
                offset..offset + time.len(),
            ));
        };
        if time_ms > MAX_TIME_MS {
            return Err(ConfigFileError::new(
                format!("Time {time} out of range; must be at most {MAX_TIME_MS}"),
                offset..offset + time.len(),
            ));
        }
        if samples.last().is_some_and(|prev| prev.time_ms > time_ms) {
            return Err(ConfigFileError::new("Time goes backwards", span));
        }
        let raw = if raw == FAIL {
            None
        } else {
            let raw_span = span.end - raw.len()..span.end;
            let value = parse_number(raw).ok_or_else(|| {
                ConfigFileError::new(format!("Invalid raw value {raw:?}"), raw_span.clone())
            })?;
            Some(u32::try_from(value).map_err(|_| {
                ConfigFileError::new(format!("{raw} does not fit the register"), raw_span)
            })?)
        };
        samples.push(TraceSample { time_ms, raw });
    }
    Ok(samples)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayError {
    /// The trace recorded a failed read here.
    Recorded,
    Exhausted,
}

/// Serves raw values from a trace in order, one per read.
pub struct ReplayRegister {
    samples: VecDeque<Option<u32>>,
}

impl ReplayRegister {
    pub fn new(samples: &[TraceSample]) -> Self {
        Self {
            samples: samples.iter().map(|s| s.raw).collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.samples.len()
    }
}

impl GpioRegister for ReplayRegister {
    type Error = ReplayError;

    fn read(&mut self, _minor: u8) -> Result<u32, ReplayError> {
        self.samples
            .pop_front()
            .ok_or(ReplayError::Exhausted)?
            .ok_or(ReplayError::Recorded)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Replayed {
    pub time_ms: u64,
    pub sample: Sample,
}

/// Run every trace sample through an extractor, stamping each read with the trace's time.
pub fn replay(settings: Settings, trace: &[TraceSample]) -> Vec<Replayed> {
    let mut extractor = Extractor::new(ReplayRegister::new(trace), settings);
    trace
        .iter()
        .map(|s| {
            let sample = extractor.sample_at(Instant::from_millis(s.time_ms));
            log::debug!("{} {:?} -> {:?}", s.time_ms, s.raw, sample);
            Replayed {
                time_ms: s.time_ms,
                sample,
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "replay_test.rs"]
mod test;
