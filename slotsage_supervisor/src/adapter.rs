//! Input adapter layer: convert raw user-entered fields into a clean
//! `slotsage_core::Observation`.
//!
//! This module is intentionally small and policy-light:
//! - No IO
//! - No async
//! - No estimation rules
//!
//! Frontends hand us whatever their numeric fields currently hold (possibly
//! blank, negative, fractional, or non-finite); the sanitizer guarantees the
//! core only ever sees well-formed unsigned counts.

use std::borrow::Cow;

use slotsage_core::Observation;

/// One raw numeric field as read from a form.
///
/// `raw == None` means the field was blank or unparseable; it reads as zero.
#[derive(Clone, Debug)]
pub struct FieldReading<'a> {
    pub event_id: Cow<'a, str>,
    pub raw: Option<f64>,
}

impl<'a> FieldReading<'a> {
    pub fn new(event_id: impl Into<Cow<'a, str>>, raw: f64) -> Self {
        Self {
            event_id: event_id.into(),
            raw: Some(raw),
        }
    }

    /// A blank field.
    pub fn blank(event_id: impl Into<Cow<'a, str>>) -> Self {
        Self {
            event_id: event_id.into(),
            raw: None,
        }
    }
}

/// Coercion rules for raw field values.
///
/// No policy beyond hygiene: non-finite and negative values become 0,
/// fractional values truncate, and everything is capped at `max_count`.
#[derive(Clone, Copy, Debug)]
pub struct CountSanitizer {
    /// Upper bound applied to every coerced count (and to total trials).
    pub max_count: u32,
}

impl Default for CountSanitizer {
    fn default() -> Self {
        Self { max_count: 1_000_000 }
    }
}

impl CountSanitizer {
    /// Coerce one raw value into a count.
    #[inline]
    pub fn coerce(&self, raw: Option<f64>) -> u32 {
        let v = match raw {
            Some(v) if v.is_finite() && v > 0.0 => v,
            _ => return 0,
        };
        if v >= self.max_count as f64 {
            self.max_count
        } else {
            v as u32
        }
    }
}

/// Trait: map raw field readings into an `Observation`.
///
/// Most frontends will use `BasicObservationBuilder`; the trait is the seam
/// for products that need custom field semantics.
pub trait ObservationBuilder {
    fn build(&self, total_trials: Option<f64>, readings: &[FieldReading<'_>]) -> Observation;
}

/// Default builder: sanitize every field independently and keep the last
/// reading when an event id repeats.
#[derive(Clone, Copy, Debug, Default)]
pub struct BasicObservationBuilder {
    pub sanitizer: CountSanitizer,
}

impl ObservationBuilder for BasicObservationBuilder {
    fn build(&self, total_trials: Option<f64>, readings: &[FieldReading<'_>]) -> Observation {
        let mut obs = Observation::new(self.sanitizer.coerce(total_trials));
        for reading in readings {
            obs.set_count(reading.event_id.as_ref(), self.sanitizer.coerce(reading.raw));
        }
        obs
    }
}
