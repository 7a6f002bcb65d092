//! Human-readable search durations
//!
//! Durations are stored in nanoseconds. The display unit is picked from the
//! original nanosecond magnitude using half-open thresholds, then the scaled
//! magnitude is rounded half away from zero to two decimals.

use std::fmt;

use crate::core::constants::durations::{
    NANOS_PER_HOUR, NANOS_PER_MICRO, NANOS_PER_MILLI, NANOS_PER_MINUTE, NANOS_PER_SECOND,
};
use crate::core::error::{BenchvizError, Result};

/// Display unit for a duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DurationUnit {
    Nanos,
    Micros,
    Millis,
    Seconds,
    Minutes,
    Hours,
}

impl DurationUnit {
    /// Unit for a nanosecond value; the first threshold the value is below wins
    pub fn for_nanos(nanos: f64) -> Self {
        if nanos < NANOS_PER_MICRO {
            DurationUnit::Nanos
        } else if nanos < NANOS_PER_MILLI {
            DurationUnit::Micros
        } else if nanos < NANOS_PER_SECOND {
            DurationUnit::Millis
        } else if nanos < NANOS_PER_MINUTE {
            DurationUnit::Seconds
        } else if nanos < NANOS_PER_HOUR {
            DurationUnit::Minutes
        } else {
            DurationUnit::Hours
        }
    }

    /// Nanoseconds per one of this unit
    pub fn divisor(&self) -> f64 {
        match self {
            DurationUnit::Nanos => 1.0,
            DurationUnit::Micros => NANOS_PER_MICRO,
            DurationUnit::Millis => NANOS_PER_MILLI,
            DurationUnit::Seconds => NANOS_PER_SECOND,
            DurationUnit::Minutes => NANOS_PER_MINUTE,
            DurationUnit::Hours => NANOS_PER_HOUR,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            DurationUnit::Nanos => "ns",
            DurationUnit::Micros => "µs",
            DurationUnit::Millis => "ms",
            DurationUnit::Seconds => "s",
            DurationUnit::Minutes => "min",
            DurationUnit::Hours => "hr",
        }
    }

    /// Plural name, used in axis labels
    pub fn name(&self) -> &'static str {
        match self {
            DurationUnit::Nanos => "nanoseconds",
            DurationUnit::Micros => "microseconds",
            DurationUnit::Millis => "milliseconds",
            DurationUnit::Seconds => "seconds",
            DurationUnit::Minutes => "minutes",
            DurationUnit::Hours => "hours",
        }
    }

    /// Express a nanosecond value in this unit
    pub fn scale(&self, nanos: f64) -> f64 {
        nanos / self.divisor()
    }
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Format a nanosecond duration as `"<magnitude> <unit>"`.
///
/// # Examples
/// ```
/// use benchviz::reporting::duration::format_duration;
///
/// assert_eq!(format_duration(2_500_000_000.0).unwrap(), "2.50 s");
/// assert_eq!(format_duration(0.0).unwrap(), "0.00 ns");
/// assert!(format_duration(-1.0).is_err());
/// ```
pub fn format_duration(nanos: f64) -> Result<String> {
    if !nanos.is_finite() || nanos < 0.0 {
        return Err(BenchvizError::InvalidDuration(nanos));
    }

    let unit = DurationUnit::for_nanos(nanos);
    let magnitude = round_to_hundredths(unit.scale(nanos.abs()));
    Ok(format!("{magnitude:.2} {}", unit.symbol()))
}

/// Round half away from zero at two decimals
fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
