//! Derived analytics types
//!
//! The snapshot is never persisted; it is recomputed per request from the
//! caller's session rows inside the selected timeframe window.

use std::fmt;

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Aggregation window for analytics queries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    /// Since local midnight.
    Day,
    /// Since the most recent Sunday at local midnight.
    Week,
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Day => "day",
            Timeframe::Week => "week",
        }
    }
}

impl Default for Timeframe {
    fn default() -> Self {
        Timeframe::Day
    }
}

/// A count or time ratio with a designated infinite sentinel.
///
/// `Ratio::of` encodes the division policy: a zero denominator yields the
/// sentinel when the numerator is positive and zero when both are zero.
/// The value is never NaN and never negative.
///
/// On the wire, finite values serialize as JSON numbers and the sentinel as
/// the string `"Infinity"` (JSON has no infinity literal).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ratio(f64);

impl Ratio {
    pub const ZERO: Ratio = Ratio(0.0);
    pub const INFINITE: Ratio = Ratio(f64::INFINITY);

    /// Divide `numerator` by `denominator` under the sentinel policy.
    pub fn of(numerator: f64, denominator: f64) -> Self {
        if denominator == 0.0 {
            if numerator > 0.0 {
                Ratio::INFINITE
            } else {
                Ratio::ZERO
            }
        } else {
            Ratio(numerator / denominator)
        }
    }

    pub fn is_infinite(&self) -> bool {
        self.0.is_infinite()
    }

    /// Finite value, if this ratio is not the sentinel.
    pub fn as_finite(&self) -> Option<f64> {
        if self.0.is_finite() {
            Some(self.0)
        } else {
            None
        }
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_infinite() {
            f.write_str("Infinity")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl Serialize for Ratio {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if self.is_infinite() {
            serializer.serialize_str("Infinity")
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Ratio {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct RatioVisitor;

        impl de::Visitor<'_> for RatioVisitor {
            type Value = Ratio;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a non-negative number or the string \"Infinity\"")
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> std::result::Result<Ratio, E> {
                if value.is_nan() || value < 0.0 {
                    Err(E::custom("ratio must be non-negative and not NaN"))
                } else {
                    Ok(Ratio(value))
                }
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> std::result::Result<Ratio, E> {
                Ok(Ratio(value as f64))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> std::result::Result<Ratio, E> {
                self.visit_f64(value as f64)
            }

            fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<Ratio, E> {
                if value == "Infinity" {
                    Ok(Ratio::INFINITE)
                } else {
                    Err(E::custom(format!("unexpected ratio string: {value}")))
                }
            }
        }

        deserializer.deserialize_any(RatioVisitor)
    }
}

/// Aggregate metrics over one user's sessions within a timeframe window.
///
/// Every field is a pure function of the selected session set; see the
/// aggregator for the formulas.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    pub timeframe: Timeframe,

    /// Completed sessions of kind `pomodoro`.
    pub completed_sessions: i64,
    /// Finalized-incomplete sessions of kind `pomodoro`.
    pub incomplete_sessions: i64,
    /// All sessions of kind `pomodoro` in the window.
    pub total_pomodoro_sessions: i64,
    /// Completed short breaks.
    pub short_breaks: i64,
    /// Completed long breaks.
    pub long_breaks: i64,

    /// Percentage of pomodoro sessions completed, rounded; 0 with no
    /// pomodoro sessions in the window.
    pub completion_rate: i64,

    /// Minutes credited to completed pomodoros (planned + overtime).
    pub total_focus_minutes: i64,
    /// Minutes credited to completed breaks (planned + overtime).
    pub total_break_minutes: i64,
    /// Minutes actually spent in finalized-incomplete pomodoros.
    pub incomplete_focus_minutes: i64,

    /// Completed-vs-incomplete pomodoro count ratio.
    pub completed_vs_incomplete_ratio: Ratio,
    /// Completed-vs-incomplete focus time ratio.
    pub focus_time_ratio: Ratio,

    /// Total pause count across pomodoro sessions.
    pub total_pauses: i64,
    /// Average pauses per completed pomodoro, one decimal.
    pub average_pauses_per_completed: f64,
    /// Total paused minutes across pomodoro sessions, rounded.
    pub total_pause_minutes: i64,

    /// Mean overtime seconds among sessions that accrued any, rounded.
    pub average_extra_secs: i64,
}
