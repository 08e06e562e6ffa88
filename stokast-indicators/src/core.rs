//! Foundational trait and error type shared by every indicator.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors surfaced while constructing an indicator.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum IndicatorError {
    /// The requested rolling window cannot drive the indicator.
    #[error("{indicator} period must be greater than zero, got {period}")]
    InvalidPeriod {
        /// Name of the indicator that rejected the period.
        indicator: &'static str,
        /// The offending period value.
        period: usize,
    },
}

impl IndicatorError {
    /// Convenience constructor for [`IndicatorError::InvalidPeriod`].
    pub fn invalid_period(indicator: &'static str, period: usize) -> Self {
        Self::InvalidPeriod { indicator, period }
    }
}

/// A streaming computation over an ordered series.
///
/// Implementations are fed one observation per call to [`Indicator::next`]
/// and return `None` until they have produced a defined value. `None` is the
/// only representation of "no value": indicators never emit NaN, infinity,
/// or a placeholder number.
pub trait Indicator {
    /// Observation type consumed per step.
    type Input;
    /// Value type produced once the indicator has enough history.
    type Output;

    /// Feeds one observation and returns the indicator value for it, if any.
    fn next(&mut self, input: Self::Input) -> Option<Self::Output>;

    /// Clears all accumulated state, as if freshly constructed.
    fn reset(&mut self);
}

/// Converts a window size into the decimal divisor/denominator it implies.
pub(crate) fn decimal_from_usize(value: usize) -> Decimal {
    Decimal::from(value as u64)
}
