//! Exponential Moving Average (EMA).

use rust_decimal::Decimal;

use crate::core::{decimal_from_usize, Indicator, IndicatorError};

/// Computes an exponentially-weighted moving average with smoothing factor
/// `2 / (period + 1)`.
///
/// The average seeds from the first observation and emits a value for every
/// input from then on; there is no warm-up gate. Callers who want a converged
/// long EMA supply enough leading history themselves.
#[derive(Debug, Clone)]
pub struct Ema {
    alpha: Decimal,
    state: Option<Decimal>,
}

impl Ema {
    /// Creates a new EMA with the provided period.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        if period == 0 {
            return Err(IndicatorError::invalid_period("EMA", period));
        }

        let alpha = Decimal::from(2) / decimal_from_usize(period + 1);

        Ok(Self { alpha, state: None })
    }

    /// Returns the current EMA value, if the indicator has seen any input.
    pub fn value(&self) -> Option<Decimal> {
        self.state
    }
}

impl Indicator for Ema {
    type Input = Decimal;
    type Output = Decimal;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        let next = match self.state {
            Some(current) => (input - current) * self.alpha + current,
            None => input,
        };
        self.state = Some(next);
        Some(next)
    }

    fn reset(&mut self) {
        self.state = None;
    }
}
