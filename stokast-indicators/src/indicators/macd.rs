//! Moving Average Convergence Divergence (MACD).

use rust_decimal::Decimal;

use crate::core::{Indicator, IndicatorError};
use crate::indicators::ema::Ema;

/// MACD output (line and signal line).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MacdOutput {
    /// MACD line value (fast EMA minus slow EMA).
    pub macd: Decimal,
    /// Signal line value (EMA of the MACD line, seeded from its first value).
    pub signal: Decimal,
}

/// Moving Average Convergence Divergence indicator.
///
/// Because the underlying EMAs seed from their first input, both lines are
/// defined from the first observation onward.
pub struct Macd {
    fast: Ema,
    slow: Ema,
    signal: Ema,
}

impl Macd {
    /// Creates a MACD indicator with the provided fast/slow/signal periods.
    pub fn new(
        fast_period: usize,
        slow_period: usize,
        signal_period: usize,
    ) -> Result<Self, IndicatorError> {
        if fast_period == 0 {
            return Err(IndicatorError::invalid_period("MACD fast", fast_period));
        }
        if slow_period == 0 {
            return Err(IndicatorError::invalid_period("MACD slow", slow_period));
        }
        if signal_period == 0 {
            return Err(IndicatorError::invalid_period("MACD signal", signal_period));
        }
        Ok(Self {
            fast: Ema::new(fast_period)?,
            slow: Ema::new(slow_period)?,
            signal: Ema::new(signal_period)?,
        })
    }
}

impl Indicator for Macd {
    type Input = Decimal;
    type Output = MacdOutput;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        let fast = self.fast.next(input)?;
        let slow = self.slow.next(input)?;
        let macd = fast - slow;
        let signal = self.signal.next(macd)?;
        Some(MacdOutput { macd, signal })
    }

    fn reset(&mut self) {
        self.fast.reset();
        self.slow.reset();
        self.signal.reset();
    }
}
