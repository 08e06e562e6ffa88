//! Stochastic oscillator (%K and %D).

use std::collections::VecDeque;

use rust_decimal::Decimal;
use stokast_core::Bar;

use crate::core::{decimal_from_usize, Indicator, IndicatorError};

/// Oscillator values for one bar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StochasticOutput {
    /// %K: position of the close within the rolling high-low range, scaled to 0..=100.
    pub k: Decimal,
    /// %D: arithmetic mean of the trailing `d_period` %K values. `None` until
    /// that many consecutive defined %K values have accumulated.
    pub d: Option<Decimal>,
}

/// Stochastic oscillator over rolling high/low windows.
///
/// Emits nothing until `k_period` bars have been seen. A flat window
/// (`highest high == lowest low`) makes %K indeterminate: the bar yields no
/// output and the %D accumulation starts over, so %D needs `d_period`
/// consecutive defined %K values again.
pub struct Stochastic {
    k_period: usize,
    d_period: usize,
    d_divisor: Decimal,
    highs: VecDeque<Decimal>,
    lows: VecDeque<Decimal>,
    recent_ks: VecDeque<Decimal>,
    k_sum: Decimal,
}

impl Stochastic {
    /// Builds a new oscillator with the provided %K lookback and %D smoothing
    /// window.
    pub fn new(k_period: usize, d_period: usize) -> Result<Self, IndicatorError> {
        if k_period == 0 {
            return Err(IndicatorError::invalid_period("Stochastic %K", k_period));
        }
        if d_period == 0 {
            return Err(IndicatorError::invalid_period("Stochastic %D", d_period));
        }
        Ok(Self {
            k_period,
            d_period,
            d_divisor: decimal_from_usize(d_period),
            highs: VecDeque::with_capacity(k_period),
            lows: VecDeque::with_capacity(k_period),
            recent_ks: VecDeque::with_capacity(d_period),
            k_sum: Decimal::ZERO,
        })
    }

    fn clear_d_run(&mut self) {
        self.recent_ks.clear();
        self.k_sum = Decimal::ZERO;
    }
}

impl Indicator for Stochastic {
    type Input = Bar;
    type Output = StochasticOutput;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        push_window(&mut self.highs, self.k_period, input.high);
        push_window(&mut self.lows, self.k_period, input.low);

        if self.highs.len() < self.k_period {
            return None;
        }

        let highest = self.highs.iter().copied().reduce(Decimal::max)?;
        let lowest = self.lows.iter().copied().reduce(Decimal::min)?;
        let range = highest - lowest;
        if range.is_zero() {
            // Indeterminate %K also breaks the consecutive run %D needs.
            self.clear_d_run();
            return None;
        }

        let k = (input.close - lowest) / range * Decimal::ONE_HUNDRED;

        self.recent_ks.push_back(k);
        self.k_sum += k;
        if self.recent_ks.len() > self.d_period {
            if let Some(oldest) = self.recent_ks.pop_front() {
                self.k_sum -= oldest;
            }
        }
        let d = (self.recent_ks.len() == self.d_period).then(|| self.k_sum / self.d_divisor);

        Some(StochasticOutput { k, d })
    }

    fn reset(&mut self) {
        self.highs.clear();
        self.lows.clear();
        self.clear_d_run();
    }
}

fn push_window(window: &mut VecDeque<Decimal>, period: usize, value: Decimal) {
    window.push_back(value);
    if window.len() > period {
        window.pop_front();
    }
}
