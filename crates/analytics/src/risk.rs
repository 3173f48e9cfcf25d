//! Risk statistics: period returns, annualised Sharpe ratio, and the
//! streaming high-water-mark / max-drawdown update.

use crate::math::{mean, std_dev};
use core_types::{DRAWDOWN_DP, DerivedMetrics, EquityPoint};
use rust_decimal::{Decimal, MathematicalOps};

/// Period-over-period fractional changes of an equity curve.
///
/// Yields `curve.len() - 1` values. A period starting from a non-positive
/// equity, or whose change does not fit in a `Decimal`, contributes `0`.
pub fn returns(curve: &[EquityPoint]) -> Vec<Decimal> {
    curve
        .windows(2)
        .map(|w| {
            let (prev, next) = (w[0].equity, w[1].equity);
            if prev <= Decimal::ZERO {
                return Decimal::ZERO;
            }
            next.checked_sub(prev)
                .and_then(|delta| delta.checked_div(prev))
                .unwrap_or(Decimal::ZERO)
        })
        .collect()
}

/// Annualised Sharpe ratio with a zero risk-free rate:
/// `mean(returns) / stdev(returns) * sqrt(periods_per_year)`.
///
/// Returns `0` for fewer than two points, for zero-variance returns, and when
/// the statistics overflow.
/// The annualisation factor assumes one curve point per period; it does not
/// adapt to the actual spacing of the ledger timestamps.
pub fn sharpe(curve: &[EquityPoint], periods_per_year: u32) -> Decimal {
    if curve.len() < 2 {
        return Decimal::ZERO;
    }
    let returns = returns(curve);

    let (Some(mean_return), Some(std_dev)) = (mean(&returns), std_dev(&returns)) else {
        return Decimal::ZERO;
    };
    let Some(annualisation) = Decimal::from(periods_per_year).sqrt() else {
        return Decimal::ZERO;
    };

    mean_return
        .checked_div(std_dev)
        .and_then(|ratio| ratio.checked_mul(annualisation))
        .unwrap_or(Decimal::ZERO)
}

/// Percentage distance of `equity` below `high_water_mark`, rounded to
/// [`DRAWDOWN_DP`] places. `0` when the high-water-mark is not positive.
pub fn drawdown_pct(equity: Decimal, high_water_mark: Decimal) -> Decimal {
    if high_water_mark <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    ((equity - high_water_mark) / high_water_mark * Decimal::ONE_HUNDRED).round_dp(DRAWDOWN_DP)
}

/// Folds one equity observation into the persisted metrics.
///
/// The high-water-mark can only rise and the max drawdown can only deepen.
/// Applying the same observation twice is a no-op.
pub fn update_drawdown(prior: &DerivedMetrics, observed_equity: Decimal) -> DerivedMetrics {
    let high_water_mark = prior.high_water_mark.max(observed_equity);
    let current = drawdown_pct(observed_equity, high_water_mark);

    DerivedMetrics {
        high_water_mark,
        max_drawdown: prior.max_drawdown.min(current),
    }
}

/// Batch form of [`update_drawdown`] over a sequence of observations.
pub fn max_drawdown_of(equities: &[Decimal], initial_capital: Decimal) -> DerivedMetrics {
    equities
        .iter()
        .fold(DerivedMetrics::initial(initial_capital), |metrics, &equity| {
            update_drawdown(&metrics, equity)
        })
}
