//! Statistical helpers for the ratio calculations.

use rust_decimal::{Decimal, MathematicalOps};

/// Variances below this are treated as zero. Guards against rounding residue
/// in the 28-digit arithmetic turning a flat curve into a huge ratio.
pub const VARIANCE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 20);

/// Arithmetic mean. `None` for an empty slice or when the sum overflows.
pub fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let sum = values
        .iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v))?;
    sum.checked_div(Decimal::from(values.len() as u64))
}

/// Population standard deviation. `None` for an empty slice, a variance
/// within [`VARIANCE_TOLERANCE`] of zero, or one too large for a `Decimal`.
pub fn std_dev(values: &[Decimal]) -> Option<Decimal> {
    let avg = mean(values)?;
    let sum_sq = values.iter().try_fold(Decimal::ZERO, |acc, v| {
        let diff = v.checked_sub(avg)?;
        acc.checked_add(diff.checked_mul(diff)?)
    })?;
    let variance = sum_sq.checked_div(Decimal::from(values.len() as u64))?;

    if variance <= VARIANCE_TOLERANCE {
        return None;
    }
    variance.sqrt()
}
