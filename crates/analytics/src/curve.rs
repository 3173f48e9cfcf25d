use core_types::{EquityPoint, TradeRecord};

/// Orders ledger rows by timestamp. The sort is stable, so rows sharing a
/// timestamp keep their ledger order.
pub fn sort_by_timestamp(records: &mut [TradeRecord]) {
    records.sort_by_key(|r| r.timestamp);
}

/// Reconstructs the time-ordered equity curve from ledger rows in any order.
///
/// Each point is `cash_available + shares_held * price` as recorded right
/// after the trade. Rows whose equity overflows are left out. An empty ledger
/// yields an empty curve.
pub fn build_equity_curve(records: &[TradeRecord]) -> Vec<EquityPoint> {
    let mut curve: Vec<EquityPoint> = records
        .iter()
        .filter_map(|r| {
            Some(EquityPoint {
                timestamp: r.timestamp,
                equity: r.equity()?,
            })
        })
        .collect();
    curve.sort_by_key(|p| p.timestamp);
    curve
}
