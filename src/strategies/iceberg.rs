//! Iceberg 전략
//!
//! 대량 주문을 시장에 드러나지 않게 일부씩 노출하는 전략

use crate::strategies::execution::{Intent, Tick};
use crate::strategies::policy::StrategyPolicy;

/// 틱마다 노출하는 수량: max(1, ceil(비율 × 전체))
pub fn reveal_quantity(total: f64, reveal_ratio: f64) -> f64 {
    (total * reveal_ratio).ceil().max(1.0)
}

pub(crate) fn decide(tick: &Tick<'_>, policy: &StrategyPolicy, reveal_ratio: f64) -> Option<Intent> {
    if tick.remaining <= 0.0 || tick.filled >= policy.target_quantity {
        return None;
    }

    let quantity = reveal_quantity(policy.target_quantity, reveal_ratio).min(tick.remaining);
    Some(Intent::buy(
        quantity,
        tick.price,
        format!("reveal {} of {} remaining", quantity, tick.remaining),
    ))
}
