//! 유동성 탐색 전략
//!
//! 최우선 매수 잔량이 자식 주문 크기를 넘을 때만 매수하고, 아니면 기다린다.

use crate::strategies::execution::{Intent, Tick};
use crate::strategies::policy::StrategyPolicy;

pub(crate) fn decide(tick: &Tick<'_>, policy: &StrategyPolicy) -> Option<Intent> {
    if tick.remaining <= 0.0 {
        return None;
    }

    let quantity = policy.child_quantity.min(tick.remaining);
    if tick.best_bid_quantity > quantity {
        return Some(Intent::buy(
            quantity,
            tick.price,
            format!("resting bid {} above order size", tick.best_bid_quantity),
        ));
    }

    log::info!("[LIQUIDITY] 유동성 부족, 대기: 최우선 잔량 {}", tick.best_bid_quantity);
    None
}
