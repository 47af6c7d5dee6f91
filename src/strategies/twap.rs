//! TWAP 전략
//!
//! 시간 가중 평균 가격 기반 주문 실행 전략

use crate::analytics::BenchmarkKind;
use crate::strategies::execution::{Intent, Tick};
use crate::strategies::exits::exit_intent;
use crate::strategies::policy::StrategyPolicy;

/// 활성 주문이 한도 미만이고 최우선 매수가가 TWAP(+허용 오차) 이하이면 분할 매수,
/// 목표 체결 후에는 TWAP 기준 익절/손절
pub(crate) fn decide(tick: &Tick<'_>, policy: &StrategyPolicy, tolerance: f64) -> Option<Intent> {
    if tick.active_orders < policy.max_active_orders && tick.remaining > 0.0 {
        if let Some(twap) = tick.benchmarks.blended(BenchmarkKind::TimeWeighted) {
            if tick.price <= twap.value * (1.0 + tolerance) {
                return Some(Intent::buy(
                    policy.child_quantity.min(tick.remaining),
                    tick.price,
                    format!("price {} at or below {}", tick.price, twap),
                ));
            }
        }
    }

    exit_intent(tick, policy, BenchmarkKind::TimeWeighted)
}
