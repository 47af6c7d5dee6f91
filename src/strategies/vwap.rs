//! VWAP 기반 매매 전략
//!
//! 거래량 가중 평균 가격 이하에서 예산 안으로 매수하고, 같은 벤치마크로 청산한다.

use crate::analytics::BenchmarkKind;
use crate::strategies::execution::{Intent, Tick};
use crate::strategies::exits::exit_intent;
use crate::strategies::policy::StrategyPolicy;
use crate::strategies::state::StrategyState;

pub(crate) fn decide(
    tick: &Tick<'_>,
    policy: &StrategyPolicy,
    state: &StrategyState,
    budget: f64,
) -> Option<Intent> {
    if tick.remaining > 0.0 {
        if let Some(vwap) = tick.benchmarks.blended(BenchmarkKind::VolumeWeighted) {
            if tick.price <= vwap.value {
                let remaining_budget = state.remaining_budget(budget);
                let quantity = policy.child_quantity.min(tick.remaining);

                if remaining_budget >= tick.price * quantity {
                    return Some(Intent::buy(
                        quantity,
                        tick.price,
                        format!("price {} at or below {}", tick.price, vwap),
                    ));
                }

                // 예산이 모자라면 살 수 있는 만큼만
                let partial = (remaining_budget / tick.price).floor();
                if partial >= 1.0 {
                    return Some(Intent::buy(
                        partial,
                        tick.price,
                        format!("partial buy, budget left {:.2}", remaining_budget),
                    ));
                }

                log::info!("[VWAP] 매수 예산 소진: 남은 예산 {:.2}", remaining_budget);
            }
        }
    }

    exit_intent(tick, policy, BenchmarkKind::VolumeWeighted)
}
