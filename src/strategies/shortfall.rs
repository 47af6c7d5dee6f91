//! 구현 부족분(IS) 전략
//!
//! 처음 관측한 최우선 매수가를 기준가로 두고, 괴리가 작을 때만 매수한다.

use crate::error::AlgoError;
use crate::strategies::execution::{Intent, Tick};
use crate::strategies::policy::StrategyPolicy;
use crate::strategies::state::StrategyState;
use crate::utils::math::relative_distance;

pub(crate) fn decide(
    tick: &Tick<'_>,
    policy: &StrategyPolicy,
    state: &mut StrategyState,
    favorable: f64,
    unfavorable: f64,
) -> Result<Option<Intent>, AlgoError> {
    let anchor = *state.anchor.get_or_insert(tick.price);
    let shortfall = relative_distance(tick.price, anchor, "shortfall")?;

    if shortfall > unfavorable {
        log::info!("[IS] 불리한 가격, 대기: 괴리 {:.4} (기준가 {})", shortfall, anchor);
        return Ok(None);
    }

    if shortfall < favorable && tick.remaining > 0.0 {
        return Ok(Some(Intent::buy(
            policy.child_quantity.min(tick.remaining),
            tick.price,
            format!("shortfall {:.4} against anchor {}", shortfall, anchor),
        )));
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{BenchmarkKind, BenchmarkSet};
    use crate::config::ExitBands;

    fn policy() -> StrategyPolicy {
        StrategyPolicy {
            target_quantity: 1000.0,
            child_quantity: 100.0,
            max_active_orders: 3,
            benchmark: BenchmarkKind::VolumeWeighted,
            exits: ExitBands::default(),
        }
    }

    fn tick(benchmarks: &BenchmarkSet, price: f64) -> Tick<'_> {
        Tick {
            price,
            best_bid_quantity: 10.0,
            best_ask_quantity: 10.0,
            benchmarks,
            active_orders: 0,
            filled: 0.0,
            remaining: 1000.0,
        }
    }

    #[test]
    fn test_anchor_is_first_best_bid() {
        let b = BenchmarkSet::default();
        let mut state = StrategyState::new();

        assert!(decide(&tick(&b, 100.0), &policy(), &mut state, 0.01, 0.05).unwrap().is_some());
        assert_eq!(state.anchor, Some(100.0));

        // 기준가는 바뀌지 않는다
        assert!(decide(&tick(&b, 100.5), &policy(), &mut state, 0.01, 0.05).unwrap().is_some());
        assert_eq!(state.anchor, Some(100.0));
    }

    #[test]
    fn test_stand_down_when_unfavorable() {
        let b = BenchmarkSet::default();
        let mut state = StrategyState { anchor: Some(100.0), ..Default::default() };
        assert!(decide(&tick(&b, 94.0), &policy(), &mut state, 0.01, 0.05).unwrap().is_none());
        // 1%~5% 사이도 대기
        assert!(decide(&tick(&b, 103.0), &policy(), &mut state, 0.01, 0.05).unwrap().is_none());
    }

    #[test]
    fn test_zero_anchor_is_guarded() {
        let b = BenchmarkSet::default();
        let mut state = StrategyState { anchor: Some(0.0), ..Default::default() };
        assert!(matches!(
            decide(&tick(&b, 100.0), &policy(), &mut state, 0.01, 0.05),
            Err(AlgoError::ArithmeticGuard(_))
        ));
    }
}
