//! 참여율(POV) 전략
//!
//! 지금까지 관측한 최우선 호가 잔량 누계의 일정 비율을 매수 수량으로 잡는다.
//! 변동성이 높으면 더 높은 비율을 쓴다.

use crate::strategies::execution::{Intent, Tick};
use crate::strategies::exits::exit_intent;
use crate::strategies::policy::StrategyPolicy;
use crate::strategies::state::StrategyState;

/// 참여 비율 설정
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Participation {
    pub rate: f64,
    pub volatile_rate: f64,
    pub volatility_threshold: f64,
}

impl Participation {
    /// 변동성이 임계값을 넘으면 높은 비율
    pub fn rate_for(&self, volatility: f64) -> f64 {
        if volatility > self.volatility_threshold {
            self.volatile_rate
        } else {
            self.rate
        }
    }
}

pub(crate) fn decide(
    tick: &Tick<'_>,
    policy: &StrategyPolicy,
    state: &mut StrategyState,
    participation: Participation,
) -> Option<Intent> {
    state.observed_volume += tick.best_bid_quantity + tick.best_ask_quantity;

    if tick.filled < policy.target_quantity {
        if tick.remaining <= 0.0 {
            return None;
        }

        let rate = participation.rate_for(tick.benchmarks.volatility);
        let clip = (state.observed_volume * rate).floor().min(tick.remaining);
        if clip < 1.0 {
            log::debug!("[POV] 참여 수량 부족: 관측 누계 {}", state.observed_volume);
            return None;
        }

        return Some(Intent::buy(
            clip,
            tick.price,
            format!("{}% of {} observed", rate * 100.0, state.observed_volume),
        ));
    }

    exit_intent(tick, policy, policy.benchmark)
}
