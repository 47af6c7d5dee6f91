//! 익절/손절 구간 판단
//!
//! TWAP, VWAP, POV 가 같은 구간 표를 쓴다.

use std::fmt;

use crate::analytics::BenchmarkKind;
use crate::config::ExitBands;
use crate::models::order::OrderSide;
use crate::strategies::execution::{Intent, Tick};
use crate::strategies::policy::StrategyPolicy;
use crate::utils::math::within_band;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    TakeProfit,
    StopLoss,
}

impl ExitReason {
    /// 벤치마크 대비 가격이 어느 구간에 있는지
    pub fn classify(price: f64, benchmark: f64, bands: &ExitBands) -> Option<Self> {
        if within_band(price, benchmark, bands.take_profit_lower, bands.take_profit_upper) {
            Some(ExitReason::TakeProfit)
        } else if within_band(price, benchmark, bands.stop_loss_lower, bands.stop_loss_upper) {
            Some(ExitReason::StopLoss)
        } else {
            None
        }
    }
}

impl fmt::Display for ExitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitReason::TakeProfit => write!(f, "take profit"),
            ExitReason::StopLoss => write!(f, "stop loss"),
        }
    }
}

/// 목표 수량이 체결된 뒤 구간에 들어오면 매도 의도를 낸다.
///
/// 매도 수량은 커밋 단계에서 보유 수량으로 잘린다.
pub(crate) fn exit_intent(tick: &Tick<'_>, policy: &StrategyPolicy, kind: BenchmarkKind) -> Option<Intent> {
    if tick.filled < policy.target_quantity {
        return None;
    }

    let benchmark = tick.benchmarks.blended(kind)?;
    let reason = ExitReason::classify(tick.price, benchmark.value, &policy.exits)?;

    Some(Intent::new(
        OrderSide::Sell,
        policy.child_quantity,
        tick.price,
        format!("{} vs {}", reason, benchmark),
    ))
}
