//! 주문 실행 전략
//!
//! 하나의 매개변수화된 전략 타입이 `Algorithm` 태그에 따라 알고리즘별 판단 함수로 분기한다.

pub mod execution;
pub mod exits;
pub mod policy;
pub mod state;

mod iceberg;
mod liquidity;
mod participation;
mod shortfall;
mod twap;
mod vwap;

use serde::{Deserialize, Serialize};
use std::fmt;

/// 전략 종류 (선택기가 돌려주는 핸들)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyKind {
    TimeWeighted,
    VolumeWeighted,
    ParticipationRate,
    ShortfallSeeking,
    LiquiditySeeking,
    Concealed,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 6] = [
        StrategyKind::TimeWeighted,
        StrategyKind::VolumeWeighted,
        StrategyKind::ParticipationRate,
        StrategyKind::ShortfallSeeking,
        StrategyKind::LiquiditySeeking,
        StrategyKind::Concealed,
    ];

    /// `ALL` 안에서의 위치
    pub fn index(self) -> usize {
        match self {
            StrategyKind::TimeWeighted => 0,
            StrategyKind::VolumeWeighted => 1,
            StrategyKind::ParticipationRate => 2,
            StrategyKind::ShortfallSeeking => 3,
            StrategyKind::LiquiditySeeking => 4,
            StrategyKind::Concealed => 5,
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            StrategyKind::TimeWeighted => "TWAP",
            StrategyKind::VolumeWeighted => "VWAP",
            StrategyKind::ParticipationRate => "POV",
            StrategyKind::ShortfallSeeking => "IS",
            StrategyKind::LiquiditySeeking => "LIQUIDITY",
            StrategyKind::Concealed => "ICEBERG",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

// 핵심 타입 재노출
pub use execution::ExecutionStrategy;
pub use exits::ExitReason;
pub use policy::{Algorithm, StrategyPolicy};
pub use state::StrategyState;
