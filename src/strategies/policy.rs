//! 전략 정책 레코드
//!
//! 알고리즘마다 다른 상수를 한 곳에 모은다.

use serde::{Deserialize, Serialize};

use crate::analytics::BenchmarkKind;
use crate::config::{Config, ExitBands};
use crate::strategies::StrategyKind;

/// 알고리즘 태그와 알고리즘 고유 파라미터
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Algorithm {
    /// 벤치마크 이하에서 분할 매수
    TimeWeighted { tolerance: f64 },
    /// 예산 안에서 VWAP 이하 매수
    VolumeWeighted { budget: f64 },
    /// 관측 거래량 누계의 일정 비율 매수, 고변동성에서는 높은 비율
    ParticipationRate { rate: f64, volatile_rate: f64, volatility_threshold: f64 },
    /// 기준가 대비 괴리가 작을 때만 매수
    ShortfallSeeking { favorable: f64, unfavorable: f64 },
    /// 최우선 매수 잔량이 충분할 때 매수
    LiquiditySeeking,
    /// 전체 수량의 일부만 노출
    Concealed { reveal_ratio: f64 },
}

impl Algorithm {
    pub fn kind(&self) -> StrategyKind {
        match self {
            Algorithm::TimeWeighted { .. } => StrategyKind::TimeWeighted,
            Algorithm::VolumeWeighted { .. } => StrategyKind::VolumeWeighted,
            Algorithm::ParticipationRate { .. } => StrategyKind::ParticipationRate,
            Algorithm::ShortfallSeeking { .. } => StrategyKind::ShortfallSeeking,
            Algorithm::LiquiditySeeking => StrategyKind::LiquiditySeeking,
            Algorithm::Concealed { .. } => StrategyKind::Concealed,
        }
    }

    /// 설정에서 종류별 파라미터 구성
    pub fn from_config(kind: StrategyKind, config: &Config) -> Self {
        let params = &config.algorithms;
        match kind {
            StrategyKind::TimeWeighted => Algorithm::TimeWeighted { tolerance: params.twap_tolerance },
            StrategyKind::VolumeWeighted => Algorithm::VolumeWeighted { budget: params.vwap_budget },
            StrategyKind::ParticipationRate => Algorithm::ParticipationRate {
                rate: params.participation_rate,
                volatile_rate: params.participation_rate_volatile,
                volatility_threshold: params.participation_volatility_threshold,
            },
            StrategyKind::ShortfallSeeking => Algorithm::ShortfallSeeking {
                favorable: params.shortfall_favorable,
                unfavorable: params.shortfall_unfavorable,
            },
            StrategyKind::LiquiditySeeking => Algorithm::LiquiditySeeking,
            StrategyKind::Concealed => Algorithm::Concealed { reveal_ratio: params.iceberg_reveal_ratio },
        }
    }

    /// 청산 판단에 쓰는 벤치마크 종류
    pub fn benchmark(&self) -> BenchmarkKind {
        match self {
            Algorithm::TimeWeighted { .. } => BenchmarkKind::TimeWeighted,
            _ => BenchmarkKind::VolumeWeighted,
        }
    }
}

/// 모든 알고리즘이 공유하는 정책
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyPolicy {
    /// 부모 주문 총 수량
    pub target_quantity: f64,
    /// 자식 주문 기본 수량
    pub child_quantity: f64,
    pub max_active_orders: usize,
    pub benchmark: BenchmarkKind,
    pub exits: ExitBands,
}

impl StrategyPolicy {
    pub fn from_config(algorithm: &Algorithm, config: &Config) -> Self {
        StrategyPolicy {
            target_quantity: config.engine.target_quantity,
            child_quantity: config.engine.child_quantity,
            max_active_orders: config.engine.max_active_orders,
            benchmark: algorithm.benchmark(),
            exits: config.exits,
        }
    }
}
