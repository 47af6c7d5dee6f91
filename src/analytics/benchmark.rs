/**
* filename : benchmark
* author : HAMA
* date: 2025. 5. 8.
* description:
**/

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AlgoError;
use crate::market_data::{MarketSnapshot, SnapshotExt};
use crate::models::market_data::BookSide;
use crate::utils::logging;
use crate::utils::math::{calculate_twap, calculate_vwap, relative_distance};

/// 한쪽 면이 비어 있을 때 쓰는 변동성 기본값
pub const DEFAULT_VOLATILITY: f64 = 0.0;

/// 벤치마크 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BenchmarkKind {
  TimeWeighted,
  VolumeWeighted,
}

/// 벤치마크가 계산된 면
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BenchmarkSide {
  Bid,
  Ask,
  Blended,
}

impl From<BookSide> for BenchmarkSide {
  fn from(side: BookSide) -> Self {
    match side {
      BookSide::Bid => BenchmarkSide::Bid,
      BookSide::Ask => BenchmarkSide::Ask,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Benchmark {
  pub value: f64,
  pub side: BenchmarkSide,
  pub kind: BenchmarkKind,
}

impl fmt::Display for Benchmark {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:?}/{:?}={:.4}", self.kind, self.side, self.value)
  }
}

/// 한 틱의 벤치마크 묶음
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkSet {
  pub twap_bid: Option<Benchmark>,
  pub twap_ask: Option<Benchmark>,
  pub vwap_bid: Option<Benchmark>,
  pub vwap_ask: Option<Benchmark>,
  pub volatility: f64,
}

impl BenchmarkSet {
  /// 종류와 면으로 조회. Blended 는 양쪽 값의 단순 평균이며 한쪽만 있으면 그 값을 쓴다.
  pub fn get(&self, kind: BenchmarkKind, side: BenchmarkSide) -> Option<Benchmark> {
    let (bid, ask) = match kind {
      BenchmarkKind::TimeWeighted => (self.twap_bid, self.twap_ask),
      BenchmarkKind::VolumeWeighted => (self.vwap_bid, self.vwap_ask),
    };

    match side {
      BenchmarkSide::Bid => bid,
      BenchmarkSide::Ask => ask,
      BenchmarkSide::Blended => {
        let value = match (bid, ask) {
          (Some(b), Some(a)) => (b.value + a.value) / 2.0,
          (Some(b), None) => b.value,
          (None, Some(a)) => a.value,
          (None, None) => return None,
        };
        Some(Benchmark { value, side: BenchmarkSide::Blended, kind })
      }
    }
  }

  pub fn blended(&self, kind: BenchmarkKind) -> Option<Benchmark> {
    self.get(kind, BenchmarkSide::Blended)
  }
}

/// 호가 기반 벤치마크 계산기
#[derive(Debug, Clone)]
pub struct BenchmarkCalculator {
  /// TWAP 에 쓰는 상위 레벨 수
  twap_depth: usize,
}

impl BenchmarkCalculator {
  pub fn new(twap_depth: usize) -> Self {
    BenchmarkCalculator { twap_depth: twap_depth.max(1) }
  }

  /// 모든 벤치마크 계산
  pub fn compute<S: MarketSnapshot + ?Sized>(&self, snapshot: &S) -> BenchmarkSet {
    BenchmarkSet {
      twap_bid: self.time_weighted(snapshot, BookSide::Bid),
      twap_ask: self.time_weighted(snapshot, BookSide::Ask),
      vwap_bid: self.volume_weighted(snapshot, BookSide::Bid),
      vwap_ask: self.volume_weighted(snapshot, BookSide::Ask),
      volatility: self.volatility(snapshot),
    }
  }

  /// 상위 N개 레벨 가격의 단순 평균.
  ///
  /// 실제 경과 시간 가중이 아니라 호가 순서를 시간의 근사로 쓴다.
  pub fn time_weighted<S: MarketSnapshot + ?Sized>(&self, snapshot: &S, side: BookSide) -> Option<Benchmark> {
    let prices: Vec<f64> = snapshot.levels(side)
      .iter()
      .take(self.twap_depth)
      .map(|level| level.price)
      .collect();

    let value = match calculate_twap(&prices) {
      Some(v) => v,
      None => {
        logging::log_soft_fault(
          "time_weighted",
          &AlgoError::DataIncomplete(format!("no {} levels", side)),
        );
        return None;
      }
    };

    Some(Benchmark { value, side: side.into(), kind: BenchmarkKind::TimeWeighted })
  }

  /// 한 면 전체 레벨의 Σ(가격·수량)/Σ수량. 거래량이 0이면 최우선 가격으로 대체한다.
  pub fn volume_weighted<S: MarketSnapshot + ?Sized>(&self, snapshot: &S, side: BookSide) -> Option<Benchmark> {
    let levels = snapshot.levels(side);
    let best = levels.first()?;

    let prices: Vec<f64> = levels.iter().map(|level| level.price).collect();
    let volumes: Vec<f64> = levels.iter().map(|level| level.quantity).collect();

    let value = calculate_vwap(&prices, &volumes).unwrap_or_else(|| {
      logging::log_soft_fault(
        "volume_weighted",
        &AlgoError::DataIncomplete(format!("zero volume on {} side, using best price", side)),
      );
      best.price
    });

    Some(Benchmark { value, side: side.into(), kind: BenchmarkKind::VolumeWeighted })
  }

  /// 짝지은 레벨들의 |ask - bid| / bid 평균
  pub fn volatility<S: MarketSnapshot + ?Sized>(&self, snapshot: &S) -> f64 {
    let pairs = snapshot.bid_level_count().min(snapshot.ask_level_count());
    if pairs == 0 {
      return DEFAULT_VOLATILITY;
    }

    let mut spreads = Vec::with_capacity(pairs);
    for i in 0..pairs {
      let (bid, ask) = match (snapshot.ranked_bid(i), snapshot.ranked_ask(i)) {
        (Some(bid), Some(ask)) => (bid, ask),
        _ => continue,
      };

      match relative_distance(ask.price, bid.price, "volatility") {
        Ok(spread) => spreads.push(spread),
        Err(e) => logging::log_soft_fault("volatility", &e),
      }
    }

    if spreads.is_empty() {
      return DEFAULT_VOLATILITY;
    }

    spreads.iter().sum::<f64>() / spreads.len() as f64
  }
}

impl Default for BenchmarkCalculator {
  fn default() -> Self {
    BenchmarkCalculator::new(10)
  }
}
