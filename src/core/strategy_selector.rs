/**
* filename : strategy_selector
* author : HAMA
* date: 2025. 5. 11.
* description:
**/

use crate::analytics::BenchmarkCalculator;
use crate::config::SelectorConfig;
use crate::market_data::{MarketSnapshot, SnapshotExt};
use crate::strategies::StrategyKind;

// 전략 선택기 - 시장 상황으로 매 틱 실행 전략 결정
pub struct StrategySelector {
  config: SelectorConfig,
  calculator: BenchmarkCalculator,
}

/// 선택 결과와 근거
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
  pub kind: StrategyKind,
  pub reason: String,
}

impl StrategySelector {
  pub fn new(config: SelectorConfig) -> Self {
    StrategySelector {
      config,
      calculator: BenchmarkCalculator::default(),
    }
  }

  // 우선순위 순으로 첫 번째로 맞는 규칙의 전략
  pub fn select<S: MarketSnapshot + ?Sized>(&self, snapshot: &S) -> StrategyKind {
    self.select_with_reason(snapshot).kind
  }

  pub fn select_with_reason<S: MarketSnapshot + ?Sized>(&self, snapshot: &S) -> Selection {
    let cfg = &self.config;

    // 한쪽 호가가 비면 스프레드/유동성 규칙은 건너뛴다
    if let (Some(bid), Some(ask)) = (snapshot.best_bid(), snapshot.best_ask()) {
      let spread = (bid.price - ask.price).abs();
      if spread > cfg.spread_threshold {
        return Selection {
          kind: StrategyKind::ShortfallSeeking,
          reason: format!("spread {} above {}", spread, cfg.spread_threshold),
        };
      }

      if bid.quantity > cfg.liquidity_threshold || ask.quantity > cfg.liquidity_threshold {
        return Selection {
          kind: StrategyKind::LiquiditySeeking,
          reason: format!("touch liquidity {}/{} above {}", bid.quantity, ask.quantity, cfg.liquidity_threshold),
        };
      }
    }

    let order_size = snapshot.total_ordered_quantity();
    if order_size > cfg.large_order_threshold {
      return Selection {
        kind: StrategyKind::Concealed,
        reason: format!("child order size {} above {}", order_size, cfg.large_order_threshold),
      };
    }

    let volatility = self.calculator.volatility(snapshot);
    if volatility > cfg.volatility_threshold {
      return Selection {
        kind: StrategyKind::VolumeWeighted,
        reason: format!("volatility {:.4} above {}", volatility, cfg.volatility_threshold),
      };
    }

    if volatility < cfg.low_volatility_threshold {
      return Selection {
        kind: StrategyKind::ParticipationRate,
        reason: format!("volatility {:.4} below {}", volatility, cfg.low_volatility_threshold),
      };
    }

    Selection {
      kind: StrategyKind::TimeWeighted,
      reason: "default".to_string(),
    }
  }
}

impl Default for StrategySelector {
  fn default() -> Self {
    StrategySelector::new(SelectorConfig::default())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::market_data::BookSnapshot;
  use crate::models::order::{ChildOrder, OrderSide};
  use rstest::rstest;

  #[test]
  fn test_spread_rule_beats_liquidity_rule() {
    let book = BookSnapshot::new(1).with_bid(100.0, 900.0).with_ask(111.0, 900.0);
    assert_eq!(StrategySelector::default().select(&book), StrategyKind::ShortfallSeeking);
  }

  #[test]
  fn test_large_order_selects_iceberg() {
    let book = BookSnapshot::new(1)
      .with_bid(100.0, 100.0)
      .with_ask(101.0, 100.0)
      .with_order(ChildOrder::new("a", OrderSide::Buy, 600.0, 100.0))
      .with_order(ChildOrder::new("b", OrderSide::Buy, 600.0, 100.0));
    assert_eq!(StrategySelector::default().select(&book), StrategyKind::Concealed);
  }

  #[rstest]
  // 스프레드 0.5% → 저변동성
  #[case(100.0, 100.5, StrategyKind::ParticipationRate)]
  // 스프레드 3% → 기본
  #[case(100.0, 103.0, StrategyKind::TimeWeighted)]
  // 스프레드 8% → 고변동성 (스프레드 임계값 아래로 가격대 조정)
  #[case(50.0, 54.0, StrategyKind::VolumeWeighted)]
  fn test_volatility_rules(#[case] bid: f64, #[case] ask: f64, #[case] expected: StrategyKind) {
    let book = BookSnapshot::new(1).with_bid(bid, 100.0).with_ask(ask, 100.0);
    assert_eq!(StrategySelector::default().select(&book), expected);
  }

  #[test]
  fn test_one_sided_book_skips_spread_rules() {
    let book = BookSnapshot::new(1).with_bid(100.0, 10_000.0);
    // 변동성 기본값 0 → 저변동성
    assert_eq!(StrategySelector::default().select(&book), StrategyKind::ParticipationRate);
  }

  #[test]
  fn test_reason_is_reported() {
    let book = BookSnapshot::new(1).with_bid(100.0, 600.0).with_ask(101.0, 10.0);
    let selection = StrategySelector::default().select_with_reason(&book);
    assert_eq!(selection.kind, StrategyKind::LiquiditySeeking);
    assert!(selection.reason.contains("liquidity"));
  }
}
