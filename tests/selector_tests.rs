//! 전략 선택 우선순위 테스트

use rstest::rstest;
use xAlgo::config::SelectorConfig;
use xAlgo::core::StrategySelector;
use xAlgo::market_data::BookSnapshot;
use xAlgo::models::order::{ChildOrder, OrderSide};
use xAlgo::strategies::StrategyKind;

#[rstest]
// 스프레드 11 + 대량 잔량 → 스프레드 규칙이 먼저
#[case(100.0, 900.0, 111.0, 900.0, 0.0, StrategyKind::ShortfallSeeking)]
#[case(100.0, 501.0, 101.0, 10.0, 0.0, StrategyKind::LiquiditySeeking)]
#[case(100.0, 10.0, 101.0, 501.0, 0.0, StrategyKind::LiquiditySeeking)]
// 유동성 규칙이 대량 주문 규칙보다 먼저
#[case(100.0, 600.0, 101.0, 10.0, 2000.0, StrategyKind::LiquiditySeeking)]
#[case(100.0, 100.0, 101.0, 100.0, 1001.0, StrategyKind::Concealed)]
#[case(100.0, 100.0, 101.0, 100.0, 1000.0, StrategyKind::ParticipationRate)]
#[case(100.0, 100.0, 106.0, 100.0, 0.0, StrategyKind::VolumeWeighted)]
#[case(100.0, 100.0, 103.0, 100.0, 0.0, StrategyKind::TimeWeighted)]
fn test_selection_priority(
  #[case] bid: f64,
  #[case] bid_qty: f64,
  #[case] ask: f64,
  #[case] ask_qty: f64,
  #[case] ordered: f64,
  #[case] expected: StrategyKind,
) {
  let mut book = BookSnapshot::new(1).with_bid(bid, bid_qty).with_ask(ask, ask_qty);
  if ordered > 0.0 {
    book = book.with_order(ChildOrder::new("big", OrderSide::Buy, ordered, bid));
  }
  assert_eq!(StrategySelector::default().select(&book), expected);
}

#[test]
fn test_custom_thresholds() {
  let config = SelectorConfig {
    spread_threshold: 0.5,
    ..SelectorConfig::default()
  };
  let book = BookSnapshot::new(1).with_bid(100.0, 10.0).with_ask(101.0, 10.0);
  assert_eq!(StrategySelector::new(config).select(&book), StrategyKind::ShortfallSeeking);
}

#[test]
fn test_empty_book_defaults_to_participation() {
  // 짝지을 레벨이 없으면 변동성 기본값 0
  let book = BookSnapshot::new(1);
  assert_eq!(StrategySelector::default().select(&book), StrategyKind::ParticipationRate);
}
