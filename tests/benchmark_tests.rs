//! 벤치마크 계산 테스트

use xAlgo::analytics::{BenchmarkCalculator, BenchmarkKind, BenchmarkSide};
use xAlgo::market_data::BookSnapshot;
use xAlgo::models::market_data::BookSide;

fn book() -> BookSnapshot {
  BookSnapshot::new(1)
    .with_bid(110.0, 20.0)
    .with_bid(100.0, 10.0)
    .with_ask(100.0, 10.0)
    .with_ask(110.0, 20.0)
}

#[test]
fn test_vwap_and_twap_over_two_levels() {
  let calc = BenchmarkCalculator::default();
  let snapshot = book();

  let vwap = calc.volume_weighted(&snapshot, BookSide::Ask).unwrap();
  assert!((vwap.value - 106.67).abs() < 0.01);

  let twap = calc.time_weighted(&snapshot, BookSide::Ask).unwrap();
  assert_eq!(twap.value, 105.0);
}

#[test]
fn test_inverted_touch_volatility() {
  let calc = BenchmarkCalculator::default();
  let snapshot = BookSnapshot::new(1).with_bid(100.0, 5.0).with_ask(98.0, 5.0);
  assert!((calc.volatility(&snapshot) - 0.02).abs() < 1e-12);
}

#[test]
fn test_benchmark_set_blends_sides() {
  let calc = BenchmarkCalculator::default();
  let set = calc.compute(&book());

  let bid = set.get(BenchmarkKind::TimeWeighted, BenchmarkSide::Bid).unwrap();
  let blended = set.blended(BenchmarkKind::TimeWeighted).unwrap();
  assert_eq!(bid.value, 105.0);
  assert_eq!(blended.value, 105.0);
  assert_eq!(blended.side, BenchmarkSide::Blended);
}

#[test]
fn test_one_sided_book_uses_available_side() {
  let calc = BenchmarkCalculator::default();
  let snapshot = BookSnapshot::new(1).with_bid(100.0, 10.0).with_bid(90.0, 30.0);
  let set = calc.compute(&snapshot);

  assert!(set.vwap_ask.is_none());
  let blended = set.blended(BenchmarkKind::VolumeWeighted).unwrap();
  assert_eq!(blended.value, 92.5);
}
