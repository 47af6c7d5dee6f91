//! 전략별 로컬 호가 사본
//!
//! 매 틱 시작 시 스냅샷에서 다시 채우고, 같은 틱 안에서 가상 체결만큼 깎아낸다.

use std::cmp::Ordering;
use std::fmt::Write;

use crate::market_data::{MarketSnapshot, SnapshotExt};
use crate::models::market_data::{BookSide, PriceLevel};

/// 가격 비교 허용 오차
const PRICE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Default)]
pub struct LocalBook {
    bids: Vec<PriceLevel>,
    asks: Vec<PriceLevel>,
}

impl LocalBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// 스냅샷의 모든 레벨로 교체
    pub fn populate<S: MarketSnapshot + ?Sized>(&mut self, snapshot: &S) {
        self.bids = snapshot.levels(BookSide::Bid);
        self.asks = snapshot.levels(BookSide::Ask);
        self.bids.retain(|level| !level.is_empty());
        self.asks.retain(|level| !level.is_empty());
    }

    /// 매수 가격 내림차순, 매도 가격 오름차순.
    ///
    /// 정렬이 안정적이라 같은 가격은 스냅샷 순서를 유지한다.
    pub fn sort(&mut self) {
        self.bids
            .sort_by(|a, b| b.price.partial_cmp(&a.price).unwrap_or(Ordering::Equal));
        self.asks
            .sort_by(|a, b| a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal));
    }

    /// 가격이 일치하는 레벨에서 체결 수량을 차감하고 0이 되면 제거한다.
    ///
    /// 일치하는 레벨이 없으면 false
    pub fn update(&mut self, side: BookSide, price: f64, filled_quantity: f64) -> bool {
        let levels = self.side_mut(side);
        let position = match levels
            .iter()
            .position(|level| (level.price - price).abs() < PRICE_EPSILON)
        {
            Some(p) => p,
            None => return false,
        };

        let level = &mut levels[position];
        level.quantity = (level.quantity - filled_quantity).max(0.0);
        if level.is_empty() {
            levels.remove(position);
        }
        true
    }

    pub fn best_bid(&self) -> Option<PriceLevel> {
        self.bids.first().copied()
    }

    pub fn best_ask(&self) -> Option<PriceLevel> {
        self.asks.first().copied()
    }

    pub fn levels(&self, side: BookSide) -> &[PriceLevel] {
        match side {
            BookSide::Bid => &self.bids,
            BookSide::Ask => &self.asks,
        }
    }

    /// (매수 레벨 수, 매도 레벨 수)
    pub fn level_counts(&self) -> (usize, usize) {
        (self.bids.len(), self.asks.len())
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    /// 진단용 표 출력
    pub fn format(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{:>10} {:>10} | {:>10} {:>10}", "BID QTY", "BID", "ASK", "ASK QTY");
        let depth = self.bids.len().max(self.asks.len());
        for i in 0..depth {
            let bid = self.bids.get(i);
            let ask = self.asks.get(i);
            let _ = writeln!(
                out,
                "{:>10} {:>10} | {:>10} {:>10}",
                bid.map(|l| format!("{}", l.quantity)).unwrap_or_default(),
                bid.map(|l| format!("{}", l.price)).unwrap_or_default(),
                ask.map(|l| format!("{}", l.price)).unwrap_or_default(),
                ask.map(|l| format!("{}", l.quantity)).unwrap_or_default(),
            );
        }
        out
    }

    fn side_mut(&mut self, side: BookSide) -> &mut Vec<PriceLevel> {
        match side {
            BookSide::Bid => &mut self.bids,
            BookSide::Ask => &mut self.asks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::BookSnapshot;

    fn book() -> BookSnapshot {
        BookSnapshot::new(1)
            .with_bid(100.0, 10.0)
            .with_bid(99.0, 20.0)
            .with_ask(101.0, 15.0)
            .with_ask(102.0, 5.0)
    }

    #[test]
    fn test_populate_replaces_previous_contents() {
        let mut mirror = LocalBook::new();
        mirror.populate(&book());
        mirror.update(BookSide::Bid, 100.0, 10.0);
        assert_eq!(mirror.best_bid().unwrap().price, 99.0);

        mirror.populate(&book());
        assert_eq!(mirror.best_bid().unwrap().price, 100.0);
        assert_eq!(mirror.level_counts(), (2, 2));
    }

    #[test]
    fn test_update_decrements_and_removes() {
        let mut mirror = LocalBook::new();
        mirror.populate(&book());

        assert!(mirror.update(BookSide::Ask, 101.0, 5.0));
        assert_eq!(mirror.best_ask().unwrap().quantity, 10.0);

        assert!(mirror.update(BookSide::Ask, 101.0, 50.0));
        assert_eq!(mirror.best_ask().unwrap().price, 102.0);

        assert!(!mirror.update(BookSide::Bid, 42.0, 1.0));
        assert_eq!(mirror.level_counts(), (2, 1));
    }

    #[test]
    fn test_sort_orders_each_side() {
        let mut mirror = LocalBook::new();
        mirror.bids = vec![PriceLevel::bid(98.0, 1.0), PriceLevel::bid(100.0, 1.0)];
        mirror.asks = vec![PriceLevel::ask(103.0, 1.0), PriceLevel::ask(101.0, 1.0)];
        mirror.sort();
        assert_eq!(mirror.best_bid().unwrap().price, 100.0);
        assert_eq!(mirror.best_ask().unwrap().price, 101.0);
    }

    #[test]
    fn test_format_lists_every_row() {
        let mut mirror = LocalBook::new();
        mirror.populate(&book());
        let text = mirror.format();
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("101"));
    }
}
