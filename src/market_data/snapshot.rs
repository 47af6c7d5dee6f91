//! 틱 단위 시장 스냅샷
//!
//! 외부 디스패처가 매 틱 제공하는 읽기 전용 호가/자식 주문 조회 인터페이스

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::models::market_data::{BookSide, PriceLevel};
use crate::models::order::{ChildOrder, OrderSide};

/// The `MarketSnapshot` trait is the read-only view of the book and the child
/// order history handed to the engine on every tick.
/// Levels are ranked in book order: index 0 is the best level.
#[cfg_attr(test, mockall::automock)]
pub trait MarketSnapshot {
    /// i번째 매수 호가
    fn ranked_bid(&self, index: usize) -> Option<PriceLevel>;

    /// i번째 매도 호가
    fn ranked_ask(&self, index: usize) -> Option<PriceLevel>;

    fn bid_level_count(&self) -> usize;

    fn ask_level_count(&self) -> usize;

    /// 제출된 모든 자식 주문 (제출 순서)
    fn child_orders(&self) -> Vec<ChildOrder>;

    /// 취소되지 않은 자식 주문 (제출 순서)
    fn active_child_orders(&self) -> Vec<ChildOrder> {
        self.child_orders()
            .into_iter()
            .filter(|order| order.is_active())
            .collect()
    }
}

/// 스냅샷 위의 파생 조회
pub trait SnapshotExt: MarketSnapshot {
    fn best_bid(&self) -> Option<PriceLevel> {
        self.ranked_bid(0)
    }

    fn best_ask(&self) -> Option<PriceLevel> {
        self.ranked_ask(0)
    }

    fn level_count(&self, side: BookSide) -> usize {
        match side {
            BookSide::Bid => self.bid_level_count(),
            BookSide::Ask => self.ask_level_count(),
        }
    }

    fn ranked_level(&self, side: BookSide, index: usize) -> Option<PriceLevel> {
        match side {
            BookSide::Bid => self.ranked_bid(index),
            BookSide::Ask => self.ranked_ask(index),
        }
    }

    /// 한 면의 전체 레벨 (순위 순)
    fn levels(&self, side: BookSide) -> Vec<PriceLevel> {
        (0..self.level_count(side))
            .filter_map(|i| self.ranked_level(side, i))
            .collect()
    }

    /// 해당 방향 자식 주문의 누적 체결 수량
    fn filled_quantity(&self, side: OrderSide) -> f64 {
        self.child_orders()
            .iter()
            .filter(|order| order.side == side)
            .map(|order| order.filled_quantity)
            .sum()
    }

    /// 부모 주문에서 이미 소진된 수량
    ///
    /// 살아 있는 주문은 주문 수량 전체, 취소된 주문은 체결된 만큼만 센다.
    fn committed_quantity(&self, side: OrderSide) -> f64 {
        self.child_orders()
            .iter()
            .filter(|order| order.side == side)
            .map(|order| {
                if order.is_active() {
                    order.ordered_quantity
                } else {
                    order.filled_quantity
                }
            })
            .sum()
    }

    /// 모든 자식 주문의 주문 수량 합
    fn total_ordered_quantity(&self) -> f64 {
        self.child_orders()
            .iter()
            .map(|order| order.ordered_quantity)
            .sum()
    }
}

impl<T: MarketSnapshot + ?Sized> SnapshotExt for T {}

/// 메모리 상의 스냅샷 구현
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookSnapshot {
    pub timestamp: i64,
    bids: Vec<PriceLevel>,
    asks: Vec<PriceLevel>,
    orders: Vec<ChildOrder>,
}

impl BookSnapshot {
    pub fn new(timestamp: i64) -> Self {
        BookSnapshot {
            timestamp,
            ..Default::default()
        }
    }

    /// 레벨 목록으로 생성. 매수는 가격 내림차순, 매도는 오름차순으로 정렬한다.
    pub fn from_levels(timestamp: i64, bids: Vec<PriceLevel>, asks: Vec<PriceLevel>) -> Self {
        let mut snapshot = BookSnapshot {
            timestamp,
            bids,
            asks,
            orders: Vec::new(),
        };
        snapshot.rank();
        snapshot
    }

    pub fn with_bid(mut self, price: f64, quantity: f64) -> Self {
        self.bids.push(PriceLevel::bid(price, quantity));
        self.rank();
        self
    }

    pub fn with_ask(mut self, price: f64, quantity: f64) -> Self {
        self.asks.push(PriceLevel::ask(price, quantity));
        self.rank();
        self
    }

    pub fn with_order(mut self, order: ChildOrder) -> Self {
        self.orders.push(order);
        self
    }

    pub fn with_orders(mut self, orders: Vec<ChildOrder>) -> Self {
        self.orders = orders;
        self
    }

    pub fn bids(&self) -> &[PriceLevel] {
        &self.bids
    }

    pub fn asks(&self) -> &[PriceLevel] {
        &self.asks
    }

    fn rank(&mut self) {
        self.bids.retain(|level| !level.is_empty());
        self.asks.retain(|level| !level.is_empty());
        self.bids
            .sort_by(|a, b| b.price.partial_cmp(&a.price).unwrap_or(Ordering::Equal));
        self.asks
            .sort_by(|a, b| a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal));
    }
}

impl MarketSnapshot for BookSnapshot {
    fn ranked_bid(&self, index: usize) -> Option<PriceLevel> {
        self.bids.get(index).copied()
    }

    fn ranked_ask(&self, index: usize) -> Option<PriceLevel> {
        self.asks.get(index).copied()
    }

    fn bid_level_count(&self) -> usize {
        self.bids.len()
    }

    fn ask_level_count(&self) -> usize {
        self.asks.len()
    }

    fn child_orders(&self) -> Vec<ChildOrder> {
        self.orders.clone()
    }
}
