use uuid::Uuid;

use crate::error::AlgoError;
use crate::market_data::{BookSnapshot, SnapshotExt};
use crate::models::action::Action;
use crate::models::order::{ChildOrder, OrderId, OrderSide};

/// 실제 거래소 없이 엔진의 행동을 자식 주문 목록에 반영하는 가상 체결장
///
/// 매수는 최우선 매도가 이상이면 매도 잔량만큼 즉시 체결되고,
/// 최우선 매수가에 걸려 있으면 틱마다 남은 수량의 일정 비율이 체결된다. 매도는 대칭.
pub struct DryRunVenue {
  orders: Vec<ChildOrder>,
  passive_fill_ratio: f64,
  created: usize,
  cancelled: usize,
}

impl DryRunVenue {
  pub fn new(passive_fill_ratio: f64) -> Self {
    Self {
      orders: Vec::new(),
      passive_fill_ratio: passive_fill_ratio.clamp(0.0, 1.0),
      created: 0,
      cancelled: 0,
    }
  }

  pub fn orders(&self) -> &[ChildOrder] {
    &self.orders
  }

  pub fn active_count(&self) -> usize {
    self.orders.iter().filter(|order| order.is_active()).count()
  }

  pub fn created_count(&self) -> usize {
    self.created
  }

  pub fn cancelled_count(&self) -> usize {
    self.cancelled
  }

  /// 현재 자식 주문 목록을 붙인 스냅샷
  pub fn attach(&self, snapshot: &BookSnapshot) -> BookSnapshot {
    snapshot.clone().with_orders(self.orders.clone())
  }

  /// 엔진 행동 반영. 생성된 주문 id를 돌려준다.
  pub fn apply(&mut self, action: &Action, timestamp: i64) -> Option<OrderId> {
    match action {
      Action::CreateOrder { side, quantity, price } => {
        let mut order = ChildOrder::new(Uuid::new_v4().to_string(), *side, *quantity, *price);
        order.created_at = timestamp;
        let id = order.id.clone();
        log::debug!("[DRY-RUN] 주문 접수: {}", order);
        self.orders.push(order);
        self.created += 1;
        Some(id)
      }
      Action::CancelOrder { order_id } => {
        match self.orders.iter_mut().find(|order| &order.id == order_id && order.is_active()) {
          Some(order) => {
            order.cancel();
            self.cancelled += 1;
            log::debug!("[DRY-RUN] 주문 취소: {}", order_id);
          }
          None => log::warn!("[DRY-RUN] 취소 무시 - {}", AlgoError::OrderNotFound(order_id.clone())),
        }
        None
      }
      Action::NoAction => None,
    }
  }

  /// 새 호가에 맞춰 대기 주문 체결
  pub fn fill(&mut self, snapshot: &BookSnapshot) {
    let best_bid = snapshot.best_bid();
    let best_ask = snapshot.best_ask();
    let mut ask_left = best_ask.map(|level| level.quantity).unwrap_or(0.0);
    let mut bid_left = best_bid.map(|level| level.quantity).unwrap_or(0.0);

    for order in self.orders.iter_mut().filter(|o| o.is_active() && !o.is_fully_filled()) {
      let remaining = order.remaining_quantity();
      let quantity = match order.side {
        OrderSide::Buy => match (best_bid, best_ask) {
          (_, Some(ask)) if order.price >= ask.price => {
            let q = remaining.min(ask_left);
            ask_left -= q;
            q
          }
          (Some(bid), _) if order.price >= bid.price => (remaining * self.passive_fill_ratio).ceil(),
          _ => 0.0,
        },
        OrderSide::Sell => match (best_bid, best_ask) {
          (Some(bid), _) if order.price <= bid.price => {
            let q = remaining.min(bid_left);
            bid_left -= q;
            q
          }
          (_, Some(ask)) if order.price <= ask.price => (remaining * self.passive_fill_ratio).ceil(),
          _ => 0.0,
        },
      };

      if quantity > 0.0 {
        order.apply_fill(quantity);
        log::debug!("[DRY-RUN] 체결 {}: {}", quantity, order);
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::order::OrderStatus;

  fn book() -> BookSnapshot {
    BookSnapshot::new(1).with_bid(100.0, 50.0).with_ask(101.0, 30.0)
  }

  #[test]
  fn test_create_and_cancel() {
    let mut venue = DryRunVenue::new(0.5);
    let id = venue.apply(&Action::create(OrderSide::Buy, 10.0, 100.0), 7).unwrap();
    assert_eq!(venue.orders()[0].created_at, 7);
    assert_eq!(venue.active_count(), 1);

    venue.apply(&Action::cancel(id.clone()), 8);
    assert_eq!(venue.active_count(), 0);
    assert_eq!(venue.cancelled_count(), 1);

    // 이미 취소된 주문은 무시
    venue.apply(&Action::cancel(id), 9);
    assert_eq!(venue.cancelled_count(), 1);
  }

  #[test]
  fn test_passive_buy_fills_by_ratio() {
    let mut venue = DryRunVenue::new(0.5);
    venue.apply(&Action::create(OrderSide::Buy, 75.0, 100.0), 1);

    venue.fill(&book());
    assert_eq!(venue.orders()[0].filled_quantity, 38.0);
    venue.fill(&book());
    assert_eq!(venue.orders()[0].filled_quantity, 57.0);
    assert_eq!(venue.orders()[0].status, OrderStatus::PartiallyFilled);
  }

  #[test]
  fn test_marketable_buy_takes_ask_quantity() {
    let mut venue = DryRunVenue::new(0.5);
    venue.apply(&Action::create(OrderSide::Buy, 20.0, 101.0), 1);
    venue.apply(&Action::create(OrderSide::Buy, 20.0, 101.0), 1);

    venue.fill(&book());
    assert_eq!(venue.orders()[0].filled_quantity, 20.0);
    assert!(venue.orders()[0].is_fully_filled());
    assert_eq!(venue.orders()[1].filled_quantity, 10.0);
  }

  #[test]
  fn test_buy_below_touch_waits() {
    let mut venue = DryRunVenue::new(0.5);
    venue.apply(&Action::create(OrderSide::Buy, 20.0, 99.0), 1);
    venue.fill(&book());
    assert_eq!(venue.orders()[0].filled_quantity, 0.0);
  }

  #[test]
  fn test_sell_at_bid_fills() {
    let mut venue = DryRunVenue::new(0.5);
    venue.apply(&Action::create(OrderSide::Sell, 25.0, 100.0), 1);
    venue.fill(&book());
    assert!(venue.orders()[0].is_fully_filled());
  }

  #[test]
  fn test_attach_copies_orders() {
    let mut venue = DryRunVenue::new(0.5);
    venue.apply(&Action::create(OrderSide::Buy, 5.0, 100.0), 1);
    let view = venue.attach(&book());
    assert_eq!(crate::market_data::MarketSnapshot::child_orders(&view).len(), 1);
  }
}
