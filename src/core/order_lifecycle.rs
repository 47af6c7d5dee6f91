/**
* filename : order_lifecycle
* author : HAMA
* date: 2025. 5. 11.
* description:
**/

use crate::market_data::MarketSnapshot;
use crate::models::action::Action;
use crate::models::order::ChildOrder;
use crate::utils::logging;

// 자식 주문 수명 관리 - 전략보다 먼저 취소 기회를 가진다
pub struct OrderLifecycleManager {
  max_active_orders: usize,
}

impl OrderLifecycleManager {
  pub fn new(max_active_orders: usize) -> Self {
    OrderLifecycleManager { max_active_orders }
  }

  /// 취소할 주문이 있으면 취소 행동, 없으면 None
  ///
  /// 전량 체결된 활성 주문을 먼저 정리하고, 그 다음 한도 초과분을 가장 오래된 순으로 취소한다.
  pub fn manage<S: MarketSnapshot + ?Sized>(&self, snapshot: &S) -> Option<Action> {
    let active = snapshot.active_child_orders();

    if let Some(order) = active.iter().find(|order| order.is_fully_filled()) {
      return Some(self.cancel(order, "fully filled"));
    }

    if active.len() > self.max_active_orders {
      let reason = format!("active orders {} above cap {}", active.len(), self.max_active_orders);
      return active.first().map(|order| self.cancel(order, &reason));
    }

    None
  }

  fn cancel(&self, order: &ChildOrder, reason: &str) -> Action {
    logging::log_order_cancelled(order, reason);
    Action::cancel(order.id.clone())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::market_data::snapshot::MockMarketSnapshot;
  use crate::models::order::{OrderId, OrderSide};

  fn order(id: &str, ordered: f64, filled: f64) -> ChildOrder {
    ChildOrder::new(id, OrderSide::Buy, ordered, 100.0).with_filled(filled)
  }

  fn snapshot_with(orders: Vec<ChildOrder>) -> MockMarketSnapshot {
    let mut mock = MockMarketSnapshot::new();
    mock.expect_active_child_orders().returning(move || orders.clone());
    mock
  }

  #[test]
  fn test_filled_order_is_cancelled_first() {
    let mock = snapshot_with(vec![order("a", 10.0, 0.0), order("b", 10.0, 10.0)]);
    let action = OrderLifecycleManager::new(3).manage(&mock);
    assert_eq!(action, Some(Action::cancel(OrderId("b".to_string()))));
  }

  #[test]
  fn test_oldest_order_cancelled_over_cap() {
    let mock = snapshot_with(vec![
      order("a", 10.0, 0.0),
      order("b", 10.0, 5.0),
      order("c", 10.0, 0.0),
    ]);
    let action = OrderLifecycleManager::new(2).manage(&mock);
    assert_eq!(action, Some(Action::cancel(OrderId("a".to_string()))));
  }

  #[test]
  fn test_nothing_to_do_within_cap() {
    let mock = snapshot_with(vec![order("a", 10.0, 0.0), order("b", 10.0, 3.0)]);
    assert_eq!(OrderLifecycleManager::new(2).manage(&mock), None);
  }

  #[test]
  fn test_empty_order_list() {
    let mock = snapshot_with(Vec::new());
    assert_eq!(OrderLifecycleManager::new(3).manage(&mock), None);
  }
}
