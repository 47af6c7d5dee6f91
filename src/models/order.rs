use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, Eq, Hash, PartialEq)]
pub struct OrderId(pub String);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "BUY"),
            OrderSide::Sell => write!(f, "SELL"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OrderStatus {
    New,
    PartiallyFilled,
    Filled,
    Cancelled,
}

/// 부모 주문에서 잘라낸 자식 주문
///
/// 체결 수량은 외부 디스패처가 갱신하며, 취소되기 전까지는 활성 주문으로 남는다.
/// 완전히 체결된 주문도 생명주기 관리자가 취소를 보내기 전까지 활성 목록에 머문다.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChildOrder {
    pub id: OrderId,
    pub side: OrderSide,
    pub ordered_quantity: f64,
    pub filled_quantity: f64,
    pub price: f64,
    pub status: OrderStatus,
    pub created_at: i64,
}

impl ChildOrder {
    pub fn new(id: impl Into<String>, side: OrderSide, ordered_quantity: f64, price: f64) -> Self {
        ChildOrder {
            id: OrderId(id.into()),
            side,
            ordered_quantity,
            filled_quantity: 0.0,
            price,
            status: OrderStatus::New,
            created_at: crate::utils::current_timestamp_ms(),
        }
    }

    pub fn with_filled(mut self, filled_quantity: f64) -> Self {
        self.apply_fill(filled_quantity);
        self
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = status;
        self
    }

    /// 체결 반영. 주문 수량을 넘는 체결은 잘라낸다.
    pub fn apply_fill(&mut self, quantity: f64) {
        if self.status == OrderStatus::Cancelled || quantity <= 0.0 {
            return;
        }
        self.filled_quantity = (self.filled_quantity + quantity).min(self.ordered_quantity);
        self.status = if self.is_fully_filled() {
            OrderStatus::Filled
        } else {
            OrderStatus::PartiallyFilled
        };
    }

    pub fn cancel(&mut self) {
        self.status = OrderStatus::Cancelled;
    }

    pub fn is_active(&self) -> bool {
        self.status != OrderStatus::Cancelled
    }

    pub fn is_fully_filled(&self) -> bool {
        self.filled_quantity >= self.ordered_quantity
    }

    pub fn remaining_quantity(&self) -> f64 {
        (self.ordered_quantity - self.filled_quantity).max(0.0)
    }
}

impl fmt::Display for ChildOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ChildOrder[{} {} {}@{} filled={} {:?}]",
            self.id, self.side, self.ordered_quantity, self.price, self.filled_quantity, self.status
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_is_clamped_to_ordered_quantity() {
        let mut order = ChildOrder::new("o1", OrderSide::Buy, 100.0, 99.0);
        order.apply_fill(60.0);
        assert_eq!(order.status, OrderStatus::PartiallyFilled);
        order.apply_fill(60.0);
        assert_eq!(order.filled_quantity, 100.0);
        assert_eq!(order.status, OrderStatus::Filled);
        assert!(order.is_active());
        assert_eq!(order.remaining_quantity(), 0.0);
    }

    #[test]
    fn test_cancelled_order_ignores_fills() {
        let mut order = ChildOrder::new("o2", OrderSide::Sell, 10.0, 101.0);
        order.cancel();
        order.apply_fill(5.0);
        assert_eq!(order.filled_quantity, 0.0);
        assert!(!order.is_active());
    }
}
