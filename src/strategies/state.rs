//! 전략 인스턴스별 상태
//!
//! 각 전략 인스턴스가 단독으로 소유하며 다른 전략과 공유하지 않는다.

use serde::{Deserialize, Serialize};

use crate::error::AlgoError;
use crate::models::order::OrderSide;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategyState {
    /// 누적 매수 명목 금액
    pub buy_total: f64,
    /// 누적 매도 명목 금액
    pub sell_total: f64,
    pub bought_qty: f64,
    pub sold_qty: f64,
    /// 처음 관측한 최우선 매수가 (IS 기준가)
    pub anchor: Option<f64>,
    /// 관측한 최우선 호가 잔량 누계 (POV)
    pub observed_volume: f64,
    pub ticks: u64,
    pub orders_emitted: u64,
}

impl StrategyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, side: OrderSide, price: f64, quantity: f64) {
        match side {
            OrderSide::Buy => {
                self.buy_total += price * quantity;
                self.bought_qty += quantity;
            }
            OrderSide::Sell => {
                self.sell_total += price * quantity;
                self.sold_qty += quantity;
            }
        }
        self.orders_emitted += 1;
    }

    /// 매도 가능 수량 (매수 누계 - 매도 누계)
    pub fn sellable(&self) -> f64 {
        (self.bought_qty - self.sold_qty).max(0.0)
    }

    pub fn remaining_budget(&self, budget: f64) -> f64 {
        budget - self.buy_total
    }

    /// 매도 누계가 매수 누계를 넘지 않았는지 확인
    pub fn check_inventory(&self) -> Result<(), AlgoError> {
        if self.sold_qty > self.bought_qty {
            return Err(AlgoError::InventoryInvariant {
                sold: self.sold_qty,
                bought: self.bought_qty,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_sellable() {
        let mut state = StrategyState::new();
        state.record(OrderSide::Buy, 100.0, 10.0);
        state.record(OrderSide::Sell, 101.0, 4.0);
        assert_eq!(state.buy_total, 1000.0);
        assert_eq!(state.sell_total, 404.0);
        assert_eq!(state.sellable(), 6.0);
        assert_eq!(state.orders_emitted, 2);
        assert!(state.check_inventory().is_ok());
    }

    #[test]
    fn test_inventory_violation_detected() {
        let state = StrategyState {
            bought_qty: 5.0,
            sold_qty: 6.0,
            ..Default::default()
        };
        assert!(matches!(
            state.check_inventory(),
            Err(AlgoError::InventoryInvariant { .. })
        ));
        assert_eq!(state.sellable(), 0.0);
    }
}
