/**
* filename : pnl
* author : HAMA
* date: 2025. 5. 11.
* description:
**/

use serde::{Deserialize, Serialize};

use crate::models::order::OrderSide;

/// 손익 보고서
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PnlReport {
  pub buy_notional: f64,
  pub sell_notional: f64,
  pub bought_quantity: f64,
  pub sold_quantity: f64,
  pub profit: f64,
  /// 백분율
  pub roi: f64,
}

/// 누적 매수/매도 명목 금액 추적기. 관측용이며 의사결정에 쓰지 않는다.
#[derive(Debug, Clone, Default)]
pub struct PnlAccumulator {
  buy_notional: f64,
  sell_notional: f64,
  bought_quantity: f64,
  sold_quantity: f64,
}

impl PnlAccumulator {
  pub fn new() -> Self {
    Self::default()
  }

  /// 거래 기록
  pub fn record(&mut self, side: OrderSide, price: f64, quantity: f64) {
    let notional = price * quantity;
    match side {
      OrderSide::Buy => {
        self.buy_notional += notional;
        self.bought_quantity += quantity;
      }
      OrderSide::Sell => {
        self.sell_notional += notional;
        self.sold_quantity += quantity;
      }
    }
  }

  /// profit = 매도 합 - 매수 합, roi = profit / 매수 합 × 100
  pub fn report(&self) -> PnlReport {
    let profit = self.sell_notional - self.buy_notional;
    let roi = if self.buy_notional > 0.0 {
      profit / self.buy_notional * 100.0
    } else {
      0.0
    };

    PnlReport {
      buy_notional: self.buy_notional,
      sell_notional: self.sell_notional,
      bought_quantity: self.bought_quantity,
      sold_quantity: self.sold_quantity,
      profit,
      roi,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_empty_report() {
    let report = PnlAccumulator::new().report();
    assert_eq!(report.profit, 0.0);
    assert_eq!(report.roi, 0.0);
  }

  #[test]
  fn test_profit_and_roi() {
    let mut pnl = PnlAccumulator::new();
    pnl.record(OrderSide::Buy, 100.0, 10.0);
    pnl.record(OrderSide::Sell, 105.0, 10.0);

    let report = pnl.report();
    assert_eq!(report.buy_notional, 1000.0);
    assert_eq!(report.sell_notional, 1050.0);
    assert_eq!(report.profit, 50.0);
    assert!((report.roi - 5.0).abs() < 1e-12);
  }

  #[test]
  fn test_loss_without_sells() {
    let mut pnl = PnlAccumulator::new();
    pnl.record(OrderSide::Buy, 50.0, 2.0);
    let report = pnl.report();
    assert_eq!(report.profit, -100.0);
    assert_eq!(report.roi, -100.0);
  }
}
