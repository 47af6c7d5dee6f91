use std::collections::HashMap;
use chrono::Utc;

use crate::config::Config;
use crate::core::AlgoEngine;
use crate::error::AlgoError;
use crate::market_data::BookSnapshot;
use crate::models::action::Action;
use crate::models::order::OrderSide;
use super::data_provider::BookDataProvider;
use super::result::BacktestResult;
use super::venue::DryRunVenue;

/// 재생기 - 스냅샷 → 엔진 판단 → 가상 체결장 반영 → 다음 틱
pub struct Backtester {
    name: String,
    engine: AlgoEngine,
    venue: DryRunVenue,
}

impl Backtester {
    pub fn new(name: impl Into<String>, config: &Config) -> Self {
        Backtester {
            name: name.into(),
            engine: AlgoEngine::new(config),
            venue: DryRunVenue::new(config.replay.passive_fill_ratio),
        }
    }

    pub fn engine(&self) -> &AlgoEngine {
        &self.engine
    }

    pub fn venue(&self) -> &DryRunVenue {
        &self.venue
    }

    /// 공급자에서 스냅샷을 읽어 재생
    pub fn run_provider(&mut self, provider: &dyn BookDataProvider) -> Result<BacktestResult, AlgoError> {
        let snapshots = provider.load_snapshots()?;
        if snapshots.is_empty() {
            return Err(AlgoError::DataIncomplete("no snapshots to replay".into()));
        }
        Ok(self.run(&snapshots))
    }

    /// 스냅샷 순서대로 재생
    pub fn run(&mut self, snapshots: &[BookSnapshot]) -> BacktestResult {
        let started_at = Utc::now();
        log::info!("재생 시작: {} - {} 틱", self.name, snapshots.len());

        let mut no_actions = 0;
        let mut max_active_orders = 0;
        let mut selections: HashMap<_, usize> = HashMap::new();

        for snapshot in snapshots {
            // 새 호가에서 먼저 대기 주문을 체결시킨 뒤 엔진에 보여준다
            self.venue.fill(snapshot);
            let view = self.venue.attach(snapshot);

            let action = self.engine.evaluate(&view);
            if action.is_no_action() {
                no_actions += 1;
            }
            // 취소 틱에는 전략이 선택되지 않는다
            if !matches!(action, Action::CancelOrder { .. }) {
                if let Some(kind) = self.engine.last_selected() {
                    *selections.entry(kind).or_insert(0) += 1;
                }
            }

            self.venue.apply(&action, snapshot.timestamp);
            max_active_orders = max_active_orders.max(self.venue.active_count());
        }

        let filled = |side: OrderSide| -> f64 {
            self.venue.orders().iter()
                .filter(|order| order.side == side)
                .map(|order| order.filled_quantity)
                .sum()
        };

        let result = BacktestResult {
            name: self.name.clone(),
            started_at,
            finished_at: Utc::now(),
            ticks: snapshots.len(),
            orders_created: self.venue.created_count(),
            orders_cancelled: self.venue.cancelled_count(),
            no_actions,
            max_active_orders,
            selections,
            filled_buy_quantity: filled(OrderSide::Buy),
            filled_sell_quantity: filled(OrderSide::Sell),
            pnl: self.engine.pnl_report(),
        };

        log::info!("재생 완료: {} - 주문 {} / 취소 {}", self.name, result.orders_created, result.orders_cancelled);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backtest::data_provider::SyntheticBookProvider;

    #[test]
    fn test_synthetic_replay_settles_to_cap() {
        let config = Config::default();
        let mut backtester = Backtester::new("synthetic", &config);
        let provider = SyntheticBookProvider::new(150, 3, 100.0);
        let result = backtester.run_provider(&provider).unwrap();

        assert_eq!(result.ticks, 150);
        // 한도 초과 주문은 다음 틱에 취소되므로 반영 직후 최대 한도 + 1
        assert!(result.max_active_orders <= config.engine.max_active_orders + 1);
        assert!(result.pnl.sold_quantity <= result.pnl.bought_quantity);
        assert_eq!(result.orders_created, backtester.venue().orders().len());
    }

    #[test]
    fn test_stale_orders_rotate_past_cap() {
        let config = Config::default();
        let cap = config.engine.max_active_orders;
        let mut backtester = Backtester::new("rising", &config);

        // 잔량 600 → 유동성 탐색. 매수호가가 계속 올라 걸어 둔 주문은 체결되지 않는다
        let snapshots: Vec<BookSnapshot> = (0..60)
            .map(|t| {
                let bid = 100.0 + 0.2 * t as f64;
                BookSnapshot::new(t).with_bid(bid, 600.0).with_ask(bid + 1.0, 600.0)
            })
            .collect();
        let result = backtester.run(&snapshots);

        assert_eq!(result.filled_buy_quantity, 0.0);
        assert!(result.orders_created > cap);
        assert!(result.orders_cancelled > 0);
        assert_eq!(result.max_active_orders, cap + 1);
        assert!(backtester.venue().active_count() <= cap + 1);
    }

    #[test]
    fn test_empty_replay_is_rejected() {
        let mut backtester = Backtester::new("empty", &Config::default());
        let provider = SyntheticBookProvider::new(0, 3, 100.0);
        assert!(matches!(backtester.run_provider(&provider), Err(AlgoError::DataIncomplete(_))));
    }

    #[test]
    fn test_fully_filled_order_is_released() {
        let mut config = Config::default();
        config.engine.target_quantity = 20.0;
        config.engine.child_quantity = 20.0;
        let mut backtester = Backtester::new("release", &config);

        // 스프레드 3% → TWAP 매수 20@100, 다음 틱 매도호가가 100으로 내려와 전량 체결
        let snapshots = vec![
            BookSnapshot::new(1).with_bid(100.0, 100.0).with_ask(103.0, 100.0),
            BookSnapshot::new(2).with_bid(97.0, 100.0).with_ask(100.0, 100.0),
        ];
        let result = backtester.run(&snapshots);

        assert_eq!(result.orders_created, 1);
        assert_eq!(result.orders_cancelled, 1);
        assert_eq!(result.filled_buy_quantity, 20.0);
        assert_eq!(backtester.venue().active_count(), 0);
    }
}
