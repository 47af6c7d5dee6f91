/**
* filename : engine
* author : HAMA
* date: 2025. 5. 11.
* description:
**/

use crate::analytics::{BenchmarkCalculator, PnlAccumulator, PnlReport};
use crate::config::Config;
use crate::core::order_lifecycle::OrderLifecycleManager;
use crate::core::strategy_selector::StrategySelector;
use crate::market_data::MarketSnapshot;
use crate::models::action::Action;
use crate::strategies::{ExecutionStrategy, StrategyKind};
use crate::utils::logging;

/// 알고리즘 실행 엔진
///
/// 틱마다 벤치마크 계산 → 주문 수명 관리 → 전략 선택 → 전략 판단 → 손익 기록 순으로 돈다.
/// 전략 인스턴스는 종류별로 하나씩 엔진 수명 동안 유지된다.
pub struct AlgoEngine {
  calculator: BenchmarkCalculator,
  lifecycle: OrderLifecycleManager,
  selector: StrategySelector,
  strategies: Vec<ExecutionStrategy>,
  pnl: PnlAccumulator,
  tick: u64,
  last_selected: Option<StrategyKind>,
}

impl AlgoEngine {
  pub fn new(config: &Config) -> Self {
    let strategies = StrategyKind::ALL
      .iter()
      .map(|kind| ExecutionStrategy::from_config(*kind, config))
      .collect();

    AlgoEngine {
      calculator: BenchmarkCalculator::new(config.engine.twap_depth),
      lifecycle: OrderLifecycleManager::new(config.engine.max_active_orders),
      selector: StrategySelector::new(config.selector.clone()),
      strategies,
      pnl: PnlAccumulator::new(),
      tick: 0,
      last_selected: None,
    }
  }

  /// 한 틱 처리. 오류는 내부에서 흡수되고 항상 행동 하나를 돌려준다.
  pub fn evaluate<S: MarketSnapshot + ?Sized>(&mut self, snapshot: &S) -> Action {
    self.tick += 1;
    let benchmarks = self.calculator.compute(snapshot);

    let action = match self.lifecycle.manage(snapshot) {
      Some(cancel) => cancel,
      None => {
        let selection = self.selector.select_with_reason(snapshot);
        if self.last_selected != Some(selection.kind) {
          logging::log_strategy_selected(self.tick, selection.kind, &selection.reason);
        }
        self.last_selected = Some(selection.kind);

        let strategy = &mut self.strategies[selection.kind.index()];
        strategy.decide(snapshot, &benchmarks)
      }
    };

    if let Action::CreateOrder { side, quantity, price } = &action {
      self.pnl.record(*side, *price, *quantity);
    }

    logging::log_tick_action(self.tick, &action);
    logging::log_pnl(&self.pnl_report());
    action
  }

  pub fn pnl_report(&self) -> PnlReport {
    self.pnl.report()
  }

  pub fn strategy(&self, kind: StrategyKind) -> &ExecutionStrategy {
    &self.strategies[kind.index()]
  }

  pub fn strategies(&self) -> &[ExecutionStrategy] {
    &self.strategies
  }

  pub fn tick(&self) -> u64 {
    self.tick
  }

  pub fn last_selected(&self) -> Option<StrategyKind> {
    self.last_selected
  }
}
