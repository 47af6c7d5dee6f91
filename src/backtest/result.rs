use std::collections::HashMap;
use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};

use crate::analytics::PnlReport;
use crate::strategies::StrategyKind;

/// 재생 결과
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BacktestResult {
    pub name: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub ticks: usize,
    pub orders_created: usize,
    pub orders_cancelled: usize,
    pub no_actions: usize,
    /// 행동 반영 직후 관측된 최대 활성 주문 수 (한도 + 1 까지 가능)
    pub max_active_orders: usize,
    /// 전략별 실행 틱 수 (취소 틱 제외)
    pub selections: HashMap<StrategyKind, usize>,
    /// 자식 주문 기준 누적 체결 수량
    pub filled_buy_quantity: f64,
    pub filled_sell_quantity: f64,
    pub pnl: PnlReport,
}

impl BacktestResult {
    /// 행동을 낸 틱의 비율 (백분율)
    pub fn activity_rate(&self) -> f64 {
        if self.ticks == 0 {
            return 0.0;
        }
        (self.ticks - self.no_actions) as f64 / self.ticks as f64 * 100.0
    }

    /// 가장 많이 선택된 전략
    pub fn dominant_strategy(&self) -> Option<StrategyKind> {
        StrategyKind::ALL
            .iter()
            .copied()
            .filter_map(|kind| self.selections.get(&kind).map(|count| (kind, *count)))
            .filter(|(_, count)| *count > 0)
            .max_by_key(|(_, count)| *count)
            .map(|(kind, _)| kind)
    }

    /// 결과 요약 문자열
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("=== {} ===", self.name),
            format!("기간: {} ~ {}", self.started_at.format("%H:%M:%S%.3f"), self.finished_at.format("%H:%M:%S%.3f")),
            format!("틱: {} (행동 비율 {:.1}%)", self.ticks, self.activity_rate()),
            format!("주문 생성: {} / 취소: {} / 최대 활성: {}",
                    self.orders_created, self.orders_cancelled, self.max_active_orders),
            format!("체결 수량: 매수 {} / 매도 {}", self.filled_buy_quantity, self.filled_sell_quantity),
        ];

        for kind in StrategyKind::ALL {
            if let Some(count) = self.selections.get(&kind) {
                lines.push(format!("  {:<10} {} 틱", kind.short_name(), count));
            }
        }

        lines.push(format!(
            "손익: 매수 {:.2} / 매도 {:.2} / 수익 {:.2} / ROI {:.2}%",
            self.pnl.buy_notional, self.pnl.sell_notional, self.pnl.profit, self.pnl.roi
        ));
        lines.join("\n")
    }
}
