//! 로깅 유틸리티
//!
//! 로그 초기화 및 유틸리티 함수 제공

use env_logger::Builder;
use log::LevelFilter;
use std::env;

use crate::analytics::pnl::PnlReport;
use crate::error::AlgoError;
use crate::models::action::Action;
use crate::models::order::{ChildOrder, OrderSide};
use crate::strategies::StrategyKind;

/// 로그 레벨 문자열 해석
pub fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}

/// 로깅 시스템 초기화
///
/// RUST_LOG 가 설정되어 있으면 설정 파일의 레벨보다 우선한다.
pub fn init(default_level: &str) -> Result<(), AlgoError> {
    let mut builder = Builder::from_default_env();

    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| default_level.to_string());

    builder
        .filter_level(parse_level(&log_level))
        .format_timestamp_millis()
        .try_init()
        .map_err(|e| AlgoError::ConfigError(format!("Failed to init logger: {}", e)))?;

    log::info!("로깅 시스템 초기화 완료: 레벨 = {}", log_level);

    Ok(())
}

/// 전략 선택 로그
pub fn log_strategy_selected(tick: u64, kind: StrategyKind, reason: &str) {
    log::info!("[{}] 전략 선택: {} - 사유: {}", tick, kind, reason);
}

/// 주문 생성 로그
pub fn log_order_created(strategy: &str, side: OrderSide, quantity: f64, price: f64) {
    log::info!("[{}] 주문 생성 - 방향: {} - 수량: {} - 가격: {}",
               strategy, side, quantity, price);
}

/// 주문 취소 로그
pub fn log_order_cancelled(order: &ChildOrder, reason: &str) {
    log::info!("주문 취소: {} - 사유: {}", order, reason);
}

/// 틱 결과 로그
pub fn log_tick_action(tick: u64, action: &Action) {
    log::debug!("[{}] 틱 결과: {}", tick, action);
}

/// 손익 보고 로그
pub fn log_pnl(report: &PnlReport) {
    log::info!("손익: 매수 {:.2} / 매도 {:.2} / 수익 {:.2} / ROI {:.2}%",
               report.buy_notional, report.sell_notional, report.profit, report.roi);
}

/// 틱 파이프라인 안에서 흡수된 오류 로그
pub fn log_soft_fault(context: &str, error: &AlgoError) {
    match error {
        AlgoError::InventoryInvariant { .. } => log::error!("불변식 위반 - {}: {}", context, error),
        _ => log::warn!("대체값 사용 - {}: {}", context, error),
    }
}

/// 오류 로그
pub fn log_error(context: &str, error: &AlgoError) {
    log::error!("오류 발생 - {}: {}", context, error);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), LevelFilter::Debug);
        assert_eq!(parse_level("off"), LevelFilter::Off);
        assert_eq!(parse_level("nonsense"), LevelFilter::Info);
    }
}
