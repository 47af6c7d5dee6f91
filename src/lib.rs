//! 주문 실행 알고리즘 라이브러리
//!
//! 부모 주문을 자식 주문으로 나누어 집행하는 틱 단위 실행 엔진과 재생 도구입니다.

pub mod analytics;
pub mod backtest;
pub mod config;
pub mod core;
pub mod error;
pub mod market_data;
pub mod models;
pub mod orderbook;
pub mod strategies;
pub mod utils;

// 핵심 타입 재노출
pub use crate::config::Config;
pub use crate::core::AlgoEngine;
pub use crate::error::AlgoError;
pub use crate::market_data::{BookSnapshot, MarketSnapshot, SnapshotExt};
pub use crate::models::action::Action;
pub use crate::models::market_data::{BookSide, PriceLevel};
pub use crate::models::order::{ChildOrder, OrderId, OrderSide, OrderStatus};
pub use crate::strategies::StrategyKind;

/// 버전 정보
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 결과 타입 별칭
pub type Result<T> = std::result::Result<T, AlgoError>;
