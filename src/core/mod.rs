//! 틱 단위 실행 엔진과 엔진이 소유하는 관리자들

pub mod engine;
pub mod order_lifecycle;
pub mod strategy_selector;

pub use engine::AlgoEngine;
pub use order_lifecycle::OrderLifecycleManager;
pub use strategy_selector::{Selection, StrategySelector};
