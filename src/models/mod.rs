//! 도메인 모델

pub mod action;
pub mod market_data;
pub mod order;
