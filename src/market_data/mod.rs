//! 시장 데이터 조회 인터페이스

pub mod snapshot;

pub use snapshot::{BookSnapshot, MarketSnapshot, SnapshotExt};
