//! 벤치마크와 손익 분석

pub mod benchmark;
pub mod pnl;

pub use benchmark::{Benchmark, BenchmarkCalculator, BenchmarkKind, BenchmarkSet, BenchmarkSide};
pub use pnl::{PnlAccumulator, PnlReport};
