pub mod data_provider;
pub mod engine;
pub mod result;
pub mod venue;

pub use data_provider::{BookDataProvider, CsvBookProvider, SyntheticBookProvider};
pub use engine::Backtester;
pub use result::BacktestResult;
pub use venue::DryRunVenue;
