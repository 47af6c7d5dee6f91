/**
* filename : error
* author : HAMA
* date: 2025. 5. 8.
* description:
**/

use thiserror::Error;

use crate::models::order::OrderId;

#[derive(Error, Debug)]
pub enum AlgoError {
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Data incomplete: {0}")]
    DataIncomplete(String),

    #[error("Arithmetic guard: {0}")]
    ArithmeticGuard(String),

    #[error("Inventory invariant violated: sold {sold} > bought {bought}")]
    InventoryInvariant { sold: f64, bought: f64 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Parse error: {0}")]
    ParseError(String),
}

impl AlgoError {
    /// 틱 파이프라인 안에서 NoAction으로 흡수되는 오류인지 여부
    pub fn is_soft(&self) -> bool {
        matches!(
            self,
            AlgoError::DataIncomplete(_)
                | AlgoError::ArithmeticGuard(_)
                | AlgoError::InventoryInvariant { .. }
        )
    }
}
