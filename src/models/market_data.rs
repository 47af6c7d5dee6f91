use serde::{Deserialize, Serialize};
use std::fmt;

/// 호가창의 면
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BookSide {
    Bid,
    Ask,
}

impl fmt::Display for BookSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookSide::Bid => write!(f, "BID"),
            BookSide::Ask => write!(f, "ASK"),
        }
    }
}

/// 단일 가격 레벨
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PriceLevel {
    pub price: f64,
    pub quantity: f64,
    pub side: BookSide,
}

impl PriceLevel {
    pub fn new(price: f64, quantity: f64, side: BookSide) -> Self {
        PriceLevel {
            price,
            quantity: quantity.max(0.0),
            side,
        }
    }

    pub fn bid(price: f64, quantity: f64) -> Self {
        Self::new(price, quantity, BookSide::Bid)
    }

    pub fn ask(price: f64, quantity: f64) -> Self {
        Self::new(price, quantity, BookSide::Ask)
    }

    pub fn is_empty(&self) -> bool {
        self.quantity <= 0.0
    }
}
