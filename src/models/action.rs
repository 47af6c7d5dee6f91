use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::order::{OrderId, OrderSide};

/// 한 틱에 엔진이 디스패처로 돌려주는 단일 행동
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Action {
    CreateOrder {
        side: OrderSide,
        quantity: f64,
        price: f64,
    },
    CancelOrder {
        order_id: OrderId,
    },
    NoAction,
}

impl Action {
    pub fn create(side: OrderSide, quantity: f64, price: f64) -> Self {
        Action::CreateOrder { side, quantity, price }
    }

    pub fn cancel(order_id: OrderId) -> Self {
        Action::CancelOrder { order_id }
    }

    pub fn is_no_action(&self) -> bool {
        matches!(self, Action::NoAction)
    }
}

impl Default for Action {
    fn default() -> Self {
        Action::NoAction
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::CreateOrder { side, quantity, price } => {
                write!(f, "CreateOrder({} {}@{})", side, quantity, price)
            }
            Action::CancelOrder { order_id } => write!(f, "CancelOrder({})", order_id),
            Action::NoAction => write!(f, "NoAction"),
        }
    }
}
