//! 매개변수화된 실행 전략
//!
//! 매 틱 로컬 호가를 다시 채우고, 알고리즘 태그에 따라 판단한 뒤
//! 공통 커밋 단계(재고 클램프, 장부 갱신)를 거쳐 행동 하나를 돌려준다.

use crate::analytics::BenchmarkSet;
use crate::config::Config;
use crate::error::AlgoError;
use crate::market_data::{MarketSnapshot, SnapshotExt};
use crate::models::action::Action;
use crate::models::market_data::BookSide;
use crate::models::order::OrderSide;
use crate::orderbook::LocalBook;
use crate::strategies::policy::{Algorithm, StrategyPolicy};
use crate::strategies::state::StrategyState;
use crate::strategies::{iceberg, liquidity, participation, shortfall, twap, vwap, StrategyKind};
use crate::utils::logging;

/// 알고리즘이 보는 한 틱의 입력
pub(crate) struct Tick<'a> {
    /// 기준 가격 (로컬 사본의 최우선 매수가)
    pub price: f64,
    pub best_bid_quantity: f64,
    pub best_ask_quantity: f64,
    pub benchmarks: &'a BenchmarkSet,
    pub active_orders: usize,
    /// 매수 자식 주문의 누적 체결 수량
    pub filled: f64,
    /// 부모 주문의 남은 수량
    pub remaining: f64,
}

/// 알고리즘이 내는 주문 의도. 커밋 전까지는 장부에 반영되지 않는다.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Intent {
    pub side: OrderSide,
    pub quantity: f64,
    pub price: f64,
    pub reason: String,
}

impl Intent {
    pub fn new(side: OrderSide, quantity: f64, price: f64, reason: impl Into<String>) -> Self {
        Intent { side, quantity, price, reason: reason.into() }
    }

    pub fn buy(quantity: f64, price: f64, reason: impl Into<String>) -> Self {
        Self::new(OrderSide::Buy, quantity, price, reason)
    }
}

/// 실행 전략 인스턴스
pub struct ExecutionStrategy {
    /// 전략 이름
    name: String,
    algorithm: Algorithm,
    policy: StrategyPolicy,
    state: StrategyState,
    mirror: LocalBook,
}

impl ExecutionStrategy {
    /// 새 전략 생성
    pub fn new(algorithm: Algorithm, policy: StrategyPolicy) -> Self {
        ExecutionStrategy {
            name: algorithm.kind().short_name().to_string(),
            algorithm,
            policy,
            state: StrategyState::new(),
            mirror: LocalBook::new(),
        }
    }

    /// 설정에서 종류별 전략 생성
    pub fn from_config(kind: StrategyKind, config: &Config) -> Self {
        let algorithm = Algorithm::from_config(kind, config);
        let policy = StrategyPolicy::from_config(&algorithm, config);
        Self::new(algorithm, policy)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> StrategyKind {
        self.algorithm.kind()
    }

    pub fn policy(&self) -> &StrategyPolicy {
        &self.policy
    }

    pub fn state(&self) -> &StrategyState {
        &self.state
    }

    pub fn mirror(&self) -> &LocalBook {
        &self.mirror
    }

    /// 한 틱 판단. 실패는 모두 NoAction으로 흡수된다.
    pub fn decide<S: MarketSnapshot + ?Sized>(&mut self, snapshot: &S, benchmarks: &BenchmarkSet) -> Action {
        self.mirror.populate(snapshot);
        self.mirror.sort();
        self.state.ticks += 1;

        let active_orders = snapshot.active_child_orders().len();
        match self.evaluate_intent(snapshot, benchmarks, active_orders) {
            Ok(Some(intent)) => self.commit(intent),
            Ok(None) => Action::NoAction,
            Err(e) if e.is_soft() => {
                logging::log_soft_fault(&self.name, &e);
                Action::NoAction
            }
            Err(e) => {
                logging::log_error(&self.name, &e);
                Action::NoAction
            }
        }
    }

    fn evaluate_intent<S: MarketSnapshot + ?Sized>(
        &mut self,
        snapshot: &S,
        benchmarks: &BenchmarkSet,
        active_orders: usize,
    ) -> Result<Option<Intent>, AlgoError> {
        self.state.check_inventory()?;

        if self.mirror.is_empty() {
            return Err(AlgoError::DataIncomplete("empty book".into()));
        }
        let best_bid = self.mirror.best_bid()
            .ok_or_else(|| AlgoError::DataIncomplete("no bid levels".into()))?;
        if best_bid.price <= 0.0 {
            return Err(AlgoError::ArithmeticGuard(format!("non-positive best bid {}", best_bid.price)));
        }

        let tick = Tick {
            price: best_bid.price,
            best_bid_quantity: best_bid.quantity,
            best_ask_quantity: self.mirror.best_ask().map(|l| l.quantity).unwrap_or(0.0),
            benchmarks,
            active_orders,
            filled: snapshot.filled_quantity(OrderSide::Buy),
            remaining: (self.policy.target_quantity - snapshot.committed_quantity(OrderSide::Buy)).max(0.0),
        };

        let policy = &self.policy;
        let state = &mut self.state;
        let intent = match self.algorithm {
            Algorithm::TimeWeighted { tolerance } => twap::decide(&tick, policy, tolerance),
            Algorithm::VolumeWeighted { budget } => vwap::decide(&tick, policy, state, budget),
            Algorithm::ParticipationRate { rate, volatile_rate, volatility_threshold } => {
                let rates = participation::Participation { rate, volatile_rate, volatility_threshold };
                participation::decide(&tick, policy, state, rates)
            }
            Algorithm::ShortfallSeeking { favorable, unfavorable } => {
                shortfall::decide(&tick, policy, state, favorable, unfavorable)?
            }
            Algorithm::LiquiditySeeking => liquidity::decide(&tick, policy),
            Algorithm::Concealed { reveal_ratio } => iceberg::decide(&tick, policy, reveal_ratio),
        };

        Ok(intent)
    }

    /// 매도 수량 클램프, 장부와 로컬 사본 갱신
    ///
    /// 활성 주문 한도는 여기서 막지 않는다. 한도를 넘긴 주문은 다음 틱 수명 관리자가 오래된 순으로 취소한다.
    fn commit(&mut self, intent: Intent) -> Action {
        let quantity = match intent.side {
            OrderSide::Buy => intent.quantity,
            OrderSide::Sell => intent.quantity.min(self.state.sellable()),
        };
        if quantity <= 0.0 {
            log::info!("[{}] 매도 가능 수량 없음: {}", self.name, intent.reason);
            return Action::NoAction;
        }

        self.state.record(intent.side, intent.price, quantity);
        if let Err(e) = self.state.check_inventory() {
            logging::log_soft_fault(&self.name, &e);
        }

        // 기준 가격은 최우선 매수가이므로 가상 체결은 해당 매수 레벨을 소진한다.
        if !self.mirror.update(BookSide::Bid, intent.price, quantity) {
            log::debug!("[{}] 로컬 사본에 가격 {} 레벨 없음", self.name, intent.price);
        }

        logging::log_order_created(&self.name, intent.side, quantity, intent.price);
        log::debug!("[{}] 사유: {}\n{}", self.name, intent.reason, self.mirror.format());

        Action::create(intent.side, quantity, intent.price)
    }
}
