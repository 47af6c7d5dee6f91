/**
* filename : config
* author : HAMA
* date: 2025. 5. 8.
* description:
**/

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::AlgoError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub engine: EngineConfig,
    pub selector: SelectorConfig,
    pub exits: ExitBands,
    pub algorithms: AlgorithmConfig,
    pub replay: ReplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

/// 엔진 공통 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// 동시에 살아 있을 수 있는 자식 주문 수
    pub max_active_orders: usize,
    /// 부모 주문 총 수량
    pub target_quantity: f64,
    /// 자식 주문 기본 수량
    pub child_quantity: f64,
    /// TWAP 계산에 쓰는 상위 레벨 수
    pub twap_depth: usize,
}

/// 전략 선택 임계값
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub spread_threshold: f64,
    pub liquidity_threshold: f64,
    pub large_order_threshold: f64,
    pub volatility_threshold: f64,
    pub low_volatility_threshold: f64,
}

/// 익절/손절 구간 (벤치마크 대비 배수)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExitBands {
    pub take_profit_lower: f64,
    pub take_profit_upper: f64,
    pub stop_loss_lower: f64,
    pub stop_loss_upper: f64,
}

/// 알고리즘별 파라미터
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlgorithmConfig {
    /// TWAP 진입 허용 오차 (비율)
    pub twap_tolerance: f64,
    /// VWAP 매수 예산 (명목 금액)
    pub vwap_budget: f64,
    /// 참여율 (관측 거래량 대비)
    pub participation_rate: f64,
    /// 변동성이 임계값을 넘을 때의 참여율
    pub participation_rate_volatile: f64,
    pub participation_volatility_threshold: f64,
    pub shortfall_favorable: f64,
    pub shortfall_unfavorable: f64,
    /// 아이스버그 노출 비율
    pub iceberg_reveal_ratio: f64,
}

/// 드라이런 재생 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// 최우선 호가에 걸린 주문이 틱마다 체결되는 비율
    pub passive_fill_ratio: f64,
    pub synthetic_ticks: usize,
    pub synthetic_seed: u64,
    pub synthetic_mid_price: f64,
}

impl Config {
    /// Load configuration from config.json in the working directory
    pub fn load() -> Result<Self, AlgoError> {
        let config_path = Path::new("config.json");

        let mut cfg = if config_path.exists() {
            Self::from_file(config_path)?
        } else {
            Config::default()
        };
        // environment overrides
        cfg.apply_env_overrides()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, AlgoError> {
        let mut file = File::open(path)
            .map_err(|e| AlgoError::ConfigError(format!("Failed to open config file: {}", e)))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| AlgoError::ConfigError(format!("Failed to read config file: {}", e)))?;

        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self, AlgoError> {
        serde_json::from_str(contents)
            .map_err(|e| AlgoError::ConfigError(format!("Failed to parse config file: {}", e)))
    }

    /// Apply environment variable overrides for runtime fields
    fn apply_env_overrides(&mut self) -> Result<(), AlgoError> {
        use std::env;
        if let Ok(v) = env::var("ALGO_MAX_ACTIVE_ORDERS") {
            self.engine.max_active_orders = parse_env("ALGO_MAX_ACTIVE_ORDERS", &v)?;
        }
        if let Ok(v) = env::var("ALGO_TARGET_QUANTITY") {
            self.engine.target_quantity = parse_env("ALGO_TARGET_QUANTITY", &v)?;
        }
        if let Ok(v) = env::var("ALGO_CHILD_QUANTITY") {
            self.engine.child_quantity = parse_env("ALGO_CHILD_QUANTITY", &v)?;
        }
        if let Ok(v) = env::var("ALGO_VWAP_BUDGET") {
            self.algorithms.vwap_budget = parse_env("ALGO_VWAP_BUDGET", &v)?;
        }
        Ok(())
    }

    /// 값 범위 검증
    pub fn validate(&self) -> Result<(), AlgoError> {
        if self.engine.max_active_orders == 0 {
            return Err(AlgoError::ConfigError("max_active_orders must be at least 1".into()));
        }
        if self.engine.target_quantity <= 0.0 || self.engine.child_quantity <= 0.0 {
            return Err(AlgoError::ConfigError("target and child quantity must be positive".into()));
        }
        if self.engine.twap_depth == 0 {
            return Err(AlgoError::ConfigError("twap_depth must be at least 1".into()));
        }
        if self.selector.low_volatility_threshold > self.selector.volatility_threshold {
            return Err(AlgoError::ConfigError(
                "low_volatility_threshold must not exceed volatility_threshold".into(),
            ));
        }
        self.exits.validate()?;
        if !(0.0..=1.0).contains(&self.algorithms.participation_rate)
            || !(0.0..=1.0).contains(&self.algorithms.participation_rate_volatile)
            || !(0.0..=1.0).contains(&self.algorithms.iceberg_reveal_ratio)
            || !(0.0..=1.0).contains(&self.replay.passive_fill_ratio)
        {
            return Err(AlgoError::ConfigError("ratios must lie in [0, 1]".into()));
        }
        if self.algorithms.shortfall_favorable > self.algorithms.shortfall_unfavorable {
            return Err(AlgoError::ConfigError(
                "shortfall_favorable must not exceed shortfall_unfavorable".into(),
            ));
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, AlgoError> {
    value
        .trim()
        .parse()
        .map_err(|_| AlgoError::ConfigError(format!("Invalid value for {}: {}", key, value)))
}

impl ExitBands {
    pub fn validate(&self) -> Result<(), AlgoError> {
        if self.take_profit_lower > self.take_profit_upper || self.stop_loss_lower > self.stop_loss_upper {
            return Err(AlgoError::ConfigError("exit band lower bound above upper bound".into()));
        }
        if self.stop_loss_upper >= 1.0 || self.take_profit_lower <= 1.0 {
            return Err(AlgoError::ConfigError(
                "stop-loss band must sit below and take-profit band above the benchmark".into(),
            ));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_active_orders: 3,
            target_quantity: 300.0,
            child_quantity: 75.0,
            twap_depth: 10,
        }
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        SelectorConfig {
            spread_threshold: 10.0,
            liquidity_threshold: 500.0,
            large_order_threshold: 1000.0,
            volatility_threshold: 0.05,
            low_volatility_threshold: 0.02,
        }
    }
}

impl Default for ExitBands {
    fn default() -> Self {
        ExitBands {
            take_profit_lower: 1.001,
            take_profit_upper: 1.07,
            stop_loss_lower: 0.80,
            stop_loss_upper: 0.999,
        }
    }
}

impl Default for AlgorithmConfig {
    fn default() -> Self {
        AlgorithmConfig {
            twap_tolerance: 0.0,
            vwap_budget: 100_000.0,
            participation_rate: 0.05,
            participation_rate_volatile: 0.10,
            participation_volatility_threshold: 0.05,
            shortfall_favorable: 0.01,
            shortfall_unfavorable: 0.05,
            iceberg_reveal_ratio: 0.10,
        }
    }
}

impl Default for ReplayConfig {
    fn default() -> Self {
        ReplayConfig {
            passive_fill_ratio: 0.5,
            synthetic_ticks: 200,
            synthetic_seed: 42,
            synthetic_mid_price: 100.0,
        }
    }
}
