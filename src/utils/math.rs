//! 수학 관련 유틸리티
//!
//! 벤치마크 계산에 쓰이는 평균, 가중 평균, 보호된 나눗셈

use crate::error::AlgoError;

/// 평균 계산
pub fn average(values: &[f64]) -> Option<f64> {
  if values.is_empty() {
    return None;
  }

  Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// VWAP (거래량 가중 평균 가격) 계산
///
/// 거래량 합이 0이면 None
pub fn calculate_vwap(prices: &[f64], volumes: &[f64]) -> Option<f64> {
  if prices.len() != volumes.len() || prices.is_empty() {
    return None;
  }

  let total_volume: f64 = volumes.iter().sum();
  if total_volume <= 0.0 {
    return None;
  }

  let sum_pv: f64 = prices.iter()
    .zip(volumes.iter())
    .map(|(p, v)| p * v)
    .sum();

  Some(sum_pv / total_volume)
}

/// TWAP (시간 가중 평균 가격) 계산
pub fn calculate_twap(prices: &[f64]) -> Option<f64> {
  average(prices)
}

/// 0 분모를 거르는 나눗셈
pub fn guarded_ratio(numerator: f64, denominator: f64, context: &str) -> Result<f64, AlgoError> {
  if denominator == 0.0 || !denominator.is_finite() {
    return Err(AlgoError::ArithmeticGuard(format!(
      "{}: division by {}", context, denominator
    )));
  }
  Ok(numerator / denominator)
}

/// 기준가 대비 상대 거리 |price - reference| / reference
pub fn relative_distance(price: f64, reference: f64, context: &str) -> Result<f64, AlgoError> {
  guarded_ratio((price - reference).abs(), reference, context)
}

/// 값이 [lower, upper] 배수 구간 안에 있는지
pub fn within_band(value: f64, reference: f64, lower: f64, upper: f64) -> bool {
  value >= reference * lower && value <= reference * upper
}
