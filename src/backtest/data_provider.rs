use std::collections::BTreeMap;
use std::io::Read;
use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

use crate::error::AlgoError;
use crate::market_data::BookSnapshot;
use crate::models::market_data::{BookSide, PriceLevel};

/// 재생용 호가 스냅샷 공급자
pub trait BookDataProvider {
    fn load_snapshots(&self) -> Result<Vec<BookSnapshot>, AlgoError>;
}

/// `tick,side,price,quantity` 형식 CSV에서 스냅샷을 읽는다
pub struct CsvBookProvider {
    path: PathBuf,
    delimiter: u8,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    tick: i64,
    side: BookSide,
    price: f64,
    quantity: f64,
}

impl CsvBookProvider {
    pub fn new(path: PathBuf, delimiter: char) -> Self {
        Self { path, delimiter: delimiter as u8 }
    }

    /// 임의의 리더에서 읽기 (헤더 필수)
    pub fn read_from<R: Read>(reader: R, delimiter: u8) -> Result<Vec<BookSnapshot>, AlgoError> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut ticks: BTreeMap<i64, (Vec<PriceLevel>, Vec<PriceLevel>)> = BTreeMap::new();
        for rec in rdr.deserialize() {
            let row: CsvRow = rec?;
            if !row.price.is_finite() || !row.quantity.is_finite() {
                return Err(AlgoError::ParseError(format!("non-finite level at tick {}", row.tick)));
            }

            let entry = ticks.entry(row.tick).or_default();
            let level = PriceLevel::new(row.price, row.quantity, row.side);
            match row.side {
                BookSide::Bid => entry.0.push(level),
                BookSide::Ask => entry.1.push(level),
            }
        }

        Ok(ticks
            .into_iter()
            .map(|(tick, (bids, asks))| BookSnapshot::from_levels(tick, bids, asks))
            .collect())
    }
}

impl BookDataProvider for CsvBookProvider {
    fn load_snapshots(&self) -> Result<Vec<BookSnapshot>, AlgoError> {
        let file = std::fs::File::open(&self.path)?;
        let snapshots = Self::read_from(file, self.delimiter)?;
        log::info!("CSV 호가 로드 완료: {} - {} 틱", self.path.display(), snapshots.len());
        Ok(snapshots)
    }
}

/// 시드 고정 랜덤 워크 호가
pub struct SyntheticBookProvider {
    ticks: usize,
    seed: u64,
    mid_price: f64,
    depth: usize,
    level_step: f64,
}

impl SyntheticBookProvider {
    pub fn new(ticks: usize, seed: u64, mid_price: f64) -> Self {
        Self {
            ticks,
            seed,
            mid_price,
            depth: 5,
            level_step: 0.5,
        }
    }
}

impl BookDataProvider for SyntheticBookProvider {
    fn load_snapshots(&self) -> Result<Vec<BookSnapshot>, AlgoError> {
        if self.mid_price <= 0.0 {
            return Err(AlgoError::InvalidParameter(format!("mid price must be positive: {}", self.mid_price)));
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut mid = self.mid_price;
        let mut snapshots = Vec::with_capacity(self.ticks);

        for tick in 0..self.ticks {
            // 1% 이내 이동, 하한은 시작가의 10%
            mid = (mid * (1.0 + rng.gen_range(-0.01..0.01))).max(self.mid_price * 0.1);
            let half_spread = mid * rng.gen_range(0.0005..0.02);

            let mut bids = Vec::with_capacity(self.depth);
            let mut asks = Vec::with_capacity(self.depth);
            for level in 0..self.depth {
                let offset = half_spread + level as f64 * self.level_step;
                let bid_price = round_cents(mid - offset);
                if bid_price > 0.0 {
                    bids.push(PriceLevel::bid(bid_price, rng.gen_range(10u32..700) as f64));
                }
                asks.push(PriceLevel::ask(round_cents(mid + offset), rng.gen_range(10u32..700) as f64));
            }

            snapshots.push(BookSnapshot::from_levels(tick as i64, bids, asks));
        }

        log::info!("합성 호가 생성 완료: {} 틱 (seed {})", snapshots.len(), self.seed);
        Ok(snapshots)
    }
}

fn round_cents(price: f64) -> f64 {
    (price * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::{MarketSnapshot, SnapshotExt};

    #[test]
    fn test_csv_rows_grouped_by_tick() {
        let data = "tick,side,price,quantity\n\
                    2,bid,99.5,10\n\
                    1,bid,100,10\n\
                    1,ask,101,20\n\
                    1,bid,100.5,5\n\
                    2,ask,100.5,7\n";
        let snapshots = CsvBookProvider::read_from(data.as_bytes(), b',').unwrap();

        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0].timestamp, 1);
        assert_eq!(snapshots[0].best_bid().unwrap().price, 100.5);
        assert_eq!(snapshots[0].best_ask().unwrap().quantity, 20.0);
        assert_eq!(snapshots[1].bids().len(), 1);
    }

    #[test]
    fn test_csv_rejects_unknown_side() {
        let data = "tick,side,price,quantity\n1,middle,100,10\n";
        assert!(matches!(
            CsvBookProvider::read_from(data.as_bytes(), b','),
            Err(AlgoError::CsvError(_))
        ));
    }

    #[test]
    fn test_synthetic_book_is_reproducible() {
        let a = SyntheticBookProvider::new(20, 7, 100.0).load_snapshots().unwrap();
        let b = SyntheticBookProvider::new(20, 7, 100.0).load_snapshots().unwrap();

        assert_eq!(a.len(), 20);
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.bids(), y.bids());
            assert_eq!(x.asks(), y.asks());
        }
    }

    #[test]
    fn test_synthetic_book_is_not_crossed() {
        let snapshots = SyntheticBookProvider::new(50, 42, 100.0).load_snapshots().unwrap();
        for snapshot in &snapshots {
            let bid = snapshot.best_bid().unwrap();
            let ask = snapshot.best_ask().unwrap();
            assert!(bid.price < ask.price);
            assert_eq!(snapshot.bid_level_count(), 5);
        }
    }
}
