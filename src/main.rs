/**
* filename : main
* author : HAMA
* date: 2025. 5. 11.
* description:
**/

use std::path::PathBuf;

use xAlgo::backtest::{BacktestResult, Backtester, BookDataProvider, CsvBookProvider, SyntheticBookProvider};
use xAlgo::config::Config;
use xAlgo::utils::logging;

fn main() -> Result<(), anyhow::Error> {
    // 설정 로드
    let config = Config::load()?;

    // 로깅 초기화
    logging::init(&config.logging.level)?;
    log::info!("주문 실행 엔진 시작... (v{})", xAlgo::VERSION);

    // 명령줄 인수 확인
    let args: Vec<String> = std::env::args().collect();

    let result = match args.get(1).map(String::as_str) {
        Some("replay") => {
            let path = args.get(2)
                .map(PathBuf::from)
                .ok_or_else(|| anyhow::anyhow!("사용법: xAlgo replay <file.csv>"))?;
            run_replay(&config, path)?
        }
        Some(other) => anyhow::bail!("알 수 없는 명령: {}", other),
        None => run_synthetic(&config)?,
    };

    // 결과 출력
    println!("\n{}", result.summary());
    if let Some(kind) = result.dominant_strategy() {
        println!("주요 전략: {}", kind);
    }

    Ok(())
}

fn run_synthetic(config: &Config) -> Result<BacktestResult, anyhow::Error> {
    log::info!("합성 시나리오 모드 시작...");

    let replay = &config.replay;
    let provider = SyntheticBookProvider::new(replay.synthetic_ticks, replay.synthetic_seed, replay.synthetic_mid_price);
    run(config, "synthetic", &provider)
}

fn run_replay(config: &Config, path: PathBuf) -> Result<BacktestResult, anyhow::Error> {
    log::info!("CSV 재생 모드 시작: {}", path.display());

    let name = path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("replay")
        .to_string();
    let provider = CsvBookProvider::new(path, ',');
    run(config, &name, &provider)
}

fn run(config: &Config, name: &str, provider: &dyn BookDataProvider) -> Result<BacktestResult, anyhow::Error> {
    let mut backtester = Backtester::new(name, config);
    let result = backtester.run_provider(provider)?;
    Ok(result)
}
