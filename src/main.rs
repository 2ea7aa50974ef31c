use anyhow::Result;
use tracing_subscriber::EnvFilter;

use create_object_bench::{
    benchmarks::{BenchmarkSuite, ConsoleReporter},
    core::BenchResult,
    BenchmarkConfig, DefaultConfig, EmitBuilder, ExpressionBuilder, ReflectionBuilder,
    SampleRecord,
};

// プロセス全体で共有するキャッシュ - 初回使用時に準備され、終了まで保持される
static EXPRESSION: ExpressionBuilder<SampleRecord> = ExpressionBuilder::new();
static EMIT: EmitBuilder<SampleRecord> = EmitBuilder::new();
static REFLECTION: ReflectionBuilder<SampleRecord> = ReflectionBuilder::new();

fn main() -> Result<()> {
    // 計測結果は標準出力、ログは標準エラー出力
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    tracing::debug!(
        config = DefaultConfig::NAME,
        description = DefaultConfig::DESCRIPTION,
        "configuration selected"
    );

    if let Err(error) = run() {
        tracing::error!(severity = error.severity().as_str(), "{error}");
        return Err(error.into());
    }

    Ok(())
}

fn run() -> BenchResult<()> {
    let suite = BenchmarkSuite::<DefaultConfig, _>::new(ConsoleReporter::new())?;
    suite.run(&EXPRESSION, &EMIT, &REFLECTION)?;
    suite.wait_for_exit(&mut std::io::stdin().lock())?;
    Ok(())
}
