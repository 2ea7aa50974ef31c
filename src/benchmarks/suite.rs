//! 3方式の比較スイート
//!
//! Expression → Emit → Reflection の順に `C::ROUNDS` 回繰り返す。
//! 1ラウンド目は準備コストを含み、2ラウンド目以降は呼び出しコストのみを計測する。

use super::harness::{wait_for_enter, Benchmark};
use crate::builders::{EmitBuilder, ExpressionBuilder, ReflectionBuilder};
use crate::core::static_config::validate;
use crate::core::{
    BenchResult, BenchmarkConfig, BenchmarkResult, BuildResult, InstanceBuilder,
    ResultReporter,
};
use crate::metadata::Constructible;
use std::hint::black_box;
use std::io::BufRead;
use std::marker::PhantomData;
use tracing::info;

/// ビルダーを `iterations` 回呼び出し、生成したインスタンスは即座に破棄する
pub fn construct_many<T, B>(builder: &B, iterations: usize) -> BuildResult<()>
where
    B: InstanceBuilder<T> + ?Sized,
{
    for _ in 0..iterations {
        black_box(builder.build()?);
    }
    Ok(())
}

/// 型レベル設定 `C` で動作するベンチマークスイート
pub struct BenchmarkSuite<C: BenchmarkConfig, R: ResultReporter> {
    harness: Benchmark<R>,
    _config: PhantomData<C>,
}

impl<C: BenchmarkConfig, R: ResultReporter> BenchmarkSuite<C, R> {
    /// 設定を検証してスイートを作成
    pub fn new(reporter: R) -> BenchResult<Self> {
        validate::<C>()?;
        Ok(Self {
            harness: Benchmark::new(reporter),
            _config: PhantomData,
        })
    }

    pub fn reporter(&self) -> &R {
        self.harness.reporter()
    }

    /// 1つのビルダーを計測
    pub fn measure<T, B>(&self, builder: &B) -> BenchResult<BenchmarkResult>
    where
        B: InstanceBuilder<T>,
    {
        self.harness.run(
            || construct_many::<T, B>(builder, C::ITERATIONS),
            builder.label(),
        )
    }

    /// 全ラウンドを実行
    pub fn run<T: Constructible>(
        &self,
        expression: &ExpressionBuilder<T>,
        emit: &EmitBuilder<T>,
        reflection: &ReflectionBuilder<T>,
    ) -> BenchResult<Vec<BenchmarkResult>> {
        info!(
            config = C::NAME,
            target = T::TYPE_NAME,
            iterations = C::ITERATIONS,
            rounds = C::ROUNDS,
            "benchmark started"
        );

        let mut results = Vec::with_capacity(C::ROUNDS.saturating_mul(3));
        for round in 1..=C::ROUNDS {
            results.push(self.measure::<T, _>(expression)?);
            results.push(self.measure::<T, _>(emit)?);
            results.push(self.measure::<T, _>(reflection)?);
            info!(round, "round finished");
        }

        info!(measurements = results.len(), "benchmark finished");
        Ok(results)
    }

    /// 設定で有効な場合のみ、入力を1行待つ
    pub fn wait_for_exit(&self, input: &mut impl BufRead) -> BenchResult<()> {
        if C::WAIT_FOR_ENTER {
            wait_for_enter(input)?;
        }
        Ok(())
    }
}
