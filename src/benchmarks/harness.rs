//! 計測ハーネス
//!
//! 操作を1回だけ実行して経過時間を計測し、結果を `ResultReporter` に渡す。
//! 反復は操作の内側で行う。

use crate::core::{BenchResult, BenchmarkError, BenchmarkResult, BuildResult, ResultReporter};
use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::time::Instant;

/// 結果を1行書き込む
pub fn write_result(out: &mut impl Write, result: &BenchmarkResult) -> io::Result<()> {
    writeln!(out, "{result}")
}

/// 標準出力へ `"{label} elapsed {ms} ms"` を1行ずつ出力
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }
}

impl ResultReporter for ConsoleReporter {
    fn report(&self, result: &BenchmarkResult) -> io::Result<()> {
        write_result(&mut io::stdout().lock(), result)
    }
}

/// 何も出力しないレポーター
#[derive(Debug, Default)]
pub struct NoOpReporter;

impl NoOpReporter {
    pub fn new() -> Self {
        Self
    }
}

impl ResultReporter for NoOpReporter {
    fn report(&self, _result: &BenchmarkResult) -> io::Result<()> {
        Ok(())
    }
}

/// 報告された結果をメモリに溜めるレポーター
#[derive(Debug, Default)]
pub struct CollectingReporter {
    results: RefCell<Vec<BenchmarkResult>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> Vec<BenchmarkResult> {
        self.results.borrow().clone()
    }

    /// 出力されるはずの行
    pub fn lines(&self) -> Vec<String> {
        self.results.borrow().iter().map(ToString::to_string).collect()
    }
}

impl ResultReporter for CollectingReporter {
    fn report(&self, result: &BenchmarkResult) -> io::Result<()> {
        self.results.borrow_mut().push(result.clone());
        Ok(())
    }
}

/// 計測ハーネス
#[derive(Debug)]
pub struct Benchmark<R: ResultReporter> {
    reporter: R,
}

impl<R: ResultReporter> Benchmark<R> {
    pub fn new(reporter: R) -> Self {
        Self { reporter }
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// `operation` を1回実行し、単調増加クロックで計測して報告
    ///
    /// 操作のエラーは報告せずにラベル付きで返す。出力の失敗は `Io` エラーになる
    pub fn run(
        &self,
        operation: impl FnOnce() -> BuildResult<()>,
        label: &'static str,
    ) -> BenchResult<BenchmarkResult> {
        let start = Instant::now();
        operation().map_err(|source| BenchmarkError::construction(label, source))?;
        let result = BenchmarkResult::new(label, start.elapsed());

        self.reporter.report(&result)?;
        Ok(result)
    }
}

/// 入力から1行読むまで待つ（内容は問わない）
pub fn wait_for_enter(input: &mut impl BufRead) -> io::Result<()> {
    let mut line = Vec::new();
    input.read_until(b'\n', &mut line)?;
    Ok(())
}
