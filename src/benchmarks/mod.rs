//! ベンチマーク実行層
//!
//! - harness: 1回分の計測と結果報告
//! - suite: 3方式 × ラウンド数の実行

pub mod harness;
pub mod suite;

pub use harness::{
    wait_for_enter, write_result, Benchmark, CollectingReporter, ConsoleReporter, NoOpReporter,
};
pub use suite::{construct_many, BenchmarkSuite};
