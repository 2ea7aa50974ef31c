// ビルダーと結果報告のトレイト定義

use super::error::BuildResult;
use super::types::{BenchmarkResult, Strategy};
use mockall::automock;
use std::io;

/// 引数なしでインスタンスを生成するビルダーの抽象化トレイト
///
/// 初回呼び出しで準備処理（コンパイル・命令生成・ハンドル検索）を一度だけ行い、
/// 以降はキャッシュ済みの成果物を使って生成する
pub trait InstanceBuilder<T> {
    /// 生成方式
    fn strategy(&self) -> Strategy;

    /// 新しいインスタンスを生成
    fn build(&self) -> BuildResult<T>;

    /// 準備処理が実行された回数
    fn setup_count(&self) -> usize;

    /// 準備処理が完了しているかどうか
    fn is_prepared(&self) -> bool {
        self.setup_count() > 0
    }

    /// 表示用ラベル
    fn label(&self) -> &'static str {
        self.strategy().label()
    }
}

/// ベンチマーク結果の報告を抽象化するトレイト
#[automock]
pub trait ResultReporter {
    /// 1回分の計測結果を報告
    fn report(&self, result: &BenchmarkResult) -> io::Result<()>;
}
