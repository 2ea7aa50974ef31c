// ベンチマークで使用する基本型

use std::fmt;
use std::time::Duration;

/// インスタンス生成方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// 式ツリーのコンパイル
    Expression,
    /// 命令列の生成
    Emit,
    /// リフレクティブ呼び出し
    Reflection,
}

impl Strategy {
    /// 実行順序（Expression → Emit → Reflection）
    pub const ALL: [Strategy; 3] = [Strategy::Expression, Strategy::Emit, Strategy::Reflection];

    /// コンソール出力用ラベル
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Expression => "Linq",
            Self::Emit => "Emit",
            Self::Reflection => "Reflection",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 1回分の計測結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkResult {
    pub label: String,
    pub elapsed: Duration,
}

impl BenchmarkResult {
    pub fn new(label: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            label: label.into(),
            elapsed,
        }
    }

    /// 経過時間（ミリ秒、切り捨て）
    pub fn elapsed_millis(&self) -> u128 {
        self.elapsed.as_millis()
    }
}

impl fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} elapsed {} ms", self.label, self.elapsed_millis())
    }
}
