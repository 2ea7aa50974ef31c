//! コンパイル時設定システム
//!
//! 型レベルで設定を表現し、実行時の設定面を持たない：
//! - BenchmarkConfig: 反復回数・ラウンド数などの定数
//! - validate: 設定の検証

use super::error::{BenchResult, BenchmarkError};

/// 型レベル設定 - コンパイル時設定表現
pub trait BenchmarkConfig {
    /// 設定名（コンパイル時文字列）
    const NAME: &'static str;

    /// 説明（コンパイル時文字列）
    const DESCRIPTION: &'static str;

    /// 1回の計測でビルダーを呼び出す回数
    const ITERATIONS: usize;

    /// Expression → Emit → Reflection を繰り返す回数
    const ROUNDS: usize;

    /// 終了前に標準入力の1行を待つかどうか
    const WAIT_FOR_ENTER: bool;
}

/// デフォルト設定
pub struct DefaultConfig;

impl BenchmarkConfig for DefaultConfig {
    const NAME: &'static str = "default";
    const DESCRIPTION: &'static str = "1000万回 × 3ラウンドの計測";
    const ITERATIONS: usize = 10_000_000;
    const ROUNDS: usize = 3;
    const WAIT_FOR_ENTER: bool = true;
}

/// テスト用設定
pub struct TestingConfig;

impl BenchmarkConfig for TestingConfig {
    const NAME: &'static str = "testing";
    const DESCRIPTION: &'static str = "テスト用軽量設定";
    const ITERATIONS: usize = 1_000;
    const ROUNDS: usize = 3;
    const WAIT_FOR_ENTER: bool = false;
}

/// 設定を検証
pub fn validate<C: BenchmarkConfig>() -> BenchResult<()> {
    if C::ITERATIONS == 0 {
        return Err(BenchmarkError::configuration(
            C::NAME,
            "ITERATIONS は1以上である必要があります",
        ));
    }
    if C::ROUNDS == 0 {
        return Err(BenchmarkError::configuration(
            C::NAME,
            "ROUNDS は1以上である必要があります",
        ));
    }
    Ok(())
}
