//! インスタンス生成ビルダー
//!
//! 3つの方式はすべて `InstanceBuilder` を実装し、型ごとに1つのキャッシュセルを持つ。
//! ジェネリック引数で型が確定しているため、型をキーにしたマップは使わない。

pub mod emit;
pub mod expression;
pub mod reflection;

pub use emit::{DynamicRoutine, EmitBuilder, OpCode, RoutineGenerator};
pub use expression::{CompiledFn, Expr, ExpressionBuilder, Lambda};
pub use reflection::ReflectionBuilder;

use std::sync::atomic::{AtomicUsize, Ordering};

/// 準備処理の実行回数カウンタ
#[derive(Debug, Default)]
pub(crate) struct SetupCounter(AtomicUsize);

impl SetupCounter {
    pub(crate) const fn new() -> Self {
        Self(AtomicUsize::new(0))
    }

    pub(crate) fn record(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn get(&self) -> usize {
        self.0.load(Ordering::Relaxed)
    }
}
