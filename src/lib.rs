//! オブジェクト生成戦略のベンチマーク
//!
//! 引数なしコンストラクタによる動的インスタンス生成を3つの方式で比較：
//! - Expression: 式ツリーを一度コンパイルしてキャッシュ
//! - Emit: 命令列を生成・検証してルーチンとしてキャッシュ
//! - Reflection: コンストラクタハンドルをキャッシュし毎回リフレクティブに呼び出し

pub mod benchmarks;
pub mod builders;
pub mod core;
pub mod metadata;

pub use crate::builders::{EmitBuilder, ExpressionBuilder, ReflectionBuilder};
pub use crate::core::{
    BenchmarkConfig, BenchmarkResult, BuildResult, ConstructionError, DefaultConfig,
    InstanceBuilder, ResultReporter, Strategy, TestingConfig,
};
pub use crate::metadata::{Constructible, SampleRecord, TypeDescriptor};
