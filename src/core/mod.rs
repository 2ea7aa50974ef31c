// コアレイヤー - 基盤となるトレイト、型、エラー、設定の定義
// 他のレイヤーから参照される基本的な抽象化を提供

pub mod error;
pub mod static_config;
pub mod traits;
pub mod types;

pub use error::{
    BenchResult, BenchmarkError, BuildResult, ConstructionError, ErrorSeverity,
};
pub use static_config::{BenchmarkConfig, DefaultConfig, TestingConfig};
pub use traits::{InstanceBuilder, MockResultReporter, ResultReporter};
pub use types::{BenchmarkResult, Strategy};
