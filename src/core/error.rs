// インスタンス生成とベンチマーク実行のエラー型定義

use thiserror::Error;

/// インスタンス生成固有のエラー型
#[derive(Error, Debug)]
pub enum ConstructionError {
    #[error("引数なしコンストラクタが見つかりません: {type_name}")]
    ConstructorNotFound { type_name: &'static str },

    #[error("型の不一致: 期待 {expected}, 実際 {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("空のブロック式はコンパイルできません: {type_name}")]
    EmptyBlock { type_name: &'static str },

    #[error("不正な命令列: {type_name} - {reason}")]
    InvalidProgram {
        type_name: &'static str,
        reason: String,
    },

    #[error("引数の数が一致しません: {type_name} (期待 {expected}, 実際 {found})")]
    ArityMismatch {
        type_name: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("引数の型が一致しません: {type_name} 引数{index} (期待 {expected})")]
    ArgumentTypeMismatch {
        type_name: &'static str,
        index: usize,
        expected: &'static str,
    },

    #[error("コンストラクタ呼び出しに失敗しました: {type_name} - {source}")]
    InvocationFailed {
        type_name: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl ConstructionError {
    pub fn constructor_not_found(type_name: &'static str) -> Self {
        Self::ConstructorNotFound { type_name }
    }

    pub fn type_mismatch(expected: &'static str, found: &'static str) -> Self {
        Self::TypeMismatch { expected, found }
    }

    pub fn empty_block(type_name: &'static str) -> Self {
        Self::EmptyBlock { type_name }
    }

    /// 命令列検証エラーの作成
    pub fn invalid_program(type_name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidProgram {
            type_name,
            reason: reason.into(),
        }
    }

    pub fn arity_mismatch(type_name: &'static str, expected: usize, found: usize) -> Self {
        Self::ArityMismatch {
            type_name,
            expected,
            found,
        }
    }

    pub fn argument_type_mismatch(
        type_name: &'static str,
        index: usize,
        expected: &'static str,
    ) -> Self {
        Self::ArgumentTypeMismatch {
            type_name,
            index,
            expected,
        }
    }

    /// コンストラクタ本体のエラーをそのまま包む
    pub fn invocation_failed(type_name: &'static str, source: anyhow::Error) -> Self {
        Self::InvocationFailed { type_name, source }
    }

    /// エラーの重要度を取得
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ConstructorNotFound { .. } | Self::InvalidProgram { .. } => {
                ErrorSeverity::Critical
            }
            Self::TypeMismatch { .. } | Self::EmptyBlock { .. } => ErrorSeverity::High,
            Self::ArityMismatch { .. } | Self::ArgumentTypeMismatch { .. } => ErrorSeverity::High,
            Self::InvocationFailed { .. } => ErrorSeverity::Medium,
        }
    }
}

/// ベンチマーク実行のエラー型
#[derive(Error, Debug)]
pub enum BenchmarkError {
    #[error("設定エラー: {config} - {message}")]
    Configuration {
        config: &'static str,
        message: String,
    },

    #[error("{label} の実行に失敗しました: {source}")]
    Construction {
        label: &'static str,
        #[source]
        source: ConstructionError,
    },

    #[error("入出力エラー: {0}")]
    Io(#[from] std::io::Error),
}

impl BenchmarkError {
    pub fn configuration(config: &'static str, message: impl Into<String>) -> Self {
        Self::Configuration {
            config,
            message: message.into(),
        }
    }

    pub fn construction(label: &'static str, source: ConstructionError) -> Self {
        Self::Construction { label, source }
    }

    /// エラーの重要度を取得
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Configuration { .. } => ErrorSeverity::High,
            Self::Construction { source, .. } => source.severity(),
            Self::Io(error) if error.kind() == std::io::ErrorKind::BrokenPipe => {
                ErrorSeverity::Low
            }
            Self::Io(_) => ErrorSeverity::Medium,
        }
    }
}

/// エラーの重要度レベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// 低重要度 - ログ出力程度
    Low,
    /// 中重要度 - 警告レベル
    Medium,
    /// 高重要度 - 要対応
    High,
    /// 致命的 - システム停止レベル
    Critical,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// インスタンス生成の結果型
pub type BuildResult<T> = std::result::Result<T, ConstructionError>;

/// ベンチマーク実行の結果型
pub type BenchResult<T> = std::result::Result<T, BenchmarkError>;
