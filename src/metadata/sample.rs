//! ベンチマーク対象の型

use super::{Constructible, ConstructorInfo, ParameterInfo, TypeInfo};
use crate::core::ConstructionError;

/// 文字列フィールドを1つだけ持つレコード
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleRecord {
    pub test_prop: Option<String>,
}

impl SampleRecord {
    /// 引数なしコンストラクタ - `test_prop` は未設定
    pub fn new() -> Self {
        Self { test_prop: None }
    }

    pub fn with_test_prop(test_prop: impl Into<String>) -> Self {
        Self {
            test_prop: Some(test_prop.into()),
        }
    }
}

impl Constructible for SampleRecord {
    const TYPE_NAME: &'static str = "SampleRecord";

    fn type_info() -> TypeInfo<Self> {
        TypeInfo::new()
            .with_constructor(ConstructorInfo::nullary(SampleRecord::new))
            .with_constructor(ConstructorInfo::parameterized(
                vec![ParameterInfo::new::<String>("test_prop", "String")],
                |args| {
                    args.first()
                        .and_then(|arg| arg.downcast_ref::<String>())
                        .map(|value| SampleRecord::with_test_prop(value.clone()))
                        .ok_or_else(|| {
                            ConstructionError::argument_type_mismatch(
                                Self::TYPE_NAME,
                                0,
                                "String",
                            )
                        })
                },
            ))
    }
}
