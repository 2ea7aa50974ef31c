//! リフレクション方式
//!
//! 引数なしコンストラクタのハンドルだけをキャッシュし、毎回
//! `ConstructorInfo::invoke` の検証付き呼び出し経路を通して生成する。

use super::SetupCounter;
use crate::core::{BuildResult, ConstructionError, InstanceBuilder, Strategy};
use crate::metadata::{Constructible, ConstructorInfo};
use once_cell::sync::OnceCell;
use tracing::debug;

/// リフレクション方式のビルダー
pub struct ReflectionBuilder<T> {
    handle: OnceCell<ConstructorInfo<T>>,
    setups: SetupCounter,
}

impl<T> ReflectionBuilder<T> {
    pub const fn new() -> Self {
        Self {
            handle: OnceCell::new(),
            setups: SetupCounter::new(),
        }
    }
}

impl<T> Default for ReflectionBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Constructible> ReflectionBuilder<T> {
    fn handle(&self) -> BuildResult<&ConstructorInfo<T>> {
        self.handle.get_or_try_init(|| {
            let handle = T::type_info()
                .parameterless_constructor()
                .cloned()
                .ok_or_else(|| ConstructionError::constructor_not_found(T::TYPE_NAME))?;
            self.setups.record();
            debug!(type_name = T::TYPE_NAME, "constructor handle cached");
            Ok(handle)
        })
    }
}

impl<T: Constructible> InstanceBuilder<T> for ReflectionBuilder<T> {
    fn strategy(&self) -> Strategy {
        Strategy::Reflection
    }

    fn build(&self) -> BuildResult<T> {
        self.handle()?.invoke(&[])
    }

    fn setup_count(&self) -> usize {
        self.setups.get()
    }
}
