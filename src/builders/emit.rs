//! 命令生成方式
//!
//! 引数なしコンストラクタのハンドルを検索し、`NewObj(handle); Ret` という
//! 最小の命令列を生成する。命令列はスタック規律を検証した上で
//! 直接呼び出し可能な `DynamicRoutine` に組み立てられる。

use super::SetupCounter;
use crate::core::{BuildResult, ConstructionError, InstanceBuilder, Strategy};
use crate::metadata::{Constructible, ConstructorInfo, Invoker};
use once_cell::sync::OnceCell;
use std::fmt;
use tracing::debug;

/// 命令
pub enum OpCode<T> {
    /// コンストラクタを呼び出し、生成したオブジェクトをスタックに積む
    NewObj(ConstructorInfo<T>),
    /// スタック最上位の値を返す
    Ret,
}

impl<T> fmt::Debug for OpCode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NewObj(constructor) => {
                write!(f, "newobj {}", constructor.declaring_type().name())
            }
            Self::Ret => f.write_str("ret"),
        }
    }
}

/// 命令列の書き込み先
pub struct RoutineGenerator<T> {
    name: &'static str,
    instructions: Vec<OpCode<T>>,
}

impl<T: Constructible> RoutineGenerator<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            instructions: Vec::new(),
        }
    }

    pub fn emit(&mut self, op: OpCode<T>) -> &mut Self {
        self.instructions.push(op);
        self
    }

    pub fn instructions(&self) -> &[OpCode<T>] {
        &self.instructions
    }

    /// 命令列を検証し、呼び出し可能なルーチンに組み立てる
    ///
    /// 受理されるのは、引数なしコンストラクタを1回呼んで返すだけの命令列
    pub fn finish(self) -> BuildResult<DynamicRoutine<T>> {
        let invalid = |reason: &str| ConstructionError::invalid_program(T::TYPE_NAME, reason);

        let mut stack: Vec<Invoker<T>> = Vec::new();
        let mut returned = None;

        for op in &self.instructions {
            if returned.is_some() {
                return Err(invalid("ret の後に命令があります"));
            }
            match op {
                OpCode::NewObj(constructor) => {
                    if !constructor.is_parameterless() {
                        return Err(invalid(&format!(
                            "newobj に必要な引数 {} 個がスタックにありません",
                            constructor.parameters().len()
                        )));
                    }
                    stack.push(constructor.invoker());
                }
                OpCode::Ret => {
                    let value = stack.pop().ok_or_else(|| invalid("空のスタックから ret"))?;
                    if !stack.is_empty() {
                        return Err(invalid("ret 時にスタックに値が残っています"));
                    }
                    returned = Some(value);
                }
            }
        }

        let entry = returned.ok_or_else(|| invalid("ret で終了していません"))?;
        Ok(DynamicRoutine {
            name: self.name,
            entry,
        })
    }
}

/// 組み立て済みのルーチン
///
/// 検証は組み立て時に済んでいるため、呼び出し時は生成関数を直接呼ぶだけ
pub struct DynamicRoutine<T> {
    name: &'static str,
    entry: Invoker<T>,
}

impl<T> DynamicRoutine<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn invoke(&self) -> BuildResult<T> {
        match self.entry {
            Invoker::Nullary(construct) => Ok(construct()),
            Invoker::Parameterized(construct) => construct(&[]),
        }
    }
}

impl<T> fmt::Debug for DynamicRoutine<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicRoutine")
            .field("name", &self.name)
            .field("entry", &self.entry)
            .finish()
    }
}

/// 命令生成方式のビルダー
pub struct EmitBuilder<T> {
    routine: OnceCell<DynamicRoutine<T>>,
    setups: SetupCounter,
}

impl<T> EmitBuilder<T> {
    pub const fn new() -> Self {
        Self {
            routine: OnceCell::new(),
            setups: SetupCounter::new(),
        }
    }
}

impl<T> Default for EmitBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Constructible> EmitBuilder<T> {
    /// 引数なしコンストラクタのハンドルを検索し、ルーチンを生成
    ///
    /// ハンドルが見つからない場合は命令を生成する前にエラーを返す
    pub fn generate() -> BuildResult<DynamicRoutine<T>> {
        let info = T::type_info();
        let constructor = info
            .parameterless_constructor()
            .cloned()
            .ok_or_else(|| ConstructionError::constructor_not_found(T::TYPE_NAME))?;

        let mut generator = RoutineGenerator::new("CreateInstance");
        generator.emit(OpCode::NewObj(constructor)).emit(OpCode::Ret);
        generator.finish()
    }

    fn routine(&self) -> BuildResult<&DynamicRoutine<T>> {
        self.routine.get_or_try_init(|| {
            let routine = Self::generate()?;
            self.setups.record();
            debug!(
                type_name = T::TYPE_NAME,
                routine = routine.name(),
                "routine generated"
            );
            Ok(routine)
        })
    }
}

impl<T: Constructible> InstanceBuilder<T> for EmitBuilder<T> {
    fn strategy(&self) -> Strategy {
        Strategy::Emit
    }

    fn build(&self) -> BuildResult<T> {
        self.routine()?.invoke()
    }

    fn setup_count(&self) -> usize {
        self.setups.get()
    }
}
