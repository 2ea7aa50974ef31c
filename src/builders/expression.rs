//! 式ツリー方式
//!
//! 「T を確保して引数なしで構築する」式ツリーを組み立て、一度だけクロージャへ
//! コンパイルしてキャッシュする。コンストラクタの解決はコンパイル時に行われる。

use super::SetupCounter;
use crate::core::{BuildResult, ConstructionError, InstanceBuilder, Strategy};
use crate::metadata::{Constructible, Invoker, TypeDescriptor};
use once_cell::sync::OnceCell;
use std::marker::PhantomData;
use tracing::debug;

/// コンパイル済みの生成関数
pub type CompiledFn<T> = Box<dyn Fn() -> BuildResult<T> + Send + Sync>;

/// 値を捨てて副作用だけを残したブロック内の式
type Effect = Box<dyn Fn() -> BuildResult<()> + Send + Sync>;

/// 式ノード
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// 引数なしコンストラクタによるインスタンス生成
    New(TypeDescriptor),
    /// 式を順に評価し、最後の式の値を返すブロック
    Block { ty: TypeDescriptor, body: Vec<Expr> },
}

impl Expr {
    pub fn new_object(ty: TypeDescriptor) -> Self {
        Self::New(ty)
    }

    pub fn block(ty: TypeDescriptor, body: Vec<Expr>) -> Self {
        Self::Block { ty, body }
    }

    /// 式の型
    pub fn ty(&self) -> TypeDescriptor {
        match self {
            Self::New(ty) | Self::Block { ty, .. } => *ty,
        }
    }
}

/// 引数なしで T を返すラムダ式
#[derive(Debug, Clone)]
pub struct Lambda<T> {
    body: Expr,
    _returns: PhantomData<fn() -> T>,
}

impl<T: Constructible> Lambda<T> {
    pub fn new(body: Expr) -> Self {
        Self {
            body,
            _returns: PhantomData,
        }
    }

    pub fn body(&self) -> &Expr {
        &self.body
    }

    /// 式ツリーを検証し、呼び出し可能な関数へコンパイル
    pub fn compile(&self) -> BuildResult<CompiledFn<T>> {
        Self::lower(&self.body)
    }

    fn lower(expr: &Expr) -> BuildResult<CompiledFn<T>> {
        let expected = TypeDescriptor::of::<T>();
        if expr.ty() != expected {
            return Err(ConstructionError::type_mismatch(
                expected.name(),
                expr.ty().name(),
            ));
        }

        match expr {
            Expr::New(_) => Self::lower_new(),
            Expr::Block { ty, body } => {
                let Some((last, prefix)) = body.split_last() else {
                    return Err(ConstructionError::empty_block(ty.name()));
                };
                let last = Self::lower(last)?;
                if prefix.is_empty() {
                    return Ok(last);
                }

                let prefix = prefix
                    .iter()
                    .map(lower_effect)
                    .collect::<BuildResult<Vec<_>>>()?;
                let block: CompiledFn<T> = Box::new(move || {
                    for expr in &prefix {
                        expr()?;
                    }
                    last()
                });
                Ok(block)
            }
        }
    }

    fn lower_new() -> BuildResult<CompiledFn<T>> {
        let info = T::type_info();
        let constructor = info
            .parameterless_constructor()
            .ok_or_else(|| ConstructionError::constructor_not_found(T::TYPE_NAME))?;

        let construct: CompiledFn<T> = match constructor.invoker() {
            Invoker::Nullary(construct) => Box::new(move || Ok(construct())),
            Invoker::Parameterized(construct) => Box::new(move || construct(&[])),
        };
        Ok(construct)
    }
}

/// 末尾以外のブロック要素を型を問わずにコンパイルする
fn lower_effect(expr: &Expr) -> BuildResult<Effect> {
    match expr {
        Expr::New(ty) => {
            let construct = ty
                .parameterless_constructor()
                .ok_or_else(|| ConstructionError::constructor_not_found(ty.name()))?;
            let effect: Effect = Box::new(move || construct().map(drop));
            Ok(effect)
        }
        Expr::Block { ty, body } => {
            let Some(last) = body.last() else {
                return Err(ConstructionError::empty_block(ty.name()));
            };
            if last.ty() != *ty {
                return Err(ConstructionError::type_mismatch(ty.name(), last.ty().name()));
            }

            let effects = body
                .iter()
                .map(lower_effect)
                .collect::<BuildResult<Vec<_>>>()?;
            let block: Effect = Box::new(move || {
                for effect in &effects {
                    effect()?;
                }
                Ok(())
            });
            Ok(block)
        }
    }
}

/// 式ツリー方式のビルダー
pub struct ExpressionBuilder<T> {
    compiled: OnceCell<CompiledFn<T>>,
    setups: SetupCounter,
}

impl<T> ExpressionBuilder<T> {
    pub const fn new() -> Self {
        Self {
            compiled: OnceCell::new(),
            setups: SetupCounter::new(),
        }
    }
}

impl<T> Default for ExpressionBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Constructible> ExpressionBuilder<T> {
    /// `T` を生成するだけのブロックを持つラムダ式を組み立てる
    pub fn synthesize() -> Lambda<T> {
        let ty = TypeDescriptor::of::<T>();
        Lambda::new(Expr::block(ty, vec![Expr::new_object(ty)]))
    }

    fn compiled(&self) -> BuildResult<&CompiledFn<T>> {
        self.compiled.get_or_try_init(|| {
            let compiled = Self::synthesize().compile()?;
            self.setups.record();
            debug!(type_name = T::TYPE_NAME, "expression compiled");
            Ok(compiled)
        })
    }
}

impl<T: Constructible> InstanceBuilder<T> for ExpressionBuilder<T> {
    fn strategy(&self) -> Strategy {
        Strategy::Expression
    }

    fn build(&self) -> BuildResult<T> {
        let construct = self.compiled()?;
        construct()
    }

    fn setup_count(&self) -> usize {
        self.setups.get()
    }
}
