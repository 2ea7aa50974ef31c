//! 型メタデータ - リフレクションの代替
//!
//! Rustには実行時リフレクションがないため、型が自身のコンストラクタ情報を
//! `Constructible` トレイトで明示的に公開する：
//! - TypeDescriptor: 型名と TypeId の組
//! - TypeInfo: 型が持つコンストラクタの一覧
//! - ConstructorInfo: 引数シグネチャと呼び出し口を持つコンストラクタハンドル

pub mod sample;

pub use sample::SampleRecord;

use crate::core::{BuildResult, ConstructionError};
use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// 型消去された引数なし生成関数
pub type ErasedConstructor = Box<dyn Fn() -> BuildResult<Box<dyn Any>> + Send + Sync>;

/// 型の識別情報
///
/// 同一性は `TypeId` のみで判定する。`Constructible` 型から作られた場合は
/// 引数なしコンストラクタを型消去して解決できる
#[derive(Clone, Copy)]
pub struct TypeDescriptor {
    name: &'static str,
    id: TypeId,
    resolve: fn() -> Option<ErasedConstructor>,
}

impl TypeDescriptor {
    /// 任意の型の識別情報を作成
    pub fn new<T: 'static>(name: &'static str) -> Self {
        Self {
            name,
            id: TypeId::of::<T>(),
            resolve: || None,
        }
    }

    /// `Constructible` 型の識別情報を取得
    pub fn of<T: Constructible>() -> Self {
        Self {
            name: T::TYPE_NAME,
            id: TypeId::of::<T>(),
            resolve: erase_parameterless::<T>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn is<T: 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    /// 引数なしコンストラクタを型消去して取得
    pub fn parameterless_constructor(&self) -> Option<ErasedConstructor> {
        (self.resolve)()
    }
}

fn erase_parameterless<T: Constructible>() -> Option<ErasedConstructor> {
    let info = T::type_info();
    let constructor: ErasedConstructor = match info.parameterless_constructor()?.invoker() {
        Invoker::Nullary(construct) => Box::new(move || Ok(Box::new(construct()) as Box<dyn Any>)),
        Invoker::Parameterized(construct) => {
            Box::new(move || construct(&[]).map(|value| Box::new(value) as Box<dyn Any>))
        }
    };
    Some(constructor)
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeDescriptor {}

impl Hash for TypeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("id", &self.id)
            .finish()
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// コンストラクタ引数の情報
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterInfo {
    pub name: &'static str,
    pub ty: TypeDescriptor,
}

impl ParameterInfo {
    pub fn new<A: 'static>(name: &'static str, type_name: &'static str) -> Self {
        Self {
            name,
            ty: TypeDescriptor::new::<A>(type_name),
        }
    }
}

/// コンストラクタ本体の呼び出し口
pub enum Invoker<T> {
    /// 引数なし・失敗しない生成関数
    Nullary(fn() -> T),
    /// 型消去された引数列を受け取る生成関数
    Parameterized(fn(&[&dyn Any]) -> BuildResult<T>),
}

impl<T> Clone for Invoker<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Invoker<T> {}

impl<T> fmt::Debug for Invoker<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nullary(_) => f.write_str("Invoker::Nullary"),
            Self::Parameterized(_) => f.write_str("Invoker::Parameterized"),
        }
    }
}

/// コンストラクタハンドル
#[derive(Debug)]
pub struct ConstructorInfo<T> {
    declaring_type: TypeDescriptor,
    parameters: Vec<ParameterInfo>,
    invoker: Invoker<T>,
}

impl<T> Clone for ConstructorInfo<T> {
    fn clone(&self) -> Self {
        Self {
            declaring_type: self.declaring_type,
            parameters: self.parameters.clone(),
            invoker: self.invoker,
        }
    }
}

impl<T: Constructible> ConstructorInfo<T> {
    /// 引数なしコンストラクタ
    pub fn nullary(constructor: fn() -> T) -> Self {
        Self {
            declaring_type: TypeDescriptor::of::<T>(),
            parameters: Vec::new(),
            invoker: Invoker::Nullary(constructor),
        }
    }

    /// 引数付きコンストラクタ
    pub fn parameterized(
        parameters: Vec<ParameterInfo>,
        constructor: fn(&[&dyn Any]) -> BuildResult<T>,
    ) -> Self {
        Self {
            declaring_type: TypeDescriptor::of::<T>(),
            parameters,
            invoker: Invoker::Parameterized(constructor),
        }
    }
}

impl<T> ConstructorInfo<T> {
    pub fn declaring_type(&self) -> TypeDescriptor {
        self.declaring_type
    }

    pub fn parameters(&self) -> &[ParameterInfo] {
        &self.parameters
    }

    pub fn is_parameterless(&self) -> bool {
        self.parameters.is_empty()
    }

    pub fn invoker(&self) -> Invoker<T> {
        self.invoker
    }

    /// 引数の数と型を検証した上でコンストラクタを呼び出す
    ///
    /// 毎回の検証と型消去された引数列の受け渡しが呼び出しごとの固定コストになる
    pub fn invoke(&self, args: &[&dyn Any]) -> BuildResult<T> {
        let type_name = self.declaring_type.name();
        if args.len() != self.parameters.len() {
            return Err(ConstructionError::arity_mismatch(
                type_name,
                self.parameters.len(),
                args.len(),
            ));
        }

        for (index, (arg, parameter)) in args.iter().zip(&self.parameters).enumerate() {
            if (**arg).type_id() != parameter.ty.id() {
                return Err(ConstructionError::argument_type_mismatch(
                    type_name,
                    index,
                    parameter.ty.name(),
                ));
            }
        }

        match self.invoker {
            Invoker::Nullary(constructor) => Ok(constructor()),
            Invoker::Parameterized(constructor) => constructor(args),
        }
    }
}

/// 型が公開するコンストラクタ一覧
#[derive(Debug, Clone)]
pub struct TypeInfo<T> {
    descriptor: TypeDescriptor,
    constructors: Vec<ConstructorInfo<T>>,
}

impl<T: Constructible> TypeInfo<T> {
    /// コンストラクタを持たない型情報
    pub fn new() -> Self {
        Self {
            descriptor: TypeDescriptor::of::<T>(),
            constructors: Vec::new(),
        }
    }
}

impl<T: Constructible> Default for TypeInfo<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TypeInfo<T> {
    pub fn with_constructor(mut self, constructor: ConstructorInfo<T>) -> Self {
        self.constructors.push(constructor);
        self
    }

    pub fn descriptor(&self) -> TypeDescriptor {
        self.descriptor
    }

    pub fn constructors(&self) -> &[ConstructorInfo<T>] {
        &self.constructors
    }

    /// 引数の型列が完全に一致するコンストラクタを検索
    pub fn constructor(&self, signature: &[TypeId]) -> Option<&ConstructorInfo<T>> {
        self.constructors.iter().find(|constructor| {
            constructor.parameters.len() == signature.len()
                && constructor
                    .parameters
                    .iter()
                    .zip(signature)
                    .all(|(parameter, id)| parameter.ty.id() == *id)
        })
    }

    /// 引数なしコンストラクタを検索
    pub fn parameterless_constructor(&self) -> Option<&ConstructorInfo<T>> {
        self.constructor(&[])
    }
}

/// 実行時にコンストラクタ情報を公開する型
pub trait Constructible: Sized + 'static {
    /// 型名
    const TYPE_NAME: &'static str;

    /// コンストラクタ情報を取得（呼び出すたびに組み立てられる）
    fn type_info() -> TypeInfo<Self>;
}
