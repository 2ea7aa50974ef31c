// 3方式のビルダーに共通する振る舞いの統合テスト
use create_object_bench::{
    metadata::{ConstructorInfo, ParameterInfo, TypeInfo},
    BuildResult, Constructible, ConstructionError, EmitBuilder, ExpressionBuilder,
    InstanceBuilder, ReflectionBuilder, SampleRecord, Strategy, TypeDescriptor,
};
use std::any::Any;

/// 引数付きコンストラクタしか持たない型
#[derive(Debug)]
struct NamedOnly {
    name: String,
}

impl Constructible for NamedOnly {
    const TYPE_NAME: &'static str = "NamedOnly";

    fn type_info() -> TypeInfo<Self> {
        TypeInfo::new().with_constructor(ConstructorInfo::parameterized(
            vec![ParameterInfo::new::<String>("name", "String")],
            construct_named,
        ))
    }
}

fn construct_named(args: &[&dyn Any]) -> BuildResult<NamedOnly> {
    args.first()
        .and_then(|arg| arg.downcast_ref::<String>())
        .map(|name| NamedOnly { name: name.clone() })
        .ok_or_else(|| ConstructionError::argument_type_mismatch("NamedOnly", 0, "String"))
}

fn all_builders() -> Vec<Box<dyn InstanceBuilder<SampleRecord>>> {
    vec![
        Box::new(ExpressionBuilder::<SampleRecord>::new()),
        Box::new(EmitBuilder::<SampleRecord>::new()),
        Box::new(ReflectionBuilder::<SampleRecord>::new()),
    ]
}

fn assert_constructor_not_found<B: InstanceBuilder<NamedOnly>>(builder: B) {
    for _ in 0..3 {
        match builder.build() {
            Err(ConstructionError::ConstructorNotFound { type_name }) => {
                assert_eq!(type_name, "NamedOnly");
            }
            Err(other) => panic!("{}: unexpected error {other}", builder.label()),
            Ok(instance) => panic!("{}: built {instance:?}", builder.label()),
        }
    }
    assert_eq!(builder.setup_count(), 0, "{}", builder.label());
    assert!(!builder.is_prepared());
}

#[test]
fn test_each_call_returns_a_fresh_default_instance() {
    for builder in all_builders() {
        let first = builder.build();
        let second = builder.build();

        let (Ok(mut first), Ok(second)) = (first, second) else {
            panic!("{} failed to build", builder.label());
        };
        assert_eq!(first, SampleRecord::default());
        assert_eq!(second, SampleRecord::default());

        first.test_prop = Some("changed".to_string());
        assert!(second.test_prop.is_none(), "{}", builder.label());
    }
}

#[test]
fn test_boxed_instances_have_distinct_addresses() {
    for builder in all_builders() {
        let instances: Vec<Box<SampleRecord>> = (0..4)
            .map(|_| builder.build().map(Box::new))
            .collect::<Result<_, _>>()
            .unwrap_or_default();
        assert_eq!(instances.len(), 4, "{}", builder.label());

        for (i, a) in instances.iter().enumerate() {
            for b in instances.iter().skip(i + 1) {
                assert!(!std::ptr::eq(a.as_ref(), b.as_ref()));
            }
        }
    }
}

#[test]
fn test_setup_runs_exactly_once() {
    for n in [1_usize, 2, 100] {
        for builder in all_builders() {
            assert_eq!(builder.setup_count(), 0);
            for _ in 0..n {
                assert!(builder.build().is_ok());
            }
            assert_eq!(builder.setup_count(), 1, "{} after {n} calls", builder.label());
        }
    }
}

#[test]
fn test_missing_parameterless_constructor_is_an_error() {
    assert_constructor_not_found(ExpressionBuilder::<NamedOnly>::new());
    assert_constructor_not_found(EmitBuilder::<NamedOnly>::new());
    assert_constructor_not_found(ReflectionBuilder::<NamedOnly>::new());
}

#[test]
fn test_named_only_is_still_reflectively_constructible_with_arguments() {
    let info = NamedOnly::type_info();
    let name = String::from("widget");

    let built = info
        .constructor(&[std::any::TypeId::of::<String>()])
        .map(|constructor| constructor.invoke(&[&name]));

    match built {
        Some(Ok(instance)) => assert_eq!(instance.name, "widget"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_strategies_are_structurally_equivalent() {
    let results: Vec<(Strategy, SampleRecord)> = all_builders()
        .iter()
        .filter_map(|builder| builder.build().ok().map(|r| (builder.strategy(), r)))
        .collect();

    assert_eq!(results.len(), 3);
    let strategies: Vec<_> = results.iter().map(|(strategy, _)| *strategy).collect();
    assert_eq!(strategies, Strategy::ALL.to_vec());

    let descriptor = TypeDescriptor::of::<SampleRecord>();
    assert_ne!(descriptor.id(), TypeDescriptor::of::<NamedOnly>().id());
    for (strategy, record) in &results {
        let erased: &dyn Any = record;
        assert_eq!(erased.type_id(), descriptor.id(), "{}", strategy.label());
        assert_eq!(record, &results[0].1);
    }
}

#[test]
fn test_end_to_end_test_prop_is_unset() {
    let expression = ExpressionBuilder::<SampleRecord>::new();
    let emit = EmitBuilder::<SampleRecord>::new();
    let reflection = ReflectionBuilder::<SampleRecord>::new();

    for built in [expression.build(), emit.build(), reflection.build()] {
        assert!(matches!(built, Ok(SampleRecord { test_prop: None })));
    }
}

#[test]
fn test_builders_work_as_statics() {
    static EXPRESSION: ExpressionBuilder<SampleRecord> = ExpressionBuilder::new();
    static EMIT: EmitBuilder<SampleRecord> = EmitBuilder::new();
    static REFLECTION: ReflectionBuilder<SampleRecord> = ReflectionBuilder::new();

    for _ in 0..10 {
        assert!(EXPRESSION.build().is_ok());
        assert!(EMIT.build().is_ok());
        assert!(REFLECTION.build().is_ok());
    }

    assert_eq!(EXPRESSION.setup_count(), 1);
    assert_eq!(EMIT.setup_count(), 1);
    assert_eq!(REFLECTION.setup_count(), 1);
}
