// 計測ハーネスとスイートの統合テスト
use create_object_bench::{
    benchmarks::{construct_many, Benchmark, BenchmarkSuite, CollectingReporter},
    core::MockResultReporter,
    BenchmarkConfig, EmitBuilder, ExpressionBuilder, InstanceBuilder, ReflectionBuilder,
    SampleRecord, TestingConfig,
};
use mockall::Sequence;
use std::io::Cursor;
use std::time::Duration;

/// `^{label} elapsed \d+ ms$` に一致するかどうか
fn matches_output_format(line: &str, label: &str) -> bool {
    let Some(rest) = line.strip_prefix(label) else {
        return false;
    };
    let Some(millis) = rest
        .strip_prefix(" elapsed ")
        .and_then(|rest| rest.strip_suffix(" ms"))
    else {
        return false;
    };
    !millis.is_empty() && millis.bytes().all(|b| b.is_ascii_digit())
}

#[test]
fn test_zero_cost_operation_output_format() {
    let benchmark = Benchmark::new(CollectingReporter::new());

    let result = benchmark.run(|| Ok(()), "X");

    assert!(result.is_ok());
    let lines = benchmark.reporter().lines();
    assert_eq!(lines.len(), 1);
    assert!(matches_output_format(&lines[0], "X"), "{}", lines[0]);
}

#[test]
fn test_elapsed_time_covers_the_operation() {
    let benchmark = Benchmark::new(CollectingReporter::new());

    let result = benchmark.run(
        || {
            std::thread::sleep(Duration::from_millis(5));
            Ok(())
        },
        "sleep",
    );

    match result {
        Ok(result) => {
            assert!(result.elapsed >= Duration::from_millis(5));
            assert!(result.elapsed_millis() >= 5);
        }
        Err(error) => panic!("operation should succeed: {error}"),
    }
}

#[test]
fn test_suite_prints_nine_lines_in_fixed_order() {
    let Ok(suite) = BenchmarkSuite::<TestingConfig, _>::new(CollectingReporter::new()) else {
        panic!("testing config must be valid");
    };
    let expression = ExpressionBuilder::<SampleRecord>::new();
    let emit = EmitBuilder::<SampleRecord>::new();
    let reflection = ReflectionBuilder::<SampleRecord>::new();

    let results = suite.run(&expression, &emit, &reflection);

    assert!(results.is_ok());
    let lines = suite.reporter().lines();
    assert_eq!(lines.len(), 9);

    let expected = ["Linq", "Emit", "Reflection"];
    for (index, line) in lines.iter().enumerate() {
        let label = expected[index % expected.len()];
        assert!(matches_output_format(line, label), "line {index}: {line}");
    }

    // 準備処理は最初のラウンドでのみ行われる
    assert_eq!(expression.setup_count(), 1);
    assert_eq!(emit.setup_count(), 1);
    assert_eq!(reflection.setup_count(), 1);
}

#[test]
fn test_suite_reports_through_the_reporter_seam() {
    let mut reporter = MockResultReporter::new();
    let mut sequence = Sequence::new();
    for _ in 0..TestingConfig::ROUNDS {
        for label in ["Linq", "Emit", "Reflection"] {
            reporter
                .expect_report()
                .withf(move |result| result.label == label)
                .times(1)
                .in_sequence(&mut sequence)
                .returning(|_| Ok(()));
        }
    }

    let Ok(suite) = BenchmarkSuite::<TestingConfig, _>::new(reporter) else {
        panic!("testing config must be valid");
    };
    let results = suite.run(
        &ExpressionBuilder::<SampleRecord>::new(),
        &EmitBuilder::new(),
        &ReflectionBuilder::new(),
    );

    assert!(results.is_ok());
}

#[test]
fn test_construct_many_runs_warm_builders() {
    let builder = EmitBuilder::<SampleRecord>::new();

    assert!(construct_many::<SampleRecord, _>(&builder, 10_000).is_ok());
    assert_eq!(builder.setup_count(), 1);
}

#[test]
fn test_testing_config_does_not_wait_for_input() {
    let Ok(suite) = BenchmarkSuite::<TestingConfig, _>::new(CollectingReporter::new()) else {
        panic!("testing config must be valid");
    };
    let mut input = Cursor::new("");

    assert!(suite.wait_for_exit(&mut input).is_ok());
}
