mod common;

use common::run_in_memory;
use std::fs;
use tempfile::TempDir;
use xmltest::runner::ConsoleReporter;
use xmltest::{
    ExceptionInfo, ExecutorConfig, OutputSink, SuiteRunner, TestIdentity, TestStatus,
    XmlTestExecutor,
};

fn passing_suite() -> SuiteRunner {
    SuiteRunner::new()
        .with_case(TestIdentity::new("m", "A", "test_one"), |_| Ok(()))
        .with_case(TestIdentity::new("m", "A", "test_two"), |s| {
            s.stdout.write("two\n");
            Ok(())
        })
}

#[test]
fn test_report_written_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("reports").join("junit.xml");

    let config = ExecutorConfig::default()
        .with_report_name("file run")
        .with_output(OutputSink::File(path.clone()));
    let mut executor = XmlTestExecutor::new(config).with_reporter(ConsoleReporter::new(false));
    let result = executor.run(&mut passing_suite()).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written, result.report);
    assert!(written.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
    assert!(written.contains(r#"name="file run" tests="2""#));
}

#[test]
fn test_unwritable_sink_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    // 目录不能作为文件写入
    let config = ExecutorConfig::default().with_output(OutputSink::File(temp_dir.path().to_path_buf()));
    let mut executor = XmlTestExecutor::new(config).with_reporter(ConsoleReporter::new(false));

    let err = executor.run(&mut passing_suite()).unwrap_err();
    assert!(matches!(err, xmltest::XmlTestError::IoError(_)));
}

#[test]
fn test_run_result_success() {
    let (result, _) = run_in_memory(ExecutorConfig::default(), &mut passing_suite());
    assert!(result.was_successful());
    assert_eq!(result.summary().total(), 2);
    assert_eq!(result.records()[1].stdout, "two\n");

    let mut failing = passing_suite().with_case(TestIdentity::new("m", "A", "test_bad"), |_| {
        Err(ExceptionInfo::assertion("bad"))
    });
    let (result, _) = run_in_memory(ExecutorConfig::default(), &mut failing);
    assert!(!result.was_successful());
    assert_eq!(result.records()[2].status, TestStatus::Failed);
}

#[test]
fn test_total_elapsed_covers_tests() {
    let mut suite = SuiteRunner::new().with_case(TestIdentity::new("m", "Slow", "test_sleep"), |_| {
        std::thread::sleep(std::time::Duration::from_millis(20));
        Ok(())
    });

    let (result, _) = run_in_memory(ExecutorConfig::default(), &mut suite);
    let record = &result.records()[0];
    assert!(record.elapsed >= std::time::Duration::from_millis(20));
    assert!(result.elapsed >= record.elapsed);
}
