//! 运行一个小型示例套件并输出 XML 报告
//!
//! cargo run --example sample_suite -- --name demo -p env=local -o target/demo-report.xml

use std::io::Write;
use std::process::ExitCode;
use xmltest::{ExceptionInfo, SuiteRunner, TestIdentity, TestProgram};

fn main() -> anyhow::Result<ExitCode> {
    let mut suite = SuiteRunner::new();

    suite
        .add(
            TestIdentity::new("demo.math", "ArithmeticTest", "test_addition"),
            |streams| {
                streams.stdout.write("computing 2 + 2\n");
                if 2 + 2 == 4 {
                    Ok(())
                } else {
                    Err(ExceptionInfo::assertion("2 + 2 != 4"))
                }
            },
        )
        .add(
            TestIdentity::new("demo.math", "ArithmeticTest", "test_division_message"),
            |streams| {
                let mut err = streams.stderr.clone();
                writeln!(err, "dividing by {}", 3).ok();
                let expected = "0.33";
                let actual = format!("{:.3}", 1.0 / 3.0);
                if actual == expected {
                    Ok(())
                } else {
                    Err(ExceptionInfo::assertion(format!("{actual} != {expected}")))
                }
            },
        )
        .add(
            TestIdentity::new("demo.io", "ParserTest", "test_unexpected_panic"),
            |streams| {
                streams.stdout.write(b"raw bytes \xff kept\n");
                let values: Vec<u32> = Vec::new();
                let first = values.first().copied().unwrap_or_else(|| panic!("empty input <none>"));
                streams.stdout.write(format!("first = {first}\n"));
                Ok(())
            },
        );

    TestProgram::from_env().run(&mut suite)
}
