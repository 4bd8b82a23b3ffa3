use crate::report::{ReportProperty, RunSummary, TestIdentity, TestStatus};
use chrono::{DateTime, Local};
use colored::Colorize;
use std::time::Duration;

/// 控制台诊断输出（stderr）
#[derive(Debug, Clone, Copy)]
pub struct ConsoleReporter {
    color: bool,
}

impl ConsoleReporter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// 打印启动横幅
    pub fn print_banner(&self, name: &str, properties: &[ReportProperty], started: DateTime<Local>) {
        eprint!("{}", self.format_banner(name, properties, started));
    }

    /// 打印单个测试的跟踪行
    pub fn print_trace(&self, status: TestStatus, test: &TestIdentity) {
        eprintln!("{}", self.format_trace(status, test));
    }

    /// 打印运行统计
    pub fn print_statistics(&self, summary: &RunSummary, runtime: Duration) {
        eprint!("{}", self.format_statistics(summary, runtime));
    }

    pub fn format_banner(
        &self,
        name: &str,
        properties: &[ReportProperty],
        started: DateTime<Local>,
    ) -> String {
        let rule = "=".repeat(30);
        let mut lines = vec![String::new(), String::new(), rule.clone()];
        lines.push(format!(
            "Version: XMLTestExecutor v{}",
            env!("CARGO_PKG_VERSION")
        ));
        lines.push(format!("Report name: {}", self.bold(name)));
        for property in properties {
            lines.push(format!(
                "Property: {} - Value: {}",
                property.name, property.value
            ));
        }
        lines.push(format!(
            "Start time: {}",
            started.format("%Y-%m-%d %H:%M:%S%.6f")
        ));
        lines.push(rule);
        lines.push(String::new());
        lines.join("\n") + "\n"
    }

    pub fn format_trace(&self, status: TestStatus, test: &TestIdentity) -> String {
        let tag = status.tag();
        let tag = if self.color {
            match status {
                TestStatus::Passed => tag.green().to_string(),
                TestStatus::Failed => tag.red().to_string(),
                TestStatus::Error => tag.red().bold().to_string(),
            }
        } else {
            tag.to_string()
        };
        format!("{} {}", tag, test)
    }

    pub fn format_statistics(&self, summary: &RunSummary, runtime: Duration) -> String {
        let mut lines = vec![
            String::new(),
            String::new(),
            "======= run statistics =======".to_string(),
        ];

        let passed = summary.passed.to_string();
        let failed = summary.failed.to_string();
        let errors = summary.errors.to_string();
        if self.color {
            lines.push(format!("Tests passed:  {}", passed.green()));
            lines.push(format!("Tests failed:  {}", failed.red()));
            lines.push(format!("Tests errors:  {}", errors.red()));
        } else {
            lines.push(format!("Tests passed:  {}", passed));
            lines.push(format!("Tests failed:  {}", failed));
            lines.push(format!("Tests errors:  {}", errors));
        }
        lines.push(format!("Total tests:   {}", summary.total()));
        lines.push(String::new());
        lines.push(format!("Total runtime: {:.3}s", runtime.as_secs_f64()));
        lines.push("=".repeat(30));
        lines.join("\n") + "\n"
    }

    fn bold(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_banner_lists_properties() {
        let reporter = ConsoleReporter::new(false);
        let started = Local.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let banner = reporter.format_banner(
            "nightly",
            &[
                ReportProperty::new("env", "staging"),
                ReportProperty::new("build", "42"),
            ],
            started,
        );

        assert!(banner.contains(&format!("Version: XMLTestExecutor v{}", env!("CARGO_PKG_VERSION"))));
        assert!(banner.contains("Report name: nightly\n"));
        assert!(banner.contains("Property: env - Value: staging\nProperty: build - Value: 42\n"));
        assert!(banner.contains("Start time: 2024-05-01 12:30:00"));
    }

    #[test]
    fn test_trace_tags() {
        let reporter = ConsoleReporter::new(false);
        let test = TestIdentity::new("m", "C", "test_x");
        assert_eq!(reporter.format_trace(TestStatus::Passed, &test), "[OK] test_x (m.C)");
        assert_eq!(reporter.format_trace(TestStatus::Failed, &test), "[F] test_x (m.C)");
        assert_eq!(reporter.format_trace(TestStatus::Error, &test), "[E] test_x (m.C)");
    }

    #[test]
    fn test_statistics() {
        let reporter = ConsoleReporter::new(false);
        let summary = RunSummary {
            passed: 3,
            failed: 1,
            errors: 2,
        };
        let stats = reporter.format_statistics(&summary, Duration::from_millis(1250));
        assert!(stats.contains("Tests passed:  3\n"));
        assert!(stats.contains("Tests failed:  1\n"));
        assert!(stats.contains("Tests errors:  2\n"));
        assert!(stats.contains("Total tests:   6\n"));
        assert!(stats.contains("Total runtime: 1.250s\n"));
    }
}
