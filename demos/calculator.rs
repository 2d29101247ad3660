//! A small calculator suite, run with log output.
//!
//! `RUST_LOG=kispec=debug cargo run --example calculator` shows every example.

use std::process::ExitCode;

use kispec::{Flags, Spec, reporter::LogReporter};
use tracing_subscriber::EnvFilter;

fn add(a: i64, b: i64) -> i64 {
    a + b
}

fn sub(a: i64, b: i64) -> i64 {
    a - b
}

fn div(a: i64, b: i64) -> Result<i64, String> {
    match b {
        0 => Err("division by zero".to_string()),
        b => Ok(a / b),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut spec = Spec::new();
    spec.configure(|config| {
        config
            .exclude(|example| example.is_flagged("slow"))
            .before_suite(|| tracing::info!("warming up the calculator"))
            .after_suite(|| tracing::info!("calculator shut down"));
    });

    spec.describe("calc", |calc| {
        calc.it("adds", || assert_eq!(add(2, 3), 5));
        calc.context("neg", |neg| {
            neg.it("subtracts", || assert_eq!(sub(2, 3), -1));
            neg.pending("multiplies");
        });
        calc.context("div", |div_group| {
            div_group.it("divides", || div(6, 3).map(|q| assert_eq!(q, 2)));
            div_group.it("rejects zero", || match div(1, 0) {
                Err(_) => Ok(()),
                Ok(q) => Err(format!("expected an error, got {q}")),
            });
        });
        calc.describe_with("big numbers", Flags::new().with("slow", true), |big| {
            big.it("adds many", || {
                let sum = (0..1_000_000).fold(0, add);
                assert_eq!(sum, 499_999_500_000);
            });
        });
    });

    let suite = match spec.build() {
        Ok(suite) => suite,
        Err(error) => {
            tracing::error!(%error, "could not build the suite");
            return ExitCode::FAILURE;
        }
    };
    suite.harness().with_reporter(LogReporter).run().exit_code()
}
