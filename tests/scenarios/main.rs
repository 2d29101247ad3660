use kispec::{
    Flags, Spec, StructuralError,
    filter::Disposition,
    hook::HookScope,
    outcome::{FailureKind, SkipReason},
};
use pretty_assertions::assert_eq;

mod lib;
use lib::{Calls, is_slow, pair, statuses};

fn calc_spec(calls: &Calls) -> Spec {
    let mut spec = Spec::new();
    let (before_suite, after_suite) = (calls.record("before suite"), calls.record("after suite"));
    spec.configure(move |config| {
        config.before_suite(before_suite).after_suite(after_suite);
    });

    let adds = calls.record("adds");
    spec.describe("calc", move |calc| {
        calc.it("adds", move || {
            adds();
            assert_eq!(2 + 3, 5);
        });
    });
    let subtracts = calls.record("subtracts");
    spec.describe("calc", move |calc| {
        calc.context("neg", move |neg| {
            neg.it_with("subtracts", Flags::new().pending(), subtracts);
        });
    });
    spec
}

#[test]
fn calc_adds_and_pending_subtract() {
    let calls = Calls::default();
    let suite = calc_spec(&calls).build().unwrap();
    assert_eq!(suite.examples().count(), 2);

    let report = suite.run();
    assert_eq!(
        statuses(&report),
        [pair("calc adds", "passed"), pair("calc neg subtracts", "skipped: pending")]
    );
    assert_eq!(calls.take(), ["before suite", "adds", "after suite"]);
    assert!(report.is_success());
}

#[test]
fn slow_examples_are_excluded_but_listed() {
    let calls = Calls::default();
    let mut spec = Spec::new();
    spec.configure(|config| {
        config.exclude(is_slow);
    });
    let (fast, slow) = (calls.record("fast path"), calls.record("slow path"));
    spec.describe("calc", move |calc| {
        calc.it("fast path", fast);
        calc.it("slow path", slow);
        calc.it("slowly but surely", || ());
    });
    let suite = spec.build().unwrap();

    let resolved = suite.resolve();
    let slow_path = suite.find("calc slow path").unwrap();
    assert_eq!(
        resolved.disposition(slow_path),
        Some(Disposition::Skipped(SkipReason::Excluded))
    );

    let report = suite.run();
    assert_eq!(
        statuses(&report),
        [
            pair("calc fast path", "passed"),
            pair("calc slow path", "skipped: excluded"),
            pair("calc slowly but surely", "passed"),
        ]
    );
    assert_eq!(calls.take(), ["fast path"]);
}

#[test]
fn hooks_wrap_nested_groups() {
    let calls = Calls::default();
    let mut spec = Spec::new();
    let (global_before, global_after) =
        (calls.record("global before"), calls.record("global after"));
    spec.configure(move |config| {
        config.before_each(global_before).after_each(global_after);
    });

    let c = calls.clone();
    spec.describe("A", move |a| {
        a.before_each(c.record("A before")).after_each(c.record("A after"));
        let c = c.clone();
        a.describe("B", move |b| {
            b.before_each(c.record("B before")).after_each(c.record("B after"));
            let c = c.clone();
            b.describe("C", move |cc| {
                cc.before_each(c.record("C before")).after_each(c.record("C after"));
                cc.it("runs", c.record("body"));
            });
        });
    });
    let suite = spec.build().unwrap();
    let report = suite.run();

    assert!(report.get("A B C runs").unwrap().passed());
    assert_eq!(
        calls.take(),
        [
            "global before",
            "A before",
            "B before",
            "C before",
            "body",
            "C after",
            "B after",
            "A after",
            "global after",
        ]
    );
}

#[test]
fn failing_before_hook_keeps_teardown() {
    let calls = Calls::default();
    let mut spec = Spec::new();
    let c = calls.clone();
    spec.describe("db", move |db| {
        db.before_each(|| Err::<(), _>("connection refused"));
        db.after_each(c.record("disconnect"));
        db.it("queries", c.record("query"));
    });
    let suite = spec.build().unwrap();
    let report = suite.run();

    let outcome = report.get("db queries").unwrap();
    let failure = outcome.failure().unwrap();
    assert_eq!(failure.kind, FailureKind::BeforeHook(HookScope::Group("db".into())));
    assert_eq!(calls.take(), ["disconnect"]);
    assert!(!report.is_success());
}

#[test]
fn example_indices_count_executed_examples() {
    let calls = Calls::default();
    let mut spec = Spec::new();
    let c = calls.clone();
    spec.configure(move |config| {
        let c = c.clone();
        config.before_each_with_metadata(move |metadata| {
            c.push(format!("{} {}", metadata.example_index(), metadata.example().name()))
        });
    });
    spec.describe("list", |list| {
        list.it("a", || ());
        list.pending("b");
        list.context("nested", |nested| {
            nested.it("c", || ());
        });
        list.it("d", || ());
    });
    let suite = spec.build().unwrap();
    let report = suite.run();

    assert_eq!(calls.take(), ["0 list a", "1 list nested c", "2 list d"]);
    let indices: Vec<_> = report.executed().map(|(_, outcome)| outcome.example_index).collect();
    assert_eq!(indices, [Some(0), Some(1), Some(2)]);
}

#[test]
fn focus_wins_over_everything_else() {
    let mut spec = Spec::new();
    spec.describe("api", |api| {
        api.fit("gets", || ());
        api.it("posts", || ());
        api.fcontext("auth", |auth| {
            auth.it("logs in", || ());
            auth.xit("logs out", || ());
        });
    });
    let suite = spec.build().unwrap();
    let report = suite.run();

    assert!(report.focused);
    assert_eq!(
        statuses(&report),
        [
            pair("api gets", "passed"),
            pair("api posts", "skipped: not focused"),
            pair("api auth logs in", "passed"),
            pair("api auth logs out", "skipped: pending"),
        ]
    );
}

#[test]
fn focused_pending_only_runs_nothing_without_fallback() {
    let calls = Calls::default();
    let mut spec = Spec::new();
    spec.configure(|config| {
        config.set_run_all_when_everything_filtered(false);
    });
    let c = calls.clone();
    spec.describe("api", move |api| {
        api.it_with("gets", Flags::new().focused().pending(), c.record("gets"));
        api.it("posts", c.record("posts"));
    });
    let suite = spec.build().unwrap();
    let report = suite.run();

    assert_eq!(report.executed().count(), 0);
    assert!(calls.take().is_empty());
}

#[test]
fn everything_filtered_falls_back_to_all() {
    let mut spec = Spec::new();
    spec.configure(|config| {
        config.include(|example| example.name().contains("nothing matches this"));
    });
    spec.describe("api", |api| {
        api.it("gets", || ());
        api.xit("posts", || ());
    });
    let suite = spec.build().unwrap();
    let report = suite.run();

    assert!(report.fell_back);
    assert_eq!(
        statuses(&report),
        [pair("api gets", "passed"), pair("api posts", "skipped: pending")]
    );
}

#[test]
fn fallback_does_not_run_excluded_examples() {
    let calls = Calls::default();
    let mut spec = Spec::new();
    spec.configure(|config| {
        config.exclude(is_slow);
    });
    let slow = calls.record("slow path");
    spec.describe("calc", move |calc| {
        calc.it("slow path", slow);
    });
    let suite = spec.build().unwrap();
    let report = suite.run();

    assert!(report.fell_back);
    assert_eq!(statuses(&report), [pair("calc slow path", "skipped: excluded")]);
    assert!(calls.take().is_empty());
}

#[test]
fn structural_errors_stop_the_build() {
    let mut spec = Spec::new();
    spec.describe("api", |api| {
        api.it_behaves_like("a resource");
    });
    assert_eq!(
        spec.build().unwrap_err(),
        StructuralError::UnknownSharedExamples("a resource".into())
    );
}
