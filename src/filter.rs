//! Deciding which examples of a suite run.
//!
//! Resolution walks every discovered example once and gives it exactly one
//! [`Disposition`]. Examples that do not run are never dropped: they stay in
//! the result with a [`SkipReason`], so reporters can still list them.
//!
//! The steps, in order:
//! 1. If any example is focused (itself or through a group), only focused
//!    examples are candidates.
//! 2. A candidate must pass every inclusion filter.
//! 3. A candidate matching any exclusion filter is removed.
//! 4. Pending candidates are removed.
//!
//! If nothing is left to run and
//! [`run_all_when_everything_filtered`](Configuration::run_all_when_everything_filtered)
//! is set, focus and inclusion filters are dropped and the steps 3 and 4 are
//! applied again to every example. The fallback never brings back excluded or
//! pending examples, so a suite made of pending examples only runs nothing.

use crate::{
    config::Configuration,
    example::ExampleRef,
    outcome::SkipReason,
};

/// Whether an example runs in a suite run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Disposition {
    Run,
    Skipped(SkipReason),
}

impl Disposition {
    pub fn runs(&self) -> bool {
        matches!(self, Disposition::Run)
    }
}

/// The result of resolving focus, filters and pending flags.
#[derive(Debug)]
pub struct ResolvedExamples<'t> {
    /// Every discovered example with its disposition, in declaration order.
    pub examples: Vec<(ExampleRef<'t>, Disposition)>,
    /// Whether at least one example was focused.
    pub focused: bool,
    /// Whether everything was filtered out and the run-all fallback kicked in.
    pub fell_back: bool,
}

impl<'t> ResolvedExamples<'t> {
    /// The examples that run, in run order.
    pub fn runnable(&self) -> impl Iterator<Item = ExampleRef<'t>> + '_ {
        self.examples
            .iter()
            .filter(|(_, disposition)| disposition.runs())
            .map(|(example, _)| *example)
    }

    pub fn runnable_count(&self) -> usize {
        self.runnable().count()
    }

    /// The number of examples that do not run for `reason`.
    pub fn skipped_for(&self, reason: SkipReason) -> usize {
        self.examples
            .iter()
            .filter(|(_, disposition)| *disposition == Disposition::Skipped(reason))
            .count()
    }

    pub fn disposition(&self, example: ExampleRef<'_>) -> Option<Disposition> {
        self.examples
            .iter()
            .find(|(candidate, _)| candidate.id() == example.id())
            .map(|(_, disposition)| *disposition)
    }
}

fn select(example: &ExampleRef<'_>, config: &Configuration, focus: bool) -> Disposition {
    if focus && !example.is_focused() {
        return Disposition::Skipped(SkipReason::Unfocused);
    }

    let included = config
        .inclusion_filters
        .iter()
        .all(|filter| filter.matches(example));
    match included {
        true => exclude_or_pending(example, config),
        false => Disposition::Skipped(SkipReason::NotIncluded),
    }
}

fn exclude_or_pending(example: &ExampleRef<'_>, config: &Configuration) -> Disposition {
    let excluded = config
        .exclusion_filters
        .iter()
        .any(|filter| filter.matches(example));
    if excluded {
        return Disposition::Skipped(SkipReason::Excluded);
    }

    match example.is_pending() {
        true => Disposition::Skipped(SkipReason::Pending),
        false => Disposition::Run,
    }
}

/// Resolve which of `examples` run under `config`.
pub fn resolve<'t>(
    examples: impl IntoIterator<Item = ExampleRef<'t>>,
    config: &Configuration,
) -> ResolvedExamples<'t> {
    let examples: Vec<_> = examples.into_iter().collect();
    let focused = examples.iter().any(|example| example.is_focused());

    let mut resolved: Vec<_> = examples
        .iter()
        .map(|example| (*example, select(example, config, focused)))
        .collect();

    let nothing_runs = !resolved.iter().any(|(_, disposition)| disposition.runs());
    let fell_back =
        nothing_runs && config.run_all_when_everything_filtered() && !resolved.is_empty();
    if fell_back {
        tracing::info!("every example was filtered out, dropping focus and inclusion filters");
        resolved = examples
            .iter()
            .map(|example| (*example, exclude_or_pending(example, config)))
            .collect();
    }

    let resolved = ResolvedExamples {
        examples: resolved,
        focused,
        fell_back,
    };
    tracing::debug!(
        discovered = resolved.examples.len(),
        runnable = resolved.runnable_count(),
        focused,
        fell_back,
        "resolved examples"
    );
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{flags::Flags, test_support::*, tree::ExampleTree};

    fn dispositions(resolved: &ResolvedExamples<'_>) -> Vec<(String, Disposition)> {
        resolved
            .examples
            .iter()
            .map(|(example, disposition)| (example.name(), *disposition))
            .collect()
    }

    #[test]
    fn everything_runs_without_filters() {
        let mut tree = ExampleTree::new();
        tree.add_example(ExampleTree::ROOT, example! {description: "a"}).unwrap();
        tree.add_example(ExampleTree::ROOT, example! {description: "b"}).unwrap();

        let resolved = resolve(tree.examples(), &Configuration::default());
        assert_eq!(resolved.runnable_count(), 2);
        assert!(!resolved.focused);
        assert!(!resolved.fell_back);
    }

    #[test]
    fn focus_narrows_the_run() {
        let mut tree = ExampleTree::new();
        let focused = tree
            .add_group(ExampleTree::ROOT, group_meta("focused").with_flags(Flags::new().focused()))
            .unwrap();
        tree.add_example(focused, example! {description: "a"}).unwrap();
        tree.add_example(focused, example! {description: "b", flags: Flags::new().pending()})
            .unwrap();
        tree.add_example(ExampleTree::ROOT, example! {description: "c"}).unwrap();
        tree.add_example(
            ExampleTree::ROOT,
            example! {description: "d", flags: Flags::new().focused()},
        )
        .unwrap();

        let resolved = resolve(tree.examples(), &Configuration::default());
        assert!(resolved.focused);
        assert_eq!(
            dispositions(&resolved),
            [
                ("focused a".to_string(), Disposition::Run),
                ("focused b".to_string(), Disposition::Skipped(SkipReason::Pending)),
                ("c".to_string(), Disposition::Skipped(SkipReason::Unfocused)),
                ("d".to_string(), Disposition::Run),
            ]
        );
    }

    #[test]
    fn focused_but_pending_runs_nothing_without_fallback() {
        let mut tree = ExampleTree::new();
        tree.add_example(
            ExampleTree::ROOT,
            example! {description: "a", flags: Flags::new().focused().pending()},
        )
        .unwrap();
        tree.add_example(ExampleTree::ROOT, example! {description: "b"}).unwrap();

        let mut config = Configuration::default();
        config.set_run_all_when_everything_filtered(false);
        let resolved = resolve(tree.examples(), &config);
        assert_eq!(resolved.runnable_count(), 0);
        assert!(!resolved.fell_back);

        // With the fallback, focus is dropped but pending is kept.
        let resolved = resolve(tree.examples(), &Configuration::default());
        assert!(resolved.fell_back);
        assert_eq!(
            dispositions(&resolved),
            [
                ("a".to_string(), Disposition::Skipped(SkipReason::Pending)),
                ("b".to_string(), Disposition::Run),
            ]
        );
    }

    #[test]
    fn inclusion_requires_all_filters() {
        let mut tree = ExampleTree::new();
        tree.add_example(ExampleTree::ROOT, example! {description: "fast db"}).unwrap();
        tree.add_example(ExampleTree::ROOT, example! {description: "fast net"}).unwrap();
        tree.add_example(ExampleTree::ROOT, example! {description: "slow db"}).unwrap();

        let mut config = Configuration::default();
        config
            .include(|example| example.name().contains("fast"))
            .include(|example| example.name().contains("db"));
        let resolved = resolve(tree.examples(), &config);
        assert_eq!(
            dispositions(&resolved),
            [
                ("fast db".to_string(), Disposition::Run),
                ("fast net".to_string(), Disposition::Skipped(SkipReason::NotIncluded)),
                ("slow db".to_string(), Disposition::Skipped(SkipReason::NotIncluded)),
            ]
        );
    }

    #[test]
    fn exclusion_uses_inherited_flags() {
        let mut tree = ExampleTree::new();
        let slow = tree
            .add_group(
                ExampleTree::ROOT,
                group_meta("io").with_flags(Flags::new().with("slow", true)),
            )
            .unwrap();
        tree.add_example(slow, example! {description: "reads"}).unwrap();
        tree.add_example(ExampleTree::ROOT, example! {description: "adds"}).unwrap();

        let mut config = Configuration::default();
        config.exclude(|example| example.is_flagged("slow"));
        let resolved = resolve(tree.examples(), &config);
        assert_eq!(resolved.skipped_for(SkipReason::Excluded), 1);
        assert_eq!(
            resolved.runnable().map(|e| e.name()).collect::<Vec<_>>(),
            ["adds"]
        );
    }

    #[test]
    fn fallback_drops_inclusion_filters() {
        let mut tree = ExampleTree::new();
        tree.add_example(ExampleTree::ROOT, example! {description: "a"}).unwrap();
        tree.add_example(
            ExampleTree::ROOT,
            example! {description: "b", flags: Flags::new().pending()},
        )
        .unwrap();

        let mut config = Configuration::default();
        config.include(|_| false);
        let resolved = resolve(tree.examples(), &config);
        assert!(resolved.fell_back);
        assert_eq!(
            dispositions(&resolved),
            [
                ("a".to_string(), Disposition::Run),
                ("b".to_string(), Disposition::Skipped(SkipReason::Pending)),
            ]
        );

        config.set_run_all_when_everything_filtered(false);
        let resolved = resolve(tree.examples(), &config);
        assert_eq!(resolved.runnable_count(), 0);
        assert_eq!(resolved.skipped_for(SkipReason::NotIncluded), 2);
    }

    #[test]
    fn only_pending_examples_run_nothing_even_with_fallback() {
        let mut tree = ExampleTree::new();
        tree.add_example(
            ExampleTree::ROOT,
            example! {description: "a", flags: Flags::new().pending()},
        )
        .unwrap();

        let resolved = resolve(tree.examples(), &Configuration::default());
        assert_eq!(resolved.runnable_count(), 0);
        assert_eq!(resolved.skipped_for(SkipReason::Pending), 1);
    }

    #[test]
    fn fallback_keeps_exclusions() {
        let mut tree = ExampleTree::new();
        let calc = tree.add_group(ExampleTree::ROOT, group_meta("calc")).unwrap();
        tree.add_example(calc, example! {description: "adds"}).unwrap();
        tree.add_example(calc, example! {description: "slow path"}).unwrap();

        let mut config = Configuration::default();
        config
            .include(|example| example.name().contains("typo"))
            .exclude(|example| example.name().contains("slow"));
        let resolved = resolve(tree.examples(), &config);
        assert!(resolved.fell_back);
        assert_eq!(
            dispositions(&resolved),
            [
                ("calc adds".to_string(), Disposition::Run),
                ("calc slow path".to_string(), Disposition::Skipped(SkipReason::Excluded)),
            ]
        );
    }

    #[test]
    fn fallback_never_runs_excluded_examples() {
        let mut tree = ExampleTree::new();
        let calc = tree.add_group(ExampleTree::ROOT, group_meta("calc")).unwrap();
        tree.add_example(calc, example! {description: "slow path"}).unwrap();

        let mut config = Configuration::default();
        config.exclude(|example| example.name().contains("slow"));
        let resolved = resolve(tree.examples(), &config);
        assert!(resolved.fell_back);
        assert_eq!(resolved.runnable_count(), 0);
        assert_eq!(resolved.skipped_for(SkipReason::Excluded), 1);
    }

    #[test]
    fn empty_tree_is_fine() {
        let tree = ExampleTree::new();
        let resolved = resolve(tree.examples(), &Configuration::default());
        assert!(resolved.examples.is_empty());
        assert!(!resolved.fell_back);
    }
}
