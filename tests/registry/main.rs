//! Specs spread over several modules, collected at link time.

use kispec::{SharedContext, Spec};
use linkme::distributed_slice;
use pretty_assertions::assert_eq;

#[distributed_slice]
pub static SPECS: [fn(&mut Spec)];

mod stack {
    use linkme::distributed_slice;
    use pretty_assertions::assert_eq;

    use super::{SPECS, SharedContext, Spec};

    #[distributed_slice(SPECS)]
    static STACK: fn(&mut Spec) = stack_spec;

    fn stack_spec(spec: &mut Spec) {
        spec.describe("stack", |stack| {
            stack.it("pushes", || {
                let mut items = vec![1];
                items.push(2);
                assert_eq!(items, [1, 2]);
            });
            stack.it_behaves_like_with("a collection", SharedContext::new().with("len", 0_usize));
        });
    }
}

mod queue {
    use std::collections::VecDeque;

    use linkme::distributed_slice;
    use pretty_assertions::assert_eq;

    use super::{SPECS, Spec};

    #[distributed_slice(SPECS)]
    static QUEUE: fn(&mut Spec) = queue_spec;

    fn queue_spec(spec: &mut Spec) {
        spec.describe("queue", |queue| {
            queue.it("pops in order", || {
                let mut items = VecDeque::from([1, 2]);
                assert_eq!(items.pop_front(), Some(1));
            });
            queue.it_behaves_like("a collection");
        });
    }
}

fn collection_examples(spec: &mut Spec) {
    spec.shared_examples("a collection", |scope, context| {
        let len = context.get::<usize>("len").copied().unwrap_or_default();
        scope.it("starts empty", move || {
            if len != 0 {
                return Err(format!("expected an empty collection, got {len} items"));
            }
            Ok(())
        });
    });
}

#[test]
fn collected_specs_run_together() {
    let mut spec = Spec::new();
    collection_examples(&mut spec);
    for register in SPECS.iter() {
        register(&mut spec);
    }
    let suite = spec.build().unwrap();
    let report = suite.run();

    let mut names: Vec<_> = report
        .outcomes
        .iter()
        .map(|(example, outcome)| (example.name(), outcome.passed(), example.is_shared_example()))
        .collect();
    names.sort();
    assert_eq!(
        names,
        [
            ("queue a collection starts empty".to_string(), true, true),
            ("queue pops in order".to_string(), true, false),
            ("stack a collection starts empty".to_string(), true, true),
            ("stack pushes".to_string(), true, false),
        ]
    );
}
