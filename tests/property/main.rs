use std::collections::HashSet;

use proptest::prelude::*;
use worker_union::union::worker_name;
use worker_union::{CancelSignal, WorkerUnion};

async fn idle(_signal: CancelSignal) -> anyhow::Result<()> {
    Ok(())
}

// Union names as they appear in scenario files: no whitespace.
fn union_name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9_-]{0,11}"
}

proptest! {
    #[test]
    fn test_names_follow_creation_sequence(
        union_name in union_name_strategy(),
        count in 0usize..64,
    ) {
        let union = WorkerUnion::new(union_name.clone());

        let mut names = Vec::with_capacity(count);
        for _ in 0..count {
            names.push(union.new_worker(idle).unwrap().name().to_string());
        }

        prop_assert_eq!(union.total_size(), count);
        let distinct: HashSet<_> = names.iter().collect();
        prop_assert_eq!(distinct.len(), count);
        for (i, name) in names.iter().enumerate() {
            prop_assert_eq!(name, &worker_name(&union_name, i));
            prop_assert_eq!(name, &format!("{union_name}-worker-{i}"));
        }
    }

    #[test]
    fn test_shutdown_freezes_membership(
        before in 0usize..32,
        attempts_after in 1usize..8,
    ) {
        let union = WorkerUnion::new("frozen");
        for _ in 0..before {
            union.new_worker(idle).unwrap();
        }

        union.shutdown();

        for _ in 0..attempts_after {
            prop_assert!(union.new_worker(idle).is_err());
        }
        prop_assert_eq!(union.total_size(), before);
        prop_assert_eq!(union.members().len(), before);
        prop_assert!(union.members().iter().all(|w| w.is_interrupted()));
        prop_assert!(union.is_finished());
    }
}
