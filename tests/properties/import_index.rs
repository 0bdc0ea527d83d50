//! After any rebuild sequence the index holds exactly the relations each
//! entry contributed last.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use proptest::prelude::*;

use kiln::ImportIndex;

fn entry(i: u8) -> PathBuf {
    PathBuf::from(format!("/kiln-prop/entry{i}.scss"))
}

fn import(i: u8) -> PathBuf {
    PathBuf::from(format!("/kiln-prop/_part{i}.scss"))
}

/// (entry, imports) rebuild steps over a small path universe
fn rebuilds_strategy() -> impl Strategy<Value = Vec<(u8, BTreeSet<u8>)>> {
    prop::collection::vec(
        (0u8..4, prop::collection::btree_set(0u8..6, 0..4)),
        0..24,
    )
}

proptest! {
    #[test]
    fn rebuild_membership_matches_last_contribution(steps in rebuilds_strategy()) {
        let mut index = ImportIndex::new();
        let mut model: BTreeMap<u8, BTreeSet<u8>> = BTreeMap::new();

        for (e, imports) in &steps {
            index.rebuild(&entry(*e), imports.iter().map(|i| import(*i)));
            model.insert(*e, imports.clone());
        }

        for i in 0u8..6 {
            let expected: BTreeSet<PathBuf> = model
                .iter()
                .filter(|(_, imports)| imports.contains(&i))
                .map(|(e, _)| entry(*e))
                .collect();
            prop_assert_eq!(index.dependents_of(&import(i)), expected.clone());
            prop_assert_eq!(index.contains(&import(i)), !expected.is_empty());
        }

        for (e, imports) in &model {
            let expected: BTreeSet<PathBuf> = imports.iter().map(|i| import(*i)).collect();
            prop_assert_eq!(index.imports_of(&entry(*e)), expected);
        }
    }

    #[test]
    fn delta_tracks_key_appearance(steps in rebuilds_strategy()) {
        let mut index = ImportIndex::new();

        for (e, imports) in &steps {
            let before: BTreeSet<PathBuf> = index.keys().map(|k| k.to_path_buf()).collect();
            let delta = index.rebuild(&entry(*e), imports.iter().map(|i| import(*i)));
            let after: BTreeSet<PathBuf> = index.keys().map(|k| k.to_path_buf()).collect();

            let added: BTreeSet<PathBuf> = after.difference(&before).cloned().collect();
            let removed: BTreeSet<PathBuf> = before.difference(&after).cloned().collect();
            prop_assert_eq!(delta.added.into_iter().collect::<BTreeSet<_>>(), added);
            prop_assert_eq!(delta.removed.into_iter().collect::<BTreeSet<_>>(), removed);
        }
    }

    #[test]
    fn persisted_map_restores_the_same_index(steps in rebuilds_strategy()) {
        let mut index = ImportIndex::new();
        for (e, imports) in &steps {
            index.rebuild(&entry(*e), imports.iter().map(|i| import(*i)));
        }

        prop_assert_eq!(ImportIndex::from_map(index.to_map()), index);
    }
}
