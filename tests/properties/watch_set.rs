//! The direct watch set always equals the `compile = true` files.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use proptest::prelude::*;

use kiln::domain::ports::NoopEventSink;
use kiln::{FileEntry, Project, WatchCoordinator};

use crate::common::{RecordingWatcher, ScriptedCompiler};

/// Up to four projects, each with up to six files and their compile flags
fn projects_strategy() -> impl Strategy<Value = Vec<Project>> {
    prop::collection::vec(prop::collection::vec(any::<bool>(), 0..6), 0..4).prop_map(|projects| {
        projects
            .into_iter()
            .enumerate()
            .map(|(p, files)| {
                let root = format!("/kiln-prop/p{p}");
                files.into_iter().enumerate().fold(
                    Project::new(format!("p{p}"), &root),
                    |project, (f, compile)| {
                        let src = format!("{root}/f{f}.less");
                        let out = format!("{root}/f{f}.css");
                        project.with_file(FileEntry::new(src, out).with_compile(compile))
                    },
                )
            })
            .collect()
    })
}

fn compile_true(projects: &[Project]) -> BTreeSet<PathBuf> {
    projects
        .iter()
        .flat_map(|p| p.entry_files())
        .map(|f| f.src.clone())
        .collect()
}

fn coordinator() -> (WatchCoordinator, RecordingWatcher) {
    let watcher = RecordingWatcher::default();
    let coordinator = WatchCoordinator::new(
        Box::new(watcher.clone()),
        Arc::new(ScriptedCompiler::default()),
        Arc::new(NoopEventSink),
    );
    (coordinator, watcher)
}

proptest! {
    #[test]
    fn watched_set_equals_compile_true_set(projects in projects_strategy()) {
        let (coordinator, watcher) = coordinator();

        let registered = coordinator.start_watching_projects(&projects);
        let expected = compile_true(&projects);

        prop_assert_eq!(registered, expected.len());
        prop_assert_eq!(watcher.watched(), expected.clone());
        let direct: BTreeSet<PathBuf> = coordinator.watch_set().direct.keys().cloned().collect();
        prop_assert_eq!(direct, expected);
    }

    #[test]
    fn restarting_replaces_the_watched_set(
        first in projects_strategy(),
        second in projects_strategy(),
    ) {
        let (coordinator, watcher) = coordinator();

        coordinator.start_watching_projects(&first);
        coordinator.start_watching_projects(&second);

        prop_assert_eq!(watcher.watched(), compile_true(&second));
    }

    #[test]
    fn only_entry_files_resolve_to_themselves(projects in projects_strategy()) {
        let (coordinator, _watcher) = coordinator();
        coordinator.start_watching_projects(&projects);

        for file in projects.iter().flat_map(|p| p.files.iter()) {
            let targets = coordinator.resolve(&file.src);
            if file.compile {
                prop_assert_eq!(targets.len(), 1);
                prop_assert_eq!(&targets[0].src, &file.src);
            } else {
                prop_assert!(targets.is_empty());
            }
        }
    }
}
