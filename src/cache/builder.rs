use std::collections::HashMap;

use crate::error::InvariantError;
use crate::event::SessionMode;
use crate::trigger::{CommandFilter, CommandSelector, TriggerDefinition, TriggerName};

use super::{BuildStats, CacheKey, HookEntry, TriggerCache};

/// Build a cache from definitions in strictly increasing name order.
///
/// Buckets inherit the input order because entries are only ever appended,
/// so no bucket is sorted here. The input order is verified in the same pass.
///
/// # Errors
///
/// Returns an [`InvariantError`] when the catalog hands over definitions out
/// of order, with an empty command set, or filtering on a command their phase
/// cannot fire for. These are catalog bugs, not user errors.
pub fn build<'a, I>(
    definitions: I,
    session_mode: SessionMode,
) -> Result<TriggerCache, InvariantError>
where
    I: IntoIterator<Item = &'a TriggerDefinition>,
{
    let mut entries: HashMap<CacheKey, Vec<HookEntry>> = HashMap::new();
    let mut stats = BuildStats::default();
    let mut previous: Option<&TriggerName> = None;

    for definition in definitions {
        stats.scanned += 1;

        if let Some(prev) = previous {
            if prev >= &definition.name {
                return Err(InvariantError::UnorderedScan {
                    previous: prev.to_string(),
                    current: definition.name.to_string(),
                });
            }
        }
        previous = Some(&definition.name);

        check_filter(definition)?;

        if !definition.firing_mode.fires_in(session_mode) {
            stats.skipped += 1;
            continue;
        }
        stats.eligible += 1;

        let entry = HookEntry {
            name: definition.name.shared(),
            hook: definition.hook,
        };

        match &definition.filter {
            CommandFilter::Any => {
                entries
                    .entry(CacheKey::new(definition.phase, CommandSelector::Any))
                    .or_default()
                    .push(entry);
            }
            CommandFilter::Commands(commands) => {
                for &command in commands {
                    entries
                        .entry(CacheKey::new(definition.phase, CommandSelector::Specific(command)))
                        .or_default()
                        .push(entry.clone());
                }
            }
        }
    }

    Ok(TriggerCache {
        entries,
        generation: 0,
        session_mode,
        stats,
    })
}

fn check_filter(definition: &TriggerDefinition) -> Result<(), InvariantError> {
    let CommandFilter::Commands(commands) = &definition.filter else {
        return Ok(());
    };

    if commands.is_empty() {
        return Err(InvariantError::EmptyCommandFilter {
            trigger: definition.name.to_string(),
        });
    }

    if let Some(command) = commands.iter().find(|&&c| !definition.phase.supports(c)) {
        return Err(InvariantError::UnsupportedFilterInCatalog {
            trigger: definition.name.to_string(),
            phase: definition.phase.label().to_string(),
            command: command.as_str().to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::command::CommandKind;
    use crate::event::{FiringMode, Phase};
    use crate::trigger::HookRef;

    fn def(
        name: &str,
        phase: Phase,
        commands: &[CommandKind],
        mode: FiringMode,
    ) -> TriggerDefinition {
        let mut builder = TriggerDefinition::builder().name(name).phase(phase).firing_mode(mode);
        for &c in commands {
            builder = builder.command(c);
        }
        builder.build().unwrap()
    }

    fn names(bucket: &[HookEntry]) -> Vec<&str> {
        bucket.iter().map(HookEntry::name).collect()
    }

    #[test]
    fn test_buckets_follow_input_order() {
        let defs = vec![
            def("a", Phase::BeforeStart, &[], FiringMode::Always),
            def("b", Phase::BeforeStart, &[CommandKind::CreateTable], FiringMode::Always),
            def("c", Phase::BeforeStart, &[], FiringMode::Always),
            def(
                "d",
                Phase::BeforeStart,
                &[CommandKind::CreateTable, CommandKind::DropTable],
                FiringMode::Always,
            ),
        ];

        let cache = build(&defs, SessionMode::Origin).unwrap();

        let any = cache.bucket(CacheKey::new(Phase::BeforeStart, CommandSelector::Any));
        assert_eq!(names(any), vec!["a", "c"]);
        let create = cache.bucket(CacheKey::new(
            Phase::BeforeStart,
            CommandSelector::Specific(CommandKind::CreateTable),
        ));
        assert_eq!(names(create), vec!["b", "d"]);
        let drop = cache.bucket(CacheKey::new(
            Phase::BeforeStart,
            CommandSelector::Specific(CommandKind::DropTable),
        ));
        assert_eq!(names(drop), vec!["d"]);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_phases_are_separate() {
        let defs = vec![
            def("a", Phase::AfterEnd, &[], FiringMode::Always),
            def("b", Phase::BeforeStart, &[], FiringMode::Always),
        ];
        let cache = build(&defs, SessionMode::Origin).unwrap();
        assert_eq!(
            names(cache.bucket(CacheKey::new(Phase::AfterEnd, CommandSelector::Any))),
            vec!["a"]
        );
        assert_eq!(
            names(cache.bucket(CacheKey::new(Phase::BeforeStart, CommandSelector::Any))),
            vec!["b"]
        );
    }

    #[test]
    fn test_firing_mode_eligibility() {
        let defs = vec![
            def("always", Phase::BeforeStart, &[], FiringMode::Always),
            def("disabled", Phase::BeforeStart, &[], FiringMode::Disabled),
            def("origin", Phase::BeforeStart, &[], FiringMode::OriginOnly),
            def("replica", Phase::BeforeStart, &[], FiringMode::ReplicaOnly),
        ];
        let key = CacheKey::new(Phase::BeforeStart, CommandSelector::Any);

        let origin = build(&defs, SessionMode::Origin).unwrap();
        assert_eq!(names(origin.bucket(key)), vec!["always", "origin"]);
        assert_eq!(
            origin.stats(),
            BuildStats {
                scanned: 4,
                eligible: 2,
                skipped: 2
            }
        );

        let replica = build(&defs, SessionMode::Replica).unwrap();
        assert_eq!(names(replica.bucket(key)), vec!["always", "replica"]);

        let local = build(&defs, SessionMode::Local).unwrap();
        assert_eq!(names(local.bucket(key)), vec!["always", "origin"]);
    }

    #[test]
    fn test_rejects_unordered_scan() {
        let defs = vec![
            def("b", Phase::BeforeStart, &[], FiringMode::Always),
            def("a", Phase::BeforeStart, &[], FiringMode::Always),
        ];
        let err = build(&defs, SessionMode::Origin).unwrap_err();
        assert_eq!(
            err,
            InvariantError::UnorderedScan {
                previous: "b".to_string(),
                current: "a".to_string()
            }
        );
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let defs = vec![
            def("a", Phase::BeforeStart, &[], FiringMode::Always),
            def("a", Phase::AfterEnd, &[], FiringMode::Always),
        ];
        assert!(matches!(
            build(&defs, SessionMode::Origin).unwrap_err(),
            InvariantError::UnorderedScan { .. }
        ));
    }

    #[test]
    fn test_ordering_checked_for_skipped_definitions() {
        let defs = vec![
            def("b", Phase::BeforeStart, &[], FiringMode::Disabled),
            def("a", Phase::BeforeStart, &[], FiringMode::Disabled),
        ];
        assert!(build(&defs, SessionMode::Origin).is_err());
    }

    #[test]
    fn test_rejects_malformed_filters() {
        let mut empty = def("e", Phase::BeforeStart, &[], FiringMode::Always);
        empty.filter = CommandFilter::Commands(BTreeSet::new());
        assert!(matches!(
            build([&empty], SessionMode::Origin).unwrap_err(),
            InvariantError::EmptyCommandFilter { .. }
        ));

        let mut bad = def("u", Phase::NameLookup, &[], FiringMode::Always);
        bad.filter = CommandFilter::Commands(BTreeSet::from([CommandKind::CreateTable]));
        assert!(matches!(
            build([&bad], SessionMode::Origin).unwrap_err(),
            InvariantError::UnsupportedFilterInCatalog { .. }
        ));
    }

    #[test]
    fn test_hook_refs_are_forwarded() {
        let hook = HookRef::new();
        let definition = TriggerDefinition::builder()
            .name("h")
            .phase(Phase::AfterEnd)
            .hook(hook)
            .firing_mode(FiringMode::Always)
            .build()
            .unwrap();
        let cache = build([&definition], SessionMode::Origin).unwrap();
        let bucket = cache.bucket(CacheKey::new(Phase::AfterEnd, CommandSelector::Any));
        assert_eq!(bucket[0].hook, hook);
    }

    #[test]
    fn test_empty_input() {
        let cache = build(&Vec::<TriggerDefinition>::new(), SessionMode::Replica).unwrap();
        assert!(cache.is_empty());
        assert_eq!(cache.session_mode(), SessionMode::Replica);
    }
}
