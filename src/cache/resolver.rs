use tracing::trace;

use crate::command::CommandKind;
use crate::event::Phase;
use crate::trigger::CommandSelector;

use super::{CacheKey, HookEntry, TriggerCache};

impl TriggerCache {
    /// Hooks to invoke for `(phase, command)`, in trigger name order.
    ///
    /// The result equals the name-sorted list of every indexed trigger of
    /// `phase` whose filter is ANY or contains `command`. It is produced by a
    /// two-pointer merge of the two buckets; when a name appears in both, the
    /// ANY entry comes first.
    ///
    /// Commands that manage event triggers never resolve anything. The
    /// phase/command support matrix is enforced when filters are compiled, so
    /// ANY triggers fire for every other command of their phase.
    #[must_use]
    pub fn resolve(&self, phase: Phase, command: CommandKind) -> Vec<HookEntry> {
        if !command.supports_event_triggers() {
            return Vec::new();
        }

        let any = self.bucket(CacheKey::new(phase, CommandSelector::Any));
        let specific = self.bucket(CacheKey::new(phase, CommandSelector::Specific(command)));
        let merged = merge_by_name(any, specific);

        trace!(
            phase = %phase,
            command = %command,
            any = any.len(),
            specific = specific.len(),
            generation = self.generation(),
            "resolved event triggers"
        );

        merged
    }

    /// Whether [`TriggerCache::resolve`] would return anything.
    #[must_use]
    pub fn has_any(&self, phase: Phase, command: CommandKind) -> bool {
        command.supports_event_triggers()
            && (!self.bucket(CacheKey::new(phase, CommandSelector::Any)).is_empty()
                || !self
                    .bucket(CacheKey::new(phase, CommandSelector::Specific(command)))
                    .is_empty())
    }
}

fn merge_by_name(any: &[HookEntry], specific: &[HookEntry]) -> Vec<HookEntry> {
    let mut out = Vec::with_capacity(any.len() + specific.len());
    let (mut i, mut j) = (0, 0);

    while i < any.len() && j < specific.len() {
        if specific[j].name < any[i].name {
            out.push(specific[j].clone());
            j += 1;
        } else {
            out.push(any[i].clone());
            i += 1;
        }
    }
    out.extend_from_slice(&any[i..]);
    out.extend_from_slice(&specific[j..]);

    out
}
