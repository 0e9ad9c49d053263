use crate::observe::Observation;
use crate::profile::Profile;

/// Set of event types excluded from scoring this round, indexed by the
/// event's position in `Profile::event_types`.
///
/// A fixed-size bitset: validation caps profiles at `MAX_EVENT_TYPES`
/// event types, so one `u64` always suffices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExclusionSet(u64);

impl ExclusionSet {
    #[inline]
    pub fn insert(&mut self, index: usize) {
        if index < 64 {
            self.0 |= 1u64 << index;
        }
    }

    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        index < 64 && (self.0 >> index) & 1 == 1
    }
}

/// Compute the exclusion set for one observation: every event type with a
/// positive count contributes its whole `conflicts_with` list.
///
/// A pure union pass: order-independent, additive only, single iteration.
/// A self-referential conflict simply excludes the event itself; ids that
/// resolve to no event type are ignored.
pub fn excluded_events(profile: &Profile, obs: &Observation) -> ExclusionSet {
    let mut excluded = ExclusionSet::default();
    for ev in &profile.event_types {
        if obs.count(&ev.id) == 0 {
            continue;
        }
        for rival in &ev.conflicts_with {
            if let Some(idx) = profile.event_index(rival) {
                excluded.insert(idx);
            }
        }
    }
    excluded
}
