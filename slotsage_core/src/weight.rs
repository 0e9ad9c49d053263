use crate::profile::{Breakpoint, EventType, Profile, WeightPolicy};

/// Resolve a dynamic-weight policy into a scalar multiplier for the given
/// trial count.
///
/// Flat policies ignore the trial count. Table policies interpolate
/// piecewise-linearly between breakpoints and clamp to the boundary
/// multiplier outside the table. An empty table (rejected by validation,
/// tolerated here) resolves to 1.0.
pub fn trial_multiplier(policy: &WeightPolicy, total_trials: u32) -> f64 {
    match policy {
        WeightPolicy::Flat(m) => *m,
        WeightPolicy::Table(points) => interpolate(points, total_trials),
    }
}

fn interpolate(points: &[Breakpoint], total_trials: u32) -> f64 {
    let (first, rest) = match points.split_first() {
        Some(split) => split,
        None => return 1.0,
    };
    if total_trials <= first.trials {
        return first.multiplier;
    }
    let mut lower = *first;
    for upper in rest {
        if total_trials < upper.trials {
            let span = (upper.trials - lower.trials) as f64;
            let t = (total_trials - lower.trials) as f64 / span;
            return lower.multiplier + (upper.multiplier - lower.multiplier) * t;
        }
        lower = *upper;
    }
    lower.multiplier
}

/// Effective weight of one event type at the given trial count: its static
/// weight, further scaled by its named policy when it has one.
///
/// Policy names are resolved generically against the profile; a dangling
/// reference (rejected by validation) falls back to a 1.0 multiplier.
#[inline]
pub fn effective_weight(profile: &Profile, ev: &EventType, total_trials: u32) -> f64 {
    let multiplier = ev
        .weight_policy
        .as_deref()
        .and_then(|name| profile.weight_policies.get(name))
        .map(|p| trial_multiplier(p, total_trials))
        .unwrap_or(1.0);
    ev.weight * multiplier
}
