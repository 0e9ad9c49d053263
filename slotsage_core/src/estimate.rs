//! Likelihood evaluator & normalizer.
//!
//! One pass: exclusion set -> per-setting weighted binomial log-likelihood
//! -> override/denial policy -> log-sum-exp shift -> percentages.
//!
//! Pure and deterministic. No IO, no shared state; safe to call once per
//! keystroke from any number of threads.

use serde::{Deserialize, Serialize};

use crate::conflict::excluded_events;
use crate::observe::Observation;
use crate::profile::{Profile, Setting};
use crate::weight::effective_weight;

/// One output entry: a setting and its probability in percent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SettingEstimate {
    pub setting: Setting,
    pub percent: f64,
}

/// Uniform distribution over `n` settings (the no-information fallback).
fn uniform(n: usize) -> Vec<SettingEstimate> {
    let share = 100.0 / n as f64;
    (1..=n as Setting)
        .map(|setting| SettingEstimate { setting, percent: share })
        .collect()
}

/// Distribution with 100% on `target` and 0% elsewhere.
fn certain(n: usize, target: Setting) -> Vec<SettingEstimate> {
    (1..=n as Setting)
        .map(|setting| SettingEstimate {
            setting,
            percent: if setting == target { 100.0 } else { 0.0 },
        })
        .collect()
}

/// Union of denial sets for every ladder tier up to and including the
/// highest tier whose trigger fired. Returns `None` when nothing fired.
fn denied_settings(profile: &Profile, obs: &Observation) -> Option<Vec<Setting>> {
    let highest = profile
        .denial_ladder
        .iter()
        .rposition(|tier| obs.count(&tier.trigger) > 0)?;
    let mut denied: Vec<Setting> = Vec::new();
    for tier in &profile.denial_ladder[..=highest] {
        for &s in &tier.deny {
            if !denied.contains(&s) {
                denied.push(s);
            }
        }
    }
    Some(denied)
}

/// Binomial log-likelihood of seeing `count` occurrences in `total` trials
/// under per-trial probability `p`. The combinatorial constant is dropped;
/// it cancels in normalization.
#[inline]
fn binomial_ll(count: u32, total: u32, p: f64) -> f64 {
    // Clamp so a degenerate rate of 1 trial-per-occurrence stays finite.
    let count = count.min(total);
    let p = p.min(1.0 - 1e-12);
    let q = 1.0 - p;
    count as f64 * p.ln() + (total - count) as f64 * q.ln()
}

/// Evaluate one observation against a profile and return the full
/// normalized distribution over settings, ascending by setting id.
///
/// Policy order: forced override beats everything (including the
/// zero-trial fallback), then zero trials means uniform, then scoring,
/// denial, and normalization. Never panics or yields NaN for a profile
/// that passed `Profile::validate`.
pub fn estimate(profile: &Profile, obs: &Observation) -> Vec<SettingEstimate> {
    let n = profile.setting_count;

    // Deterministic tell: skip scoring outright.
    for rule in &profile.forced_overrides {
        if obs.count(&rule.trigger) > 0 {
            return certain(n, rule.setting);
        }
    }

    // No trials, no information.
    if obs.total_trials == 0 {
        return uniform(n);
    }

    let excluded = excluded_events(profile, obs);

    let mut scores = vec![0.0f64; n];
    for (idx, ev) in profile.event_types.iter().enumerate() {
        if !ev.discrimination || excluded.contains(idx) {
            continue;
        }
        let count = obs.count(&ev.id);
        if count == 0 {
            continue;
        }
        let w = effective_weight(profile, ev, obs.total_trials);
        for setting in profile.settings() {
            // No expected rate for this setting: the event contributes no
            // evidence here, it does not deny the setting.
            let Some(rate) = ev.rate_for(setting) else {
                continue;
            };
            let ll = binomial_ll(count, obs.total_trials, 1.0 / rate);
            scores[(setting - 1) as usize] += w * ll;
        }
    }

    // Progressive denial: squeeze denied settings to exactly zero mass,
    // not silently skipped, so normalization still covers every setting.
    if let Some(denied) = denied_settings(profile, obs) {
        for s in denied {
            let Some(idx) = s.checked_sub(1) else { continue };
            if let Some(slot) = scores.get_mut(idx as usize) {
                *slot = f64::NEG_INFINITY;
            }
        }
    }

    // Log-sum-exp shift; -inf survives as exactly 0 after exp.
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        // Every setting denied: degenerate profile, fall back to uniform.
        return uniform(n);
    }

    let weights: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = weights.iter().sum();
    if sum <= 0.0 {
        return uniform(n);
    }

    weights
        .iter()
        .enumerate()
        .map(|(i, w)| SettingEstimate {
            setting: (i + 1) as Setting,
            percent: 100.0 * w / sum,
        })
        .collect()
}
