use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// 1-based setting identifier (the hidden category being estimated).
pub type Setting = u8;

/// Default number of settings on a real machine.
pub const DEFAULT_SETTING_COUNT: usize = 6;

/// Hard caps that keep the conflict bitset and rate tables fixed-size.
pub const MAX_EVENT_TYPES: usize = 64;
pub const MAX_SETTINGS: usize = 32;

/// One trackable, countable signal whose occurrence rate differs by setting.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EventType {
    /// Stable identifier used by observations, conflicts and override rules.
    pub id: String,
    /// Human-facing label; presentation only, the core never branches on it.
    #[serde(default)]
    pub label: String,
    /// Expected trials-per-occurrence, one entry per setting (index 0 is
    /// setting 1). A value <= 0.0 means "no evidence for that setting".
    pub rates: Vec<f64>,
    /// Only discrimination factors contribute to scoring.
    #[serde(default = "default_true")]
    pub discrimination: bool,
    /// Static weight on this event's log-likelihood contribution.
    #[serde(default = "default_weight")]
    pub weight: f64,
    /// Event ids whose evidence is invalidated whenever this event's count
    /// is positive. Not necessarily symmetric.
    #[serde(default)]
    pub conflicts_with: Vec<String>,
    /// Optional named dynamic-weight policy, resolved against
    /// `Profile::weight_policies`.
    #[serde(default)]
    pub weight_policy: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_weight() -> f64 {
    1.0
}

impl EventType {
    pub fn new(id: impl Into<String>, rates: Vec<f64>) -> Self {
        Self {
            id: id.into(),
            label: String::new(),
            rates,
            discrimination: true,
            weight: 1.0,
            conflicts_with: Vec::new(),
            weight_policy: None,
        }
    }

    /// Expected trials-per-occurrence for `setting`, if the profile supplies
    /// a usable one. Missing or non-positive entries yield `None` (no
    /// evidence), which is not the same as probability zero.
    #[inline]
    pub fn rate_for(&self, setting: Setting) -> Option<f64> {
        let idx = setting.checked_sub(1)? as usize;
        match self.rates.get(idx) {
            Some(&r) if r > 0.0 && r.is_finite() => Some(r),
            _ => None,
        }
    }
}

/// One point of a trial-count interpolation table.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub trials: u32,
    pub multiplier: f64,
}

/// A named dynamic-weight policy: either a flat scalar or a breakpoint
/// table interpolated over the observation's total trial count.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WeightPolicy {
    Flat(f64),
    Table(Vec<Breakpoint>),
}

/// Deterministic tell: a positive count on `trigger` proves `setting`
/// outright and bypasses scoring entirely.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ForcedOverride {
    pub trigger: String,
    pub setting: Setting,
}

/// One rung of the progressive-denial ladder. Tiers are ordered by
/// ascending severity; firing tier k denies the union of tiers 0..=k.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DenialTier {
    pub trigger: String,
    pub deny: Vec<Setting>,
}

/// Declarative description of one machine: its event types and the policy
/// data the evaluator executes. Supplied by configuration, read-only for
/// the core, reused across many observations.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default = "default_setting_count")]
    pub setting_count: usize,
    pub event_types: Vec<EventType>,
    #[serde(default)]
    pub weight_policies: HashMap<String, WeightPolicy>,
    #[serde(default)]
    pub forced_overrides: Vec<ForcedOverride>,
    #[serde(default)]
    pub denial_ladder: Vec<DenialTier>,
}

fn default_setting_count() -> usize {
    DEFAULT_SETTING_COUNT
}

impl Profile {
    pub fn new(setting_count: usize, event_types: Vec<EventType>) -> Self {
        Self {
            setting_count,
            event_types,
            weight_policies: HashMap::new(),
            forced_overrides: Vec::new(),
            denial_ladder: Vec::new(),
        }
    }

    /// Iterate settings 1..=setting_count in ascending order.
    #[inline]
    pub fn settings(&self) -> impl Iterator<Item = Setting> {
        1..=self.setting_count as Setting
    }

    #[inline]
    pub fn event_index(&self, id: &str) -> Option<usize> {
        self.event_types.iter().position(|e| e.id == id)
    }
}
