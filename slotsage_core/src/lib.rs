//! slotsage_core
//!
//! Evidence-weighted setting estimator: turns observed event counts into a
//! normalized probability distribution over a machine's hidden settings.
//!
//! Responsibilities:
//! - declarative profile model (expected rates, weights, conflicts, policy)
//! - conflict exclusion between overlapping signals
//! - sample-size scaling of noisy signals
//! - weighted binomial log-likelihood scoring with override/denial rules
//!
//! Non-goals:
//! - no IO
//! - no async
//! - no presentation concerns (rendering, form state, charts)

pub mod conflict;
pub mod estimate;
pub mod observe;
pub mod profile;
pub mod validate;
pub mod weight;

pub use conflict::{excluded_events, ExclusionSet};
pub use estimate::{estimate, SettingEstimate};
pub use observe::Observation;
pub use profile::{
    Breakpoint, DenialTier, EventType, ForcedOverride, Profile, Setting, WeightPolicy,
    DEFAULT_SETTING_COUNT, MAX_EVENT_TYPES, MAX_SETTINGS,
};
pub use validate::ProfileError;
pub use weight::{effective_weight, trial_multiplier};
