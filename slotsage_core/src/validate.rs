//! Construction-time profile checks.
//!
//! Validation runs once when a profile is loaded so the evaluation hot
//! path stays infallible. Everything here is a caller contract violation,
//! not a runtime condition.

use std::collections::HashSet;

use thiserror::Error;

use crate::profile::{Profile, Setting, WeightPolicy, MAX_EVENT_TYPES, MAX_SETTINGS};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("setting count {0} outside 1..={}", MAX_SETTINGS)]
    BadSettingCount(usize),
    #[error("profile has {0} event types, maximum is {}", MAX_EVENT_TYPES)]
    TooManyEventTypes(usize),
    #[error("duplicate event type id `{0}`")]
    DuplicateEventId(String),
    #[error("event type `{id}` has {got} rate entries, profile has {want} settings")]
    RateTableLength { id: String, got: usize, want: usize },
    #[error("event type `{id}` has non-finite weight")]
    BadWeight { id: String },
    #[error("event type `{id}` conflicts with unknown event `{rival}`")]
    UnknownConflict { id: String, rival: String },
    #[error("event type `{id}` references unknown weight policy `{policy}`")]
    UnknownPolicy { id: String, policy: String },
    #[error("weight policy `{0}` has an empty breakpoint table")]
    EmptyBreakpoints(String),
    #[error("weight policy `{0}` has a non-finite multiplier")]
    BadMultiplier(String),
    #[error("weight policy `{0}` breakpoints are not sorted ascending by trials")]
    UnsortedBreakpoints(String),
    #[error("override rule references unknown event `{0}`")]
    UnknownOverrideTrigger(String),
    #[error("denial tier references unknown event `{0}`")]
    UnknownDenialTrigger(String),
    #[error("rule targets setting {0}, profile has no such setting")]
    BadSettingRef(Setting),
}

impl Profile {
    /// Check profile well-formedness. Call once at load time; `estimate`
    /// assumes a validated profile and never re-checks.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.setting_count == 0 || self.setting_count > MAX_SETTINGS {
            return Err(ProfileError::BadSettingCount(self.setting_count));
        }
        if self.event_types.len() > MAX_EVENT_TYPES {
            return Err(ProfileError::TooManyEventTypes(self.event_types.len()));
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for ev in &self.event_types {
            if !seen.insert(ev.id.as_str()) {
                return Err(ProfileError::DuplicateEventId(ev.id.clone()));
            }
        }

        for ev in &self.event_types {
            if ev.rates.len() != self.setting_count {
                return Err(ProfileError::RateTableLength {
                    id: ev.id.clone(),
                    got: ev.rates.len(),
                    want: self.setting_count,
                });
            }
            if !ev.weight.is_finite() {
                return Err(ProfileError::BadWeight { id: ev.id.clone() });
            }
            for rival in &ev.conflicts_with {
                if !seen.contains(rival.as_str()) {
                    return Err(ProfileError::UnknownConflict {
                        id: ev.id.clone(),
                        rival: rival.clone(),
                    });
                }
            }
            if let Some(policy) = &ev.weight_policy {
                if !self.weight_policies.contains_key(policy) {
                    return Err(ProfileError::UnknownPolicy {
                        id: ev.id.clone(),
                        policy: policy.clone(),
                    });
                }
            }
        }

        for (name, policy) in &self.weight_policies {
            match policy {
                WeightPolicy::Flat(m) => {
                    if !m.is_finite() {
                        return Err(ProfileError::BadMultiplier(name.clone()));
                    }
                }
                WeightPolicy::Table(points) => {
                    if points.is_empty() {
                        return Err(ProfileError::EmptyBreakpoints(name.clone()));
                    }
                    if points.windows(2).any(|w| w[0].trials >= w[1].trials) {
                        return Err(ProfileError::UnsortedBreakpoints(name.clone()));
                    }
                    if points.iter().any(|p| !p.multiplier.is_finite()) {
                        return Err(ProfileError::BadMultiplier(name.clone()));
                    }
                }
            }
        }

        for rule in &self.forced_overrides {
            if !seen.contains(rule.trigger.as_str()) {
                return Err(ProfileError::UnknownOverrideTrigger(rule.trigger.clone()));
            }
            self.check_setting(rule.setting)?;
        }
        for tier in &self.denial_ladder {
            if !seen.contains(tier.trigger.as_str()) {
                return Err(ProfileError::UnknownDenialTrigger(tier.trigger.clone()));
            }
            for &s in &tier.deny {
                self.check_setting(s)?;
            }
        }

        Ok(())
    }

    fn check_setting(&self, s: Setting) -> Result<(), ProfileError> {
        if s == 0 || s as usize > self.setting_count {
            return Err(ProfileError::BadSettingRef(s));
        }
        Ok(())
    }
}
