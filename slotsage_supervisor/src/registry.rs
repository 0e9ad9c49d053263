//! Machine profile registry.
//!
//! Owns validated `Profile`s keyed by machine id and runs estimations
//! against them. Profiles are validated exactly once at insertion so the
//! per-keystroke estimation path never re-checks or fails on profile
//! structure.
//!
//! No IO: JSON ingestion takes a string the caller already loaded.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use slotsage_core::{estimate, Observation, Profile, ProfileError, SettingEstimate};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("no profile registered for machine `{0}`")]
    UnknownMachine(String),
    #[error("invalid profile: {0}")]
    InvalidProfile(#[from] ProfileError),
    #[error("malformed profile JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One estimation outcome with enough context to log, chart, or persist.
///
/// Pure data: callers decide how/where to store it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EstimateReport {
    pub machine_id: String,
    pub total_trials: u32,
    pub estimates: Vec<SettingEstimate>,
}

/// Registry of validated machine profiles.
#[derive(Debug, Default)]
pub struct ProfileRegistry {
    profiles: HashMap<String, Profile>,
}

impl ProfileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a profile after validating it. Replaces any existing profile
    /// for the same machine id.
    pub fn insert(
        &mut self,
        machine_id: impl Into<String>,
        profile: Profile,
    ) -> Result<(), RegistryError> {
        profile.validate()?;
        let machine_id = machine_id.into();
        log::debug!(
            "registered profile `{}` ({} event types, {} settings)",
            machine_id,
            profile.event_types.len(),
            profile.setting_count
        );
        self.profiles.insert(machine_id, profile);
        Ok(())
    }

    /// Parse a JSON profile and insert it.
    pub fn insert_json(
        &mut self,
        machine_id: impl Into<String>,
        json: &str,
    ) -> Result<(), RegistryError> {
        let profile: Profile = serde_json::from_str(json)?;
        self.insert(machine_id, profile)
    }

    pub fn get(&self, machine_id: &str) -> Option<&Profile> {
        self.profiles.get(machine_id)
    }

    pub fn remove(&mut self, machine_id: &str) -> Option<Profile> {
        self.profiles.remove(machine_id)
    }

    /// Registered machine ids, sorted for deterministic ordering.
    pub fn machine_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.profiles.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Run one estimation against a registered machine's profile.
    pub fn estimate(
        &self,
        machine_id: &str,
        obs: &Observation,
    ) -> Result<Vec<SettingEstimate>, RegistryError> {
        let profile = self
            .profiles
            .get(machine_id)
            .ok_or_else(|| RegistryError::UnknownMachine(machine_id.to_string()))?;
        let result = estimate(profile, obs);
        log::debug!(
            "estimated `{}` over {} trials: top {:?}",
            machine_id,
            obs.total_trials,
            result
                .iter()
                .max_by(|a, b| a.percent.total_cmp(&b.percent))
        );
        Ok(result)
    }

    /// Like `estimate`, wrapped with the context a frontend or log sink
    /// usually wants alongside the distribution.
    pub fn report(
        &self,
        machine_id: &str,
        obs: &Observation,
    ) -> Result<EstimateReport, RegistryError> {
        let estimates = self.estimate(machine_id, obs)?;
        Ok(EstimateReport {
            machine_id: machine_id.to_string(),
            total_trials: obs.total_trials,
            estimates,
        })
    }
}
