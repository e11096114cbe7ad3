use std::sync::Arc;
use std::time::Duration;

use crate::dataset::Dataset;
use crate::entities::{Profile, Signature};
use crate::error::Result;
use crate::matcher::strategy::Strategy;

/// The outcome of matching one User-Agent against a dataset. The matcher
/// never returns an error for "no signature applies" — that case is the
/// default signature with `strategy = Strategy::None`. Cheaply `Clone`
/// (everything inside is an `Arc` or `Copy`), so `Provider`'s result cache
/// can hand out copies without re-running a match.
#[derive(Clone)]
pub struct MatchResult {
    pub(crate) dataset: Arc<Dataset>,
    pub signature: Arc<Signature>,
    pub profiles: Vec<Arc<Profile>>,
    pub strategy: Strategy,
    pub difference: i64,
    pub lowest_score: i64,
    pub nodes_evaluated: u64,
    pub signatures_compared: u64,
    pub elapsed: Duration,
    pub is_complete: bool,
}

impl MatchResult {
    /// `-`-joined ProfileIds in ascending ComponentId order (invariant 4),
    /// computed from this result's own `profiles` rather than delegating to
    /// `Signature::device_id` — so a profile-override applied by
    /// `Provider::match_headers` (§4.I) is reflected without mutating the
    /// shared, memoized `Signature`.
    pub fn device_id(&self) -> Result<Arc<str>> {
        let mut profiles = self.profiles.clone();
        profiles.sort_by_key(|p| p.component_id);
        Ok(profiles.iter().map(|p| p.profile_id.to_string()).collect::<Vec<_>>().join("-").into())
    }

    /// Resolves the string value(s) of a named property for this match.
    /// Returns `None` if the property name is unknown or has no value set
    /// on any of this match's profiles (absence is not an error, §4.I).
    pub fn values(&self, name: &str) -> Result<Option<Vec<String>>> {
        let Some((property_index, _)) = self.dataset.property_by_name(name) else {
            return Ok(None);
        };
        let property = self.dataset.property_at_index(property_index)?;

        for profile in &self.profiles {
            if profile.component_id != property.component_id {
                continue;
            }
            let mut out = Vec::new();
            for &value_index in &profile.value_indices {
                let value = self.dataset.value_at_index(value_index)?;
                if value.property_index == property_index {
                    out.push(self.dataset.string_at(value.name_offset as u64)?.text.clone());
                }
            }
            if !out.is_empty() {
                return Ok(Some(out));
            }
        }
        Ok(None)
    }
}
