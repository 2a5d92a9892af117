//! Relationship links
//!
//! Directional trust state between the two endpoints of one graph edge.
//! Every map is keyed by the *holder* of the opinion: `trust_mean[A]` is A's
//! trust toward the other endpoint.

use game_events::{ContestantId, LinkSnapshot};
use rand::rngs::SmallRng;
use rand_distr::{Distribution, Normal};
use std::collections::BTreeMap;

use crate::error::{GameError, Result};

/// Trust change applied by a single interaction effect
pub const TRUST_UNIT: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipLink {
    endpoints: (ContestantId, ContestantId),
    trust_mean: BTreeMap<ContestantId, f64>,
    /// 0 means the mean is used directly
    trust_var: BTreeMap<ContestantId, f64>,
    /// Per-trial sample, only present between `sample` and `clear_realized`
    realized_trust: BTreeMap<ContestantId, Option<f64>>,
}

impl RelationshipLink {
    pub fn new(a: ContestantId, b: ContestantId) -> Self {
        let both = |value| BTreeMap::from([(a.clone(), value), (b.clone(), value)]);
        Self {
            trust_mean: both(0.0),
            trust_var: both(0.0),
            realized_trust: BTreeMap::from([(a.clone(), None), (b.clone(), None)]),
            endpoints: (a, b),
        }
    }

    pub fn endpoints(&self) -> (&ContestantId, &ContestantId) {
        (&self.endpoints.0, &self.endpoints.1)
    }

    pub fn involves(&self, id: &ContestantId) -> bool {
        &self.endpoints.0 == id || &self.endpoints.1 == id
    }

    /// The endpoint that is not `holder`
    pub fn other(&self, holder: &ContestantId) -> Result<&ContestantId> {
        if &self.endpoints.0 == holder {
            Ok(&self.endpoints.1)
        } else if &self.endpoints.1 == holder {
            Ok(&self.endpoints.0)
        } else {
            Err(GameError::NotFound(holder.clone()))
        }
    }

    pub fn trust_mean(&self, holder: &ContestantId) -> Result<f64> {
        self.trust_mean
            .get(holder)
            .copied()
            .ok_or_else(|| GameError::NotFound(holder.clone()))
    }

    pub fn trust_var(&self, holder: &ContestantId) -> Result<f64> {
        self.trust_var
            .get(holder)
            .copied()
            .ok_or_else(|| GameError::NotFound(holder.clone()))
    }

    pub fn realized_trust(&self, holder: &ContestantId) -> Option<f64> {
        self.realized_trust.get(holder).copied().flatten()
    }

    pub fn set_trust_mean(&mut self, holder: &ContestantId, value: f64) -> Result<()> {
        *self.mean_entry(holder)? = value;
        Ok(())
    }

    /// Shift `holder`'s trust toward the other endpoint, returning the new mean
    pub fn adjust_trust(&mut self, holder: &ContestantId, delta: f64) -> Result<f64> {
        let mean = self.mean_entry(holder)?;
        *mean += delta;
        Ok(*mean)
    }

    pub fn set_trust_var(&mut self, holder: &ContestantId, variance: f64) -> Result<()> {
        if !variance.is_finite() || variance < 0.0 {
            return Err(GameError::InvalidDistribution(format!(
                "variance {} for {}",
                variance, holder
            )));
        }
        let var = self
            .trust_var
            .get_mut(holder)
            .ok_or_else(|| GameError::NotFound(holder.clone()))?;
        *var = variance;
        Ok(())
    }

    /// Trust as seen by a vote: the realized sample when the value is
    /// uncertain, the mean otherwise.
    pub fn effective_trust(&self, holder: &ContestantId) -> Result<f64> {
        if self.trust_var(holder)? == 0.0 {
            return self.trust_mean(holder);
        }
        self.realized_trust(holder)
            .ok_or_else(|| GameError::PreconditionViolation {
                holder: holder.clone(),
                other: self.other(holder).cloned().unwrap_or_else(|_| holder.clone()),
            })
    }

    /// Draw realized trust for every uncertain direction.
    pub fn sample(&mut self, rng: &mut SmallRng) -> Result<()> {
        for (holder, variance) in &self.trust_var {
            if *variance == 0.0 {
                continue;
            }
            let mean = self.trust_mean.get(holder).copied().unwrap_or_default();
            let normal = Normal::new(mean, variance.sqrt())
                .map_err(|e| GameError::InvalidDistribution(e.to_string()))?;
            self.realized_trust
                .insert(holder.clone(), Some(normal.sample(rng)));
        }
        Ok(())
    }

    pub fn clear_realized(&mut self) {
        for realized in self.realized_trust.values_mut() {
            *realized = None;
        }
    }

    pub fn has_realized(&self) -> bool {
        self.realized_trust.values().any(Option::is_some)
    }

    pub fn snapshot(&self) -> LinkSnapshot {
        LinkSnapshot {
            a: self.endpoints.0.clone(),
            b: self.endpoints.1.clone(),
            trust_mean: self.trust_mean.clone(),
            trust_var: self.trust_var.clone(),
        }
    }

    fn mean_entry(&mut self, holder: &ContestantId) -> Result<&mut f64> {
        self.trust_mean
            .get_mut(holder)
            .ok_or_else(|| GameError::NotFound(holder.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn link() -> (RelationshipLink, ContestantId, ContestantId) {
        let filip = ContestantId::from("Filip");
        let kipp = ContestantId::from("Kipp");
        (RelationshipLink::new(filip.clone(), kipp.clone()), filip, kipp)
    }

    #[test]
    fn test_new_link_has_both_directions() {
        let (link, filip, kipp) = link();
        assert_eq!(link.trust_mean(&filip).unwrap(), 0.0);
        assert_eq!(link.trust_mean(&kipp).unwrap(), 0.0);
        assert_eq!(link.trust_var(&filip).unwrap(), 0.0);
        assert!(link.realized_trust(&kipp).is_none());
        assert_eq!(link.other(&filip).unwrap(), &kipp);
    }

    #[test]
    fn test_adjust_is_directional_and_unclamped() {
        let (mut link, filip, kipp) = link();
        link.adjust_trust(&kipp, -TRUST_UNIT).unwrap();
        link.adjust_trust(&kipp, -TRUST_UNIT).unwrap();

        assert_eq!(link.trust_mean(&kipp).unwrap(), -2.0);
        assert_eq!(link.trust_mean(&filip).unwrap(), 0.0);
    }

    #[test]
    fn test_unknown_holder_is_not_found() {
        let (mut link, _, _) = link();
        let stranger = ContestantId::from("Stranger");
        assert!(matches!(
            link.adjust_trust(&stranger, 1.0),
            Err(GameError::NotFound(_))
        ));
    }

    #[test]
    fn test_effective_trust_requires_sample_when_uncertain() {
        let (mut link, filip, kipp) = link();
        link.set_trust_mean(&filip, 2.0).unwrap();
        assert_eq!(link.effective_trust(&filip).unwrap(), 2.0);

        link.set_trust_var(&filip, 1.0).unwrap();
        assert!(matches!(
            link.effective_trust(&filip),
            Err(GameError::PreconditionViolation { ref other, .. }) if other == &kipp
        ));

        let mut rng = SmallRng::seed_from_u64(3);
        link.sample(&mut rng).unwrap();
        assert!(link.effective_trust(&filip).is_ok());
        // Deterministic direction is never sampled
        assert!(link.realized_trust(&kipp).is_none());

        link.clear_realized();
        assert!(!link.has_realized());
    }

    #[test]
    fn test_negative_variance_rejected() {
        let (mut link, filip, _) = link();
        assert!(matches!(
            link.set_trust_var(&filip, -0.5),
            Err(GameError::InvalidDistribution(_))
        ));
    }

    #[test]
    fn test_samples_center_on_mean() {
        let (mut link, filip, _) = link();
        link.set_trust_mean(&filip, 3.0).unwrap();
        link.set_trust_var(&filip, 0.25).unwrap();

        let mut rng = SmallRng::seed_from_u64(11);
        let n = 2000;
        let mut total = 0.0;
        for _ in 0..n {
            link.sample(&mut rng).unwrap();
            total += link.effective_trust(&filip).unwrap();
        }
        let mean = total / n as f64;
        assert!((mean - 3.0).abs() < 0.1, "sample mean {} too far from 3.0", mean);
    }
}
