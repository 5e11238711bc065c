//! Rank ladder and tier classification
//!
//! A ladder is a fixed, ordered list of tiers. Thresholds are inclusive lower
//! bounds: a total equal to a tier's `min_points` has attained that tier.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A named achievement level unlocked at a point threshold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankTier {
    /// Display label, unique within a ladder
    pub name: String,
    /// Inclusive threshold at which the tier is attained
    pub min_points: u64,
}

impl RankTier {
    pub fn new(name: impl Into<String>, min_points: u64) -> Self {
        Self {
            name: name.into(),
            min_points,
        }
    }
}

/// Where a total sits on the ladder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankProgress {
    pub current: RankTier,
    pub next: Option<RankTier>,
    /// Fraction of the way from `current` to `next`, in [0, 1]
    pub progress: f32,
}

impl RankProgress {
    /// Points still needed to reach the next tier (0 at the top of the ladder)
    pub fn points_to_next(&self, total: u64) -> u64 {
        self.next
            .as_ref()
            .map(|next| next.min_points.saturating_sub(total))
            .unwrap_or(0)
    }

    pub fn is_max_rank(&self) -> bool {
        self.next.is_none()
    }
}

/// One entry of the milestone strip shown under the iceberg
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub tier: RankTier,
    pub achieved: bool,
    pub current: bool,
}

/// Classify `total` against an ordered tier table.
///
/// # Panics
///
/// Panics if `tiers` is empty or not strictly ascending by `min_points`.
/// A validated [`RankLadder`] never trips either check.
pub fn classify(total: u64, tiers: &[RankTier]) -> RankProgress {
    assert!(!tiers.is_empty(), "rank ladder must not be empty");
    assert!(
        tiers.windows(2).all(|w| w[0].min_points < w[1].min_points),
        "rank ladder must be strictly ascending"
    );

    // Index of the greatest tier whose threshold is <= total. A total below
    // the first threshold still maps to the first tier.
    let index = tiers
        .partition_point(|tier| tier.min_points <= total)
        .saturating_sub(1);

    let current = &tiers[index];
    let next = tiers.get(index + 1);

    let progress = match next {
        Some(next) => {
            let span = (next.min_points - current.min_points) as f64;
            let covered = total.saturating_sub(current.min_points) as f64;
            ((covered / span) as f32).clamp(0.0, 1.0)
        }
        None => 1.0,
    };

    RankProgress {
        current: current.clone(),
        next: next.cloned(),
        progress,
    }
}

/// Validated, immutable tier table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankLadder {
    tiers: Vec<RankTier>,
}

impl RankLadder {
    /// Validate a tier table
    pub fn new(tiers: Vec<RankTier>) -> Result<Self, ConfigError> {
        let first = tiers.first().ok_or(ConfigError::EmptyLadder)?;
        if first.min_points != 0 {
            return Err(ConfigError::FirstTierNotZero {
                name: first.name.clone(),
                min_points: first.min_points,
            });
        }

        for pair in tiers.windows(2) {
            if pair[1].min_points <= pair[0].min_points {
                return Err(ConfigError::UnsortedLadder {
                    name: pair[1].name.clone(),
                    min_points: pair[1].min_points,
                    previous: pair[0].min_points,
                });
            }
        }

        for (i, tier) in tiers.iter().enumerate() {
            if tiers[..i].iter().any(|t| t.name == tier.name) {
                return Err(ConfigError::DuplicateTier(tier.name.clone()));
            }
        }

        Ok(Self { tiers })
    }

    pub fn tiers(&self) -> &[RankTier] {
        &self.tiers
    }

    pub fn classify(&self, total: u64) -> RankProgress {
        classify(total, &self.tiers)
    }

    /// Achieved/current flags for every tier, in ladder order
    pub fn milestones(&self, total: u64) -> Vec<Milestone> {
        let current = self.classify(total).current;
        self.tiers
            .iter()
            .map(|tier| Milestone {
                tier: tier.clone(),
                achieved: total >= tier.min_points,
                current: tier.name == current.name,
            })
            .collect()
    }

    /// Highest threshold on the ladder
    pub fn top_threshold(&self) -> u64 {
        self.tiers.last().map(|t| t.min_points).unwrap_or(0)
    }
}

/// Ladder used when the config does not provide one
pub fn default_tiers() -> Vec<RankTier> {
    vec![
        RankTier::new("Novice", 0),
        RankTier::new("Apprentice", 250),
        RankTier::new("Explorer", 600),
        RankTier::new("Achiever", 1000),
        RankTier::new("Expert", 1500),
        RankTier::new("Master", 2200),
        RankTier::new("Legend", 3000),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metals() -> Vec<RankTier> {
        vec![
            RankTier::new("Bronze", 0),
            RankTier::new("Silver", 500),
            RankTier::new("Gold", 1500),
        ]
    }

    #[test]
    fn test_classify_midway() {
        let rank = classify(1000, &metals());
        assert_eq!(rank.current.name, "Silver");
        assert_eq!(rank.next.as_ref().map(|t| t.name.as_str()), Some("Gold"));
        assert!((rank.progress - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_classify_threshold_is_inclusive() {
        let tiers = metals();
        for tier in &tiers {
            assert_eq!(classify(tier.min_points, &tiers).current.name, tier.name);
        }
        assert_eq!(classify(499, &tiers).current.name, "Bronze");
        assert_eq!(classify(0, &tiers).progress, 0.0);
    }

    #[test]
    fn test_classify_last_tier() {
        let rank = classify(99_999, &metals());
        assert_eq!(rank.current.name, "Gold");
        assert!(rank.next.is_none());
        assert_eq!(rank.progress, 1.0);
        assert!(rank.is_max_rank());
        assert_eq!(rank.points_to_next(99_999), 0);
    }

    #[test]
    fn test_classify_single_tier() {
        let tiers = vec![RankTier::new("Only", 0)];
        let rank = classify(42, &tiers);
        assert_eq!(rank.current.name, "Only");
        assert_eq!(rank.progress, 1.0);
    }

    #[test]
    fn test_points_to_next() {
        let rank = classify(1000, &metals());
        assert_eq!(rank.points_to_next(1000), 500);
    }

    #[test]
    #[should_panic(expected = "must not be empty")]
    fn test_classify_empty_panics() {
        classify(10, &[]);
    }

    #[test]
    #[should_panic(expected = "strictly ascending")]
    fn test_classify_unsorted_panics() {
        let tiers = vec![RankTier::new("A", 0), RankTier::new("B", 10), RankTier::new("C", 5)];
        classify(7, &tiers);
    }

    #[test]
    fn test_ladder_validation() {
        assert!(matches!(RankLadder::new(vec![]), Err(ConfigError::EmptyLadder)));
        assert!(matches!(
            RankLadder::new(vec![RankTier::new("A", 10)]),
            Err(ConfigError::FirstTierNotZero { .. })
        ));
        assert!(matches!(
            RankLadder::new(vec![RankTier::new("A", 0), RankTier::new("B", 0)]),
            Err(ConfigError::UnsortedLadder { .. })
        ));
        assert!(matches!(
            RankLadder::new(vec![RankTier::new("A", 0), RankTier::new("A", 5)]),
            Err(ConfigError::DuplicateTier(_))
        ));
        assert!(RankLadder::new(default_tiers()).is_ok());
    }

    #[test]
    fn test_milestones() {
        let ladder = RankLadder::new(metals()).unwrap();
        let milestones = ladder.milestones(700);
        assert_eq!(milestones.len(), 3);
        assert!(milestones[0].achieved && !milestones[0].current);
        assert!(milestones[1].achieved && milestones[1].current);
        assert!(!milestones[2].achieved && !milestones[2].current);
        assert_eq!(ladder.top_threshold(), 1500);
    }
}
