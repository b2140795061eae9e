//! Weighted outcome tables for the two primary actions.
//!
//! Probabilities are depth-independent; exactly one branch executes per
//! action and there are no retries.

use rand::Rng;

use crate::constants::{
    DESCEND_ATMOSPHERE_MAX, DESCEND_GOLD_MAX, DESCEND_SCAVENGE_MAX, DESCEND_TREASURE_MAX,
    EXPLORE_COST_DEPTH_DIVISOR, EXPLORE_LOOT_MAX, EXPLORE_NOTHING_MAX,
};

/// Branches of the primary descend action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescendOutcome {
    Atmosphere,
    Gold,
    Scavenge,
    Treasure,
    Combat,
}

/// Branches of the secondary explore action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExploreOutcome {
    Loot,
    Nothing,
    Combat,
}

/// Draw a uniform 1-100 roll from the given stream.
pub fn percentile_roll<R: Rng>(rng: &mut R) -> u32 {
    rng.random_range(1..=100)
}

/// Map a 1-100 roll onto the five-way descend split.
#[must_use]
pub const fn roll_descend(roll: u32) -> DescendOutcome {
    if roll <= DESCEND_ATMOSPHERE_MAX {
        DescendOutcome::Atmosphere
    } else if roll <= DESCEND_GOLD_MAX {
        DescendOutcome::Gold
    } else if roll <= DESCEND_SCAVENGE_MAX {
        DescendOutcome::Scavenge
    } else if roll <= DESCEND_TREASURE_MAX {
        DescendOutcome::Treasure
    } else {
        DescendOutcome::Combat
    }
}

/// Map a 1-100 roll onto the three-way explore split.
#[must_use]
pub const fn roll_explore(roll: u32) -> ExploreOutcome {
    if roll <= EXPLORE_LOOT_MAX {
        ExploreOutcome::Loot
    } else if roll <= EXPLORE_NOTHING_MAX {
        ExploreOutcome::Nothing
    } else {
        ExploreOutcome::Combat
    }
}

/// Depth-scaled stamina cost of an explore action: `max(1, depth / 1000)`.
#[must_use]
pub const fn explore_cost(depth: i32) -> i32 {
    let scaled = depth / EXPLORE_COST_DEPTH_DIVISOR;
    if scaled < 1 { 1 } else { scaled }
}

pub(crate) const ATMOSPHERE_LINES: [&str; 8] = [
    "The path is silent.",
    "Water drips somewhere far above.",
    "Your torchlight gutters in a draft that smells of rust.",
    "Something skitters away at the edge of hearing.",
    "The walls here are carved with symbols no one remembers.",
    "A cold current washes over you and is gone.",
    "You pass the bones of something enormous, long dead.",
    "For a moment the dark feels almost gentle.",
];

/// One flavor line for an uneventful step.
pub(crate) fn atmosphere_line<R: Rng>(rng: &mut R) -> &'static str {
    let idx = rng.random_range(0..ATMOSPHERE_LINES.len());
    ATMOSPHERE_LINES[idx]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn descend_split_boundaries() {
        assert_eq!(roll_descend(1), DescendOutcome::Atmosphere);
        assert_eq!(roll_descend(40), DescendOutcome::Atmosphere);
        assert_eq!(roll_descend(41), DescendOutcome::Gold);
        assert_eq!(roll_descend(70), DescendOutcome::Gold);
        assert_eq!(roll_descend(71), DescendOutcome::Scavenge);
        assert_eq!(roll_descend(85), DescendOutcome::Scavenge);
        assert_eq!(roll_descend(86), DescendOutcome::Treasure);
        assert_eq!(roll_descend(90), DescendOutcome::Treasure);
        assert_eq!(roll_descend(91), DescendOutcome::Combat);
        assert_eq!(roll_descend(100), DescendOutcome::Combat);
    }

    #[test]
    fn explore_split_boundaries() {
        assert_eq!(roll_explore(1), ExploreOutcome::Loot);
        assert_eq!(roll_explore(60), ExploreOutcome::Loot);
        assert_eq!(roll_explore(61), ExploreOutcome::Nothing);
        assert_eq!(roll_explore(80), ExploreOutcome::Nothing);
        assert_eq!(roll_explore(81), ExploreOutcome::Combat);
        assert_eq!(roll_explore(100), ExploreOutcome::Combat);
    }

    #[test]
    fn explore_cost_scales_with_depth() {
        assert_eq!(explore_cost(0), 1);
        assert_eq!(explore_cost(999), 1);
        assert_eq!(explore_cost(1_000), 1);
        assert_eq!(explore_cost(2_000), 2);
        assert_eq!(explore_cost(5_500), 5);
    }

    #[test]
    fn percentile_roll_stays_in_range() {
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..200 {
            let roll = percentile_roll(&mut rng);
            assert!((1..=100).contains(&roll));
        }
    }
}
