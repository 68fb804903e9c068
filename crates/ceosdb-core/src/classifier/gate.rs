//! Confidence gate
//!
//! A node of the orbit taxonomy is admitted for a subgroup when enough of the
//! whole population shares the attribute (support) and more than half of the
//! subgroup does (confidence):
//!
//! ```text
//! support    = intersection / population
//! confidence = intersection / subgroup
//! admit      = support > min_support_count / population
//!              && confidence > min_confidence
//! ```
//!
//! With the default thresholds the support test reduces to "more than ten
//! intersecting missions", independent of population size.

use serde::{Deserialize, Serialize};

/// Gate thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateThresholds {
    /// Minimum number of intersecting missions, expressed as a count
    pub min_support_count: f64,
    /// Minimum fraction of the subgroup sharing the attribute
    pub min_confidence: f64,
}

impl Default for GateThresholds {
    fn default() -> Self {
        Self {
            min_support_count: 10.0,
            min_confidence: 0.5,
        }
    }
}

/// The three counts a gate decision depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateCounts {
    pub population: usize,
    pub subgroup: usize,
    pub intersection: usize,
}

impl GateCounts {
    pub fn new(population: usize, subgroup: usize, intersection: usize) -> Self {
        Self {
            population,
            subgroup,
            intersection,
        }
    }

    /// `intersection / population`, 0 for an empty population
    pub fn support(&self) -> f64 {
        ratio(self.intersection, self.population)
    }

    /// `intersection / subgroup`, 0 for an empty subgroup
    pub fn confidence(&self) -> f64 {
        ratio(self.intersection, self.subgroup)
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

impl GateThresholds {
    /// Decide whether a node is admitted
    ///
    /// An empty population never admits anything.
    pub fn admit(&self, counts: GateCounts) -> bool {
        if counts.population == 0 {
            return false;
        }
        let min_support = self.min_support_count / counts.population as f64;
        counts.support() > min_support && counts.confidence() > self.min_confidence
    }
}

/// Gate decision with the default thresholds
pub fn admit(population: usize, subgroup: usize, intersection: usize) -> bool {
    GateThresholds::default().admit(GateCounts::new(population, subgroup, intersection))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_worked_examples() {
        assert!(admit(100, 20, 15));
        assert!(!admit(100, 20, 10));
        assert!(!admit(1000, 40, 18));
        assert!(admit(1000, 40, 21));
        assert!(!admit(0, 0, 0));
    }

    #[test]
    fn test_empty_subgroup_is_rejected() {
        assert!(!admit(50, 0, 0));
    }

    #[test]
    fn test_exactly_half_is_rejected() {
        assert!(!admit(100, 30, 15));
        assert!(admit(100, 29, 15));
    }

    #[test]
    fn test_custom_thresholds() {
        let gate = GateThresholds {
            min_support_count: 2.0,
            min_confidence: 0.25,
        };
        assert!(gate.admit(GateCounts::new(10, 8, 3)));
        assert!(!gate.admit(GateCounts::new(10, 8, 2)));
    }

    #[test]
    fn test_ratios_with_empty_denominators() {
        let counts = GateCounts::new(0, 0, 0);
        assert_eq!(counts.support(), 0.0);
        assert_eq!(counts.confidence(), 0.0);
    }

    proptest! {
        #[test]
        fn prop_default_gate_needs_more_than_ten(
            population in 1usize..5000,
            subgroup in 0usize..500,
            intersection in 0usize..500,
        ) {
            let subgroup = subgroup.min(population);
            let intersection = intersection.min(subgroup);
            let expected = intersection > 10 && 2 * intersection > subgroup;
            prop_assert_eq!(admit(population, subgroup, intersection), expected);
        }

        #[test]
        fn prop_empty_population_never_admits(subgroup in 0usize..100, intersection in 0usize..100) {
            prop_assert!(!admit(0, subgroup, intersection));
        }
    }
}
