//! Decision-tree walk over the orbit taxonomy
//!
//! ```text
//! GEO | LEO | HEO                      (last admitted wins)
//! LEO
//! ├── SSO
//! │   └── DD | AM | Noon | PM | DD     (last admitted wins)
//! └── not SSO
//!     ├── Eq | NearEq | MidLat | NearPo | Po
//!     └── VL | L | M | H | VH
//!         └── NRC | SRC | LRC
//! ```
//!
//! Every node is a marginal test: the intersection counts subgroup missions
//! matching that node's attribute alone, against a population and subgroup
//! size fixed for the whole walk.

use tracing::trace;

use crate::classifier::gate::{GateCounts, GateThresholds};
use crate::classifier::label::{AltitudeRefinement, LeoRefinement, OrbitLabel, RepeatCycleLabel};
use crate::index::{AttributeCondition, SubgroupProfile};
use crate::model::{AltitudeClass, InclinationClass, LstClass};

#[derive(Debug, Clone, Copy)]
enum TopLevel {
    Geo,
    Leo,
    Heo,
}

/// Walks the taxonomy for one subgroup at a time
#[derive(Debug, Clone, Copy)]
pub struct DecisionTreeWalker {
    thresholds: GateThresholds,
    population: usize,
}

impl DecisionTreeWalker {
    pub fn new(thresholds: GateThresholds, population: usize) -> Self {
        Self {
            thresholds,
            population,
        }
    }

    pub fn population(&self) -> usize {
        self.population
    }

    /// Most common orbit label of the subgroup, or `None` if no top-level
    /// class is admitted.
    pub fn classify(&self, profile: &SubgroupProfile) -> Option<OrbitLabel> {
        if profile.is_empty() {
            return None;
        }

        let top = self.last_admitted(
            profile,
            [
                (TopLevel::Geo, AttributeCondition::Geostationary),
                (TopLevel::Leo, AttributeCondition::LowEarth),
                (TopLevel::Heo, AttributeCondition::HighlyElliptical),
            ],
        )?;

        Some(match top {
            TopLevel::Geo => OrbitLabel::Geo,
            TopLevel::Heo => OrbitLabel::Heo,
            TopLevel::Leo => OrbitLabel::Leo(self.refine_leo(profile)),
        })
    }

    fn refine_leo(&self, profile: &SubgroupProfile) -> LeoRefinement {
        if self.admits(profile, AttributeCondition::SunSynchronous) {
            let lst = self.last_admitted(
                profile,
                LstClass::TEST_ORDER.map(|c| (c, AttributeCondition::Lst(c))),
            );
            return LeoRefinement::SunSynchronous { lst };
        }

        let inclination = self.last_admitted(
            profile,
            InclinationClass::ALL.map(|c| (c, AttributeCondition::Inclination(c))),
        );
        let altitude = self
            .last_admitted(
                profile,
                AltitudeClass::ALL.map(|c| (c, AttributeCondition::Altitude(c))),
            )
            .map(|altitude| AltitudeRefinement {
                altitude,
                repeat_cycle: self.last_admitted(
                    profile,
                    RepeatCycleLabel::ALL.map(|c| (c, AttributeCondition::RepeatCycle(c))),
                ),
            });

        LeoRefinement::NonSunSynchronous {
            inclination,
            altitude,
        }
    }

    /// Evaluate every candidate in order; a later admission overrides an
    /// earlier one.
    fn last_admitted<T, const N: usize>(
        &self,
        profile: &SubgroupProfile,
        candidates: [(T, AttributeCondition); N],
    ) -> Option<T> {
        let mut chosen = None;
        for (value, condition) in candidates {
            if self.admits(profile, condition) {
                chosen = Some(value);
            }
        }
        chosen
    }

    fn admits(&self, profile: &SubgroupProfile, condition: AttributeCondition) -> bool {
        let counts = GateCounts::new(self.population, profile.members(), profile.count(condition));
        let admitted = self.thresholds.admit(counts);
        trace!(
            ?condition,
            population = counts.population,
            subgroup = counts.subgroup,
            intersection = counts.intersection,
            admitted,
            "Gate evaluated"
        );
        admitted
    }
}
