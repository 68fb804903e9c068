//! Per-subgroup attribute histograms
//!
//! A walk evaluates up to twenty nodes against the same subgroup. Counting
//! every attribute value once up front turns each node into a lookup.

use crate::classifier::label::RepeatCycleLabel;
use crate::index::condition::AttributeCondition;
use crate::model::{OrbitClasses, OrbitType};

/// Attribute histograms for one subgroup of missions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubgroupProfile {
    members: usize,
    geostationary: usize,
    sun_synchronous: usize,
    inclined_non_sso: usize,
    highly_elliptical: usize,
    inclination: [usize; 5],
    altitude: [usize; 5],
    lst: [usize; 4],
    repeat_cycle: [usize; 3],
}

impl SubgroupProfile {
    /// Aggregate the histograms of the given missions in one pass
    pub fn from_attrs<'a>(attrs: impl IntoIterator<Item = &'a OrbitClasses>) -> Self {
        let mut profile = Self::default();
        for a in attrs {
            profile.members += 1;
            match &a.orbit_type {
                Some(OrbitType::Geostationary) => profile.geostationary += 1,
                Some(OrbitType::SunSynchronous) => profile.sun_synchronous += 1,
                Some(OrbitType::InclinedNonSunSynchronous) => profile.inclined_non_sso += 1,
                Some(OrbitType::HighlyElliptical) => profile.highly_elliptical += 1,
                _ => {}
            }
            if let Some(class) = a.inclination {
                profile.inclination[class.index()] += 1;
            }
            if let Some(class) = a.altitude {
                profile.altitude[class.index()] += 1;
            }
            if let Some(class) = a.lst {
                profile.lst[class.index()] += 1;
            }
            profile.repeat_cycle[RepeatCycleLabel::of(a.repeat_cycle).index()] += 1;
        }
        profile
    }

    /// Number of missions in the subgroup
    pub fn members(&self) -> usize {
        self.members
    }

    pub fn is_empty(&self) -> bool {
        self.members == 0
    }

    /// Number of subgroup missions matching `condition`
    pub fn count(&self, condition: AttributeCondition) -> usize {
        match condition {
            AttributeCondition::Geostationary => self.geostationary,
            AttributeCondition::LowEarth => self.sun_synchronous + self.inclined_non_sso,
            AttributeCondition::HighlyElliptical => self.highly_elliptical,
            AttributeCondition::SunSynchronous => self.sun_synchronous,
            AttributeCondition::Inclination(class) => self.inclination[class.index()],
            AttributeCondition::Altitude(class) => self.altitude[class.index()],
            AttributeCondition::Lst(class) => self.lst[class.index()],
            AttributeCondition::RepeatCycle(label) => self.repeat_cycle[label.index()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AltitudeClass, InclinationClass, LstClass, RepeatCycleClass};

    fn attrs(orbit_type: OrbitType, altitude: AltitudeClass) -> OrbitClasses {
        OrbitClasses {
            orbit_type: Some(orbit_type),
            inclination: Some(InclinationClass::NearPolar),
            altitude: Some(altitude),
            lst: Some(LstClass::Am),
            repeat_cycle: None,
        }
    }

    #[test]
    fn test_empty_profile() {
        let profile = SubgroupProfile::from_attrs(std::iter::empty());
        assert!(profile.is_empty());
        assert_eq!(profile.count(AttributeCondition::LowEarth), 0);
    }

    #[test]
    fn test_histogram_counts() {
        let missions = [
            attrs(OrbitType::SunSynchronous, AltitudeClass::High),
            attrs(OrbitType::InclinedNonSunSynchronous, AltitudeClass::High),
            attrs(OrbitType::Geostationary, AltitudeClass::VeryHigh),
        ];
        let profile = SubgroupProfile::from_attrs(missions.iter());

        assert_eq!(profile.members(), 3);
        assert_eq!(profile.count(AttributeCondition::LowEarth), 2);
        assert_eq!(profile.count(AttributeCondition::SunSynchronous), 1);
        assert_eq!(profile.count(AttributeCondition::Geostationary), 1);
        assert_eq!(
            profile.count(AttributeCondition::Altitude(AltitudeClass::High)),
            2
        );
        assert_eq!(
            profile.count(AttributeCondition::Inclination(InclinationClass::NearPolar)),
            3
        );
        assert_eq!(
            profile.count(AttributeCondition::RepeatCycle(RepeatCycleLabel::NoRepeatCycle)),
            3
        );
        assert_eq!(
            profile.count(AttributeCondition::RepeatCycle(RepeatCycleLabel::of(Some(
                RepeatCycleClass::Long
            )))),
            0
        );
    }
}
