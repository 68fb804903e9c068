//! Attribute conditions evaluated at decision-tree nodes

use crate::classifier::label::RepeatCycleLabel;
use crate::model::{AltitudeClass, InclinationClass, LstClass, OrbitClasses, OrbitType};

/// A single-attribute predicate over a mission's orbit classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeCondition {
    /// `orbit_type == Geostationary`
    Geostationary,
    /// `orbit_type` is sun-synchronous or inclined non-sun-synchronous
    LowEarth,
    /// `orbit_type == Highly elliptical`
    HighlyElliptical,
    /// `orbit_type == Sun-synchronous`
    SunSynchronous,
    Inclination(InclinationClass),
    Altitude(AltitudeClass),
    Lst(LstClass),
    RepeatCycle(RepeatCycleLabel),
}

impl AttributeCondition {
    pub fn matches(&self, attrs: &OrbitClasses) -> bool {
        match self {
            AttributeCondition::Geostationary => {
                attrs.orbit_type == Some(OrbitType::Geostationary)
            }
            AttributeCondition::LowEarth => matches!(
                attrs.orbit_type,
                Some(OrbitType::SunSynchronous) | Some(OrbitType::InclinedNonSunSynchronous)
            ),
            AttributeCondition::HighlyElliptical => {
                attrs.orbit_type == Some(OrbitType::HighlyElliptical)
            }
            AttributeCondition::SunSynchronous => {
                attrs.orbit_type == Some(OrbitType::SunSynchronous)
            }
            AttributeCondition::Inclination(class) => attrs.inclination == Some(*class),
            AttributeCondition::Altitude(class) => attrs.altitude == Some(*class),
            AttributeCondition::Lst(class) => attrs.lst == Some(*class),
            AttributeCondition::RepeatCycle(label) => label.matches(attrs.repeat_cycle),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RepeatCycleClass;

    #[test]
    fn test_low_earth_covers_both_leo_types() {
        let sso = OrbitClasses {
            orbit_type: Some(OrbitType::SunSynchronous),
            ..OrbitClasses::default()
        };
        let inclined = OrbitClasses {
            orbit_type: Some(OrbitType::InclinedNonSunSynchronous),
            ..OrbitClasses::default()
        };
        let geo = OrbitClasses {
            orbit_type: Some(OrbitType::Geostationary),
            ..OrbitClasses::default()
        };
        assert!(AttributeCondition::LowEarth.matches(&sso));
        assert!(AttributeCondition::LowEarth.matches(&inclined));
        assert!(!AttributeCondition::LowEarth.matches(&geo));
        assert!(AttributeCondition::SunSynchronous.matches(&sso));
        assert!(!AttributeCondition::SunSynchronous.matches(&inclined));
    }

    #[test]
    fn test_missing_repeat_cycle_matches_nrc() {
        let none = OrbitClasses::default();
        let short = OrbitClasses {
            repeat_cycle: Some(RepeatCycleClass::Short),
            ..OrbitClasses::default()
        };
        let nrc = AttributeCondition::RepeatCycle(RepeatCycleLabel::NoRepeatCycle);
        assert!(nrc.matches(&none));
        assert!(!nrc.matches(&short));
        assert!(AttributeCondition::RepeatCycle(RepeatCycleLabel::Short).matches(&short));
    }
}
