use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::derive;
use super::orbit::{AltitudeClass, InclinationClass, LstClass, OrbitType, RepeatCycleClass};

/// Mission - one platform record from the handbook
///
/// Carries the raw orbit values as published and the categorical classes
/// derived from them. The classifier only reads the classes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    /// Handbook mission id
    pub id: i64,

    /// Short name
    pub name: String,

    pub full_name: Option<String>,
    pub status: Option<String>,
    pub launch_date: Option<NaiveDate>,
    pub eol_date: Option<NaiveDate>,
    pub applications: Option<String>,

    /// Owning agencies
    pub agency_ids: Vec<i64>,

    /// Raw orbit values
    pub orbit: OrbitDetails,

    /// Categorical orbit attributes
    pub classes: OrbitClasses,
}

/// Raw orbit values as published
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrbitDetails {
    pub orbit_type: Option<OrbitType>,
    pub period: Option<String>,
    pub sense: Option<String>,
    pub inclination_deg: Option<f64>,
    pub altitude_km: Option<f64>,
    pub longitude: Option<String>,
    pub lst: Option<NaiveTime>,
    pub repeat_cycle_days: Option<f64>,
}

/// Categorical orbit attributes, all nullable
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrbitClasses {
    pub orbit_type: Option<OrbitType>,
    pub inclination: Option<InclinationClass>,
    pub altitude: Option<AltitudeClass>,
    pub lst: Option<LstClass>,
    /// `None` means the mission has no repeat cycle
    pub repeat_cycle: Option<RepeatCycleClass>,
}

impl OrbitDetails {
    /// Derive the categorical classes from these raw values
    pub fn derive_classes(&self) -> OrbitClasses {
        OrbitClasses {
            orbit_type: self.orbit_type.clone(),
            inclination: self.inclination_deg.map(derive::inclination_class),
            altitude: self.altitude_km.map(derive::altitude_class),
            lst: self.lst.and_then(derive::lst_class),
            repeat_cycle: self.repeat_cycle_days.map(derive::repeat_cycle_class),
        }
    }
}

impl Mission {
    /// Create a mission with no orbit data
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            full_name: None,
            status: None,
            launch_date: None,
            eol_date: None,
            applications: None,
            agency_ids: Vec::new(),
            orbit: OrbitDetails::default(),
            classes: OrbitClasses::default(),
        }
    }

    /// Set raw orbit values and re-derive the classes from them
    pub fn with_orbit(mut self, orbit: OrbitDetails) -> Self {
        self.classes = orbit.derive_classes();
        self.orbit = orbit;
        self
    }

    /// Set the classes directly, leaving raw values untouched
    pub fn with_classes(mut self, classes: OrbitClasses) -> Self {
        self.classes = classes;
        self
    }

    /// Whether the mission counts towards the classifier population
    pub fn has_known_orbit_type(&self) -> bool {
        self.classes
            .orbit_type
            .as_ref()
            .is_some_and(OrbitType::is_known)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_orbit_derives_classes() {
        let mission = Mission::new(1, "SAT-1").with_orbit(OrbitDetails {
            orbit_type: Some(OrbitType::SunSynchronous),
            inclination_deg: Some(98.2),
            altitude_km: Some(705.0),
            lst: NaiveTime::from_hms_opt(10, 30, 0),
            repeat_cycle_days: Some(16.0),
            ..OrbitDetails::default()
        });

        assert_eq!(mission.classes.inclination, Some(InclinationClass::NearPolar));
        assert_eq!(mission.classes.altitude, Some(AltitudeClass::High));
        assert_eq!(mission.classes.lst, Some(LstClass::Am));
        assert_eq!(mission.classes.repeat_cycle, Some(RepeatCycleClass::Long));
        assert!(mission.has_known_orbit_type());
    }

    #[test]
    fn test_tbd_and_missing_orbit_types_are_outside_population() {
        let tbd = Mission::new(2, "TBD-SAT").with_classes(OrbitClasses {
            orbit_type: Some(OrbitType::Tbd),
            ..OrbitClasses::default()
        });
        let unknown = Mission::new(3, "NO-ORBIT");
        assert!(!tbd.has_known_orbit_type());
        assert!(!unknown.has_known_orbit_type());
    }
}
