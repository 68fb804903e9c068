use ceosdb_core::model::{
    AltitudeClass, InclinationClass, LstClass, OrbitClasses, OrbitType, RepeatCycleClass,
};
use ceosdb_core::{Catalog, Instrument, Mission};

/// Builds catalogs mission by mission for classifier tests
#[allow(dead_code)]
pub struct CatalogBuilder {
    catalog: Catalog,
    next_mission: i64,
    next_instrument: i64,
}

#[allow(dead_code)]
impl CatalogBuilder {
    pub fn new() -> Self {
        Self {
            catalog: Catalog::new(),
            next_mission: 1,
            next_instrument: 1,
        }
    }

    /// Add `count` missions with the same classes; returns their ids
    pub fn missions(&mut self, count: usize, classes: OrbitClasses) -> Vec<i64> {
        (0..count)
            .map(|_| {
                let id = self.next_mission;
                self.next_mission += 1;
                self.catalog
                    .insert_mission(Mission::new(id, format!("SAT-{id}")).with_classes(classes.clone()));
                id
            })
            .collect()
    }

    /// Add one instrument with the given technology carried by `mission_ids`
    pub fn instrument(&mut self, technology: &str, mission_ids: &[i64]) -> i64 {
        let id = self.next_instrument;
        self.next_instrument += 1;
        self.catalog.insert_instrument(
            Instrument::new(id, format!("INS-{id}"))
                .with_technology(technology)
                .carried_by(mission_ids.iter().copied()),
        );
        id
    }

    pub fn build(self) -> Catalog {
        self.catalog
    }
}

#[allow(dead_code)]
pub fn orbit(orbit_type: OrbitType) -> OrbitClasses {
    OrbitClasses {
        orbit_type: Some(orbit_type),
        ..OrbitClasses::default()
    }
}

#[allow(dead_code)]
pub fn sso(lst: Option<LstClass>, repeat_cycle: Option<RepeatCycleClass>) -> OrbitClasses {
    OrbitClasses {
        orbit_type: Some(OrbitType::SunSynchronous),
        inclination: Some(InclinationClass::NearPolar),
        altitude: Some(AltitudeClass::VeryLow),
        lst,
        repeat_cycle,
    }
}

#[allow(dead_code)]
pub fn inclined(
    inclination: Option<InclinationClass>,
    altitude: Option<AltitudeClass>,
    repeat_cycle: Option<RepeatCycleClass>,
) -> OrbitClasses {
    OrbitClasses {
        orbit_type: Some(OrbitType::InclinedNonSunSynchronous),
        inclination,
        altitude,
        lst: None,
        repeat_cycle,
    }
}
