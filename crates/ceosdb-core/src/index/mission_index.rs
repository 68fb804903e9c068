use std::collections::BTreeMap;

use tracing::warn;

use crate::catalog::Catalog;
use crate::index::condition::AttributeCondition;
use crate::index::profile::SubgroupProfile;
use crate::model::{OrbitClasses, SubjectKey, SubjectKind};

/// Read-only index of mission orbit attributes and subject membership
///
/// Missions live in an arena addressed by slot; every subject key maps to the
/// sorted, de-duplicated slots of the missions carrying at least one
/// instrument of that subject. Built once per run from a [`Catalog`] and
/// never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct MissionAttributeIndex {
    mission_ids: Vec<i64>,
    attrs: Vec<OrbitClasses>,
    population: usize,
    groups: BTreeMap<SubjectKey, Vec<usize>>,
}

impl MissionAttributeIndex {
    /// Build the index from a finalized catalog
    ///
    /// Every technology tag on an instrument, every registered instrument type
    /// and every measurement name becomes a subject, even when no mission
    /// carries it. Instruments referencing unknown missions are skipped for
    /// that mission only.
    pub fn build(catalog: &Catalog) -> Self {
        let mut mission_ids = Vec::with_capacity(catalog.mission_count());
        let mut attrs = Vec::with_capacity(catalog.mission_count());
        let mut slots = BTreeMap::new();
        let mut population = 0;

        for mission in catalog.missions() {
            slots.insert(mission.id, mission_ids.len());
            mission_ids.push(mission.id);
            attrs.push(mission.classes.clone());
            if mission.has_known_orbit_type() {
                population += 1;
            }
        }

        let mut groups: BTreeMap<SubjectKey, Vec<usize>> = BTreeMap::new();
        for tech in catalog.technologies() {
            groups.entry(SubjectKey::technology(tech)).or_default();
        }
        for name in catalog.instrument_types() {
            groups.entry(SubjectKey::instrument_type(name)).or_default();
        }
        for measurement in catalog.measurements() {
            groups
                .entry(SubjectKey::measurement(measurement.name.as_str()))
                .or_default();
        }

        for instrument in catalog.instruments() {
            let carried: Vec<usize> = instrument
                .mission_ids
                .iter()
                .filter_map(|mission_id| match slots.get(mission_id) {
                    Some(slot) => Some(*slot),
                    None => {
                        warn!(
                            instrument_id = instrument.id,
                            mission_id = *mission_id,
                            "Instrument references unknown mission; skipping link"
                        );
                        None
                    }
                })
                .collect();
            if carried.is_empty() {
                continue;
            }

            let mut keys = Vec::new();
            if let Some(tech) = &instrument.technology {
                keys.push(SubjectKey::technology(tech.as_str()));
            }
            for type_name in &instrument.types {
                keys.push(SubjectKey::instrument_type(type_name.as_str()));
            }
            for measurement_id in &instrument.measurement_ids {
                if let Ok(measurement) = catalog.get_measurement(*measurement_id) {
                    keys.push(SubjectKey::measurement(measurement.name.as_str()));
                }
            }

            for key in keys {
                groups.entry(key).or_default().extend(&carried);
            }
        }

        for members in groups.values_mut() {
            members.sort_unstable();
            members.dedup();
        }

        Self {
            mission_ids,
            attrs,
            population,
            groups,
        }
    }

    /// Number of missions with a known orbit type
    pub fn population_count(&self) -> usize {
        self.population
    }

    /// Total number of missions in the arena
    pub fn mission_count(&self) -> usize {
        self.attrs.len()
    }

    /// All subject keys, ordered by kind then id
    pub fn subjects(&self) -> impl Iterator<Item = &SubjectKey> {
        self.groups.keys()
    }

    /// Subject keys of one kind, sorted by id
    pub fn subjects_of(&self, kind: SubjectKind) -> impl Iterator<Item = &SubjectKey> {
        self.groups.keys().filter(move |key| key.kind == kind)
    }

    /// Member slots of a subject; empty for unknown subjects
    pub fn members(&self, key: &SubjectKey) -> &[usize] {
        self.groups.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Mission ids of a subject's members, ascending
    pub fn member_ids(&self, key: &SubjectKey) -> Vec<i64> {
        self.members(key)
            .iter()
            .map(|slot| self.mission_ids[*slot])
            .collect()
    }

    /// Attributes of the mission at `slot`
    pub fn attrs(&self, slot: usize) -> Option<&OrbitClasses> {
        self.attrs.get(slot)
    }

    /// Histograms of the given member slots
    pub fn profile_of(&self, members: &[usize]) -> SubgroupProfile {
        SubgroupProfile::from_attrs(members.iter().filter_map(|slot| self.attrs.get(*slot)))
    }

    /// Histograms of a subject's members
    pub fn profile(&self, key: &SubjectKey) -> SubgroupProfile {
        self.profile_of(self.members(key))
    }

    /// Count a subject's members matching `condition` by direct scan
    pub fn count_matching(&self, key: &SubjectKey, condition: AttributeCondition) -> usize {
        self.members(key)
            .iter()
            .filter_map(|slot| self.attrs.get(*slot))
            .filter(|attrs| condition.matches(attrs))
            .count()
    }
}
