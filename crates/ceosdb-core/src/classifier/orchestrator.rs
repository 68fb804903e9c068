use tracing::debug;

use crate::classifier::gate::GateThresholds;
use crate::classifier::walker::DecisionTreeWalker;
use crate::index::MissionAttributeIndex;
use crate::model::{ClassificationResult, SubjectKey, SubjectKind};

/// Runs the walker over every subject group of an index
///
/// Groups are visited technologies first, then instrument types, then
/// measurements, each sorted by id. Pure: nothing is persisted here.
pub struct GroupOrchestrator<'a> {
    index: &'a MissionAttributeIndex,
    walker: DecisionTreeWalker,
}

impl<'a> GroupOrchestrator<'a> {
    pub fn new(index: &'a MissionAttributeIndex, thresholds: GateThresholds) -> Self {
        Self {
            index,
            walker: DecisionTreeWalker::new(thresholds, index.population_count()),
        }
    }

    /// Classify every subject group
    pub fn run(&self) -> Vec<ClassificationResult> {
        SubjectKind::ALL
            .iter()
            .flat_map(|kind| self.index.subjects_of(*kind))
            .map(|key| self.classify_subject(key))
            .collect()
    }

    /// Classify one subject group; unknown or empty groups get no label
    pub fn classify_subject(&self, key: &SubjectKey) -> ClassificationResult {
        let members = self.index.members(key);
        if members.is_empty() {
            debug!(subject = %key, "Subject has no missions");
            return ClassificationResult::new(key.clone(), None);
        }

        let profile = self.index.profile_of(members);
        let label = self.walker.classify(&profile);
        let label_text = label.as_ref().map(ToString::to_string);
        debug!(
            subject = %key,
            subgroup = profile.members(),
            label = label_text.as_deref().unwrap_or("-"),
            "Subject classified"
        );
        ClassificationResult::new(key.clone(), label)
    }
}

/// Classify every subject group of `index` with the given thresholds
pub fn classify_all(
    index: &MissionAttributeIndex,
    thresholds: GateThresholds,
) -> Vec<ClassificationResult> {
    GroupOrchestrator::new(index, thresholds).run()
}
