pub mod condition;
pub mod mission_index;
pub mod profile;

pub use condition::AttributeCondition;
pub use mission_index::MissionAttributeIndex;
pub use profile::SubgroupProfile;
