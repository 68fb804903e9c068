//! Seed digest canonicalization
//!
//! Computes stable SHA256 digests of seeds for reproducibility

use crate::errors::Result;
use crate::seed::format_v0::SeedV0;
use ceosdb_core::{ExError, ExErrorKind};
use sha2::{Digest, Sha256};

/// Compute a stable digest for a seed
///
/// Returns a SHA256 hex digest of the canonicalized seed. Record order and
/// YAML layout do not affect the result.
pub fn compute_seed_digest(seed: &SeedV0) -> Result<String> {
    let canonical = canonicalize_seed(seed);

    let json = serde_json::to_string(&canonical).map_err(|e| {
        ExError::new(ExErrorKind::Serialization)
            .with_op("seed_digest")
            .with_message(e.to_string())
    })?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// Sort every record list by id and every id list numerically
fn canonicalize_seed(seed: &SeedV0) -> SeedV0 {
    let mut canonical = seed.clone();

    canonical.agencies.sort_by_key(|a| a.id);
    canonical.measurements.sort_by_key(|m| m.id);
    canonical.instrument_types.sort();
    canonical.instrument_types.dedup();

    canonical.missions.sort_by_key(|m| m.id);
    for mission in &mut canonical.missions {
        mission.agencies.sort_unstable();
    }

    canonical.instruments.sort_by_key(|i| i.id);
    for instrument in &mut canonical.instruments {
        instrument.types.sort();
        instrument.measurements.sort_unstable();
        instrument.missions.sort_unstable();
        instrument.agencies.sort_unstable();
    }

    canonical
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::parser::parse_seed_str;

    #[test]
    fn test_seed_digest_stable() {
        let yaml = r#"
schema_version: 0
missions:
  - id: 1
    name: Aqua
"#;

        let digest1 = compute_seed_digest(&parse_seed_str(yaml).unwrap()).unwrap();
        let digest2 = compute_seed_digest(&parse_seed_str(yaml).unwrap()).unwrap();

        assert_eq!(digest1, digest2);
        assert_eq!(digest1.len(), 64);
    }

    #[test]
    fn test_seed_digest_stable_with_sorting() {
        let yaml1 = r#"
schema_version: 0
missions:
  - id: 1
    name: Aqua
  - id: 2
    name: Terra
instruments:
  - id: 10
    name: MODIS
    missions: [1, 2]
"#;

        let yaml2 = r#"
schema_version: 0
instruments:
  - id: 10
    name: MODIS
    missions: [2, 1]
missions:
  - id: 2
    name: Terra
  - id: 1
    name: Aqua
"#;

        let digest1 = compute_seed_digest(&parse_seed_str(yaml1).unwrap()).unwrap();
        let digest2 = compute_seed_digest(&parse_seed_str(yaml2).unwrap()).unwrap();

        assert_eq!(digest1, digest2, "Digest should not depend on record order");
    }

    #[test]
    fn test_seed_digest_quantity_spelling() {
        let yaml1 = r#"
schema_version: 0
missions:
  - id: 1
    name: Aqua
    orbit:
      altitude: 705
"#;

        let yaml2 = r#"
schema_version: 0
missions:
  - id: 1
    name: Aqua
    orbit:
      altitude: "705"
"#;

        let digest1 = compute_seed_digest(&parse_seed_str(yaml1).unwrap()).unwrap();
        let digest2 = compute_seed_digest(&parse_seed_str(yaml2).unwrap()).unwrap();

        assert_eq!(digest1, digest2);
    }

    #[test]
    fn test_seed_digest_changes_with_content() {
        let a = parse_seed_str("schema_version: 0\nmissions: [{id: 1, name: Aqua}]\n").unwrap();
        let b = parse_seed_str("schema_version: 0\nmissions: [{id: 1, name: Terra}]\n").unwrap();

        assert_ne!(
            compute_seed_digest(&a).unwrap(),
            compute_seed_digest(&b).unwrap()
        );
    }
}
