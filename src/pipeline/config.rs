//! Configuration for a full reconstruction run.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::PipelineError;
use crate::decompose::DecomposeConfig;
use crate::feature::DEFAULT_DECIMALS;
use crate::resolver::ResolverConfig;

/// Settings for every stage of a reconstruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconstructionConfig {
    /// Resolver policies and the optional fixed plate.
    pub resolver: ResolverConfig,
    /// Ring decomposition settings.
    pub decompose: DecomposeConfig,
    /// Decimal places rotated feature coordinates are rounded to.
    pub coordinate_decimals: u32,
}

impl Default for ReconstructionConfig {
    fn default() -> Self {
        Self {
            resolver: ResolverConfig::default(),
            decompose: DecomposeConfig::default(),
            coordinate_decimals: DEFAULT_DECIMALS,
        }
    }
}

impl ReconstructionConfig {
    /// Loads a configuration from a JSON file. Missing fields keep their
    /// defaults.
    pub fn from_json_path(path: &Path) -> Result<Self, PipelineError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::CoveragePolicy;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ReconstructionConfig::default();
        assert_eq!(config.coordinate_decimals, 4);
        assert_eq!(config.resolver, ResolverConfig::default());
    }

    #[test]
    fn test_from_json_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut file = File::create(&path).unwrap();
        write!(
            file,
            r#"{{"resolver": {{"coverage": "skip", "fixed_plate": 701}}, "coordinate_decimals": 2}}"#
        )
        .unwrap();

        let config = ReconstructionConfig::from_json_path(&path).unwrap();
        assert_eq!(config.resolver.coverage, CoveragePolicy::Skip);
        assert_eq!(config.resolver.fixed_plate, Some(701));
        assert_eq!(config.coordinate_decimals, 2);
        assert_eq!(config.decompose, DecomposeConfig::default());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = ReconstructionConfig::from_json_path(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(PipelineError::Io(_))));
    }

    #[test]
    fn test_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            ReconstructionConfig::from_json_path(&path),
            Err(PipelineError::Json(_))
        ));
    }
}
