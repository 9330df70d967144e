//! Persisted gain artifact.
//!
//! The only artifact this core persists: a flat ordered gain vector tagged
//! with its variant name. Serialization format is the caller's choice; the
//! CLI writes it as JSON.

use serde::{Deserialize, Serialize};
use sf_smc::VariantKind;

use crate::error::ConfigError;

/// A gain vector tagged with its variant name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GainArtifact {
    /// Canonical variant name (see [`VariantKind::as_str`]).
    pub variant: String,
    /// Flat ordered gain vector in the variant's layout.
    pub gains: Vec<f64>,
}

impl GainArtifact {
    pub fn new(kind: VariantKind, gains: Vec<f64>) -> Self {
        Self {
            variant: kind.as_str().to_string(),
            gains,
        }
    }

    /// Check the variant name and gain arity; returns the parsed kind.
    pub fn validate(&self) -> Result<VariantKind, ConfigError> {
        let kind = VariantKind::parse(&self.variant).ok_or_else(|| ConfigError::UnknownVariant {
            name: self.variant.clone(),
        })?;
        if self.gains.len() != kind.gain_count() {
            return Err(ConfigError::WrongArity {
                variant: kind.as_str(),
                expected: kind.gain_count(),
                got: self.gains.len(),
            });
        }
        Ok(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_well_formed_artifact() {
        let artifact = GainArtifact::new(
            VariantKind::SuperTwisting,
            vec![8.0, 5.0, 12.0, 6.0, 4.85, 3.43],
        );
        assert_eq!(artifact.validate().unwrap(), VariantKind::SuperTwisting);
    }

    #[test]
    fn validate_rejects_bad_name_and_arity() {
        let bad_name = GainArtifact {
            variant: "sliding_something".to_string(),
            gains: vec![1.0],
        };
        assert!(matches!(
            bad_name.validate(),
            Err(ConfigError::UnknownVariant { .. })
        ));

        let bad_arity = GainArtifact::new(VariantKind::Adaptive, vec![1.0, 2.0]);
        assert!(matches!(
            bad_arity.validate(),
            Err(ConfigError::WrongArity { .. })
        ));
    }
}
