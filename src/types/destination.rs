use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of the destination a climate profile belongs to (a slug or database id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DestinationId(String);

impl DestinationId {
    /// Trims the identity and rejects it when nothing is left.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::new("destination", "is required"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DestinationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_rejects_blank() {
        assert_eq!(DestinationId::parse("  bali ").unwrap().as_str(), "bali");
        assert!(DestinationId::parse("   ").is_err());
        assert!(DestinationId::parse("").is_err());
    }
}
