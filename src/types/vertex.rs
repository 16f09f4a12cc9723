use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error types for VertexId construction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VertexIdError {
    #[error("Vertex id cannot be negative: {0}")]
    Negative(i64),
}

/// VertexId: non-negative identifier of a graph vertex
///
/// Collaborators (file loader, CLI) hand vertex ids over as raw `i64` values.
/// Conversion through `TryFrom<i64>` is the single place where a negative id
/// is rejected; once a `VertexId` exists it is always valid.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexId(u64);

impl VertexId {
    /// Create a VertexId from an unsigned value
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw value
    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for VertexId {
    type Error = VertexIdError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u64::try_from(value)
            .map(Self)
            .map_err(|_| VertexIdError::Negative(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_id_from_non_negative() {
        let id = VertexId::try_from(42i64).unwrap();
        assert_eq!(id.as_raw(), 42);
        assert_eq!(VertexId::try_from(0i64).unwrap(), VertexId::new(0));
    }

    #[test]
    fn test_vertex_id_rejects_negative() {
        let err = VertexId::try_from(-1i64).unwrap_err();
        assert_eq!(err, VertexIdError::Negative(-1));
        assert!(VertexId::try_from(i64::MIN).is_err());
    }

    #[test]
    fn test_vertex_id_ordering() {
        let mut ids = vec![VertexId::new(3), VertexId::new(1), VertexId::new(2)];
        ids.sort();
        assert_eq!(ids, vec![VertexId::new(1), VertexId::new(2), VertexId::new(3)]);
    }

    #[test]
    fn test_vertex_id_display() {
        assert_eq!(format!("{}", VertexId::new(17)), "17");
    }

    #[test]
    fn test_vertex_id_serializes_as_number() {
        let json = serde_json::to_string(&VertexId::new(9)).unwrap();
        assert_eq!(json, "9");
    }
}
