//! Strukturelle Referenzen auf editierbare Punkte und Abzweig-Anker.

use serde::{Deserialize, Serialize};

/// Referenz auf einen editierbaren Kontrollpunkt.
///
/// Identität ergibt sich ausschließlich aus der Position im Container;
/// Vergleich und Hashing sind strukturell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PointRef {
    /// Index in die Hauptlinie
    Main(usize),
    /// (Abzweig-Index, Punkt-Index im Abzweig)
    Branch(usize, usize),
}

impl PointRef {
    /// Die Punktfolge, zu der der Punkt gehört.
    pub fn sequence(self) -> SequenceId {
        match self {
            PointRef::Main(_) => SequenceId::Main,
            PointRef::Branch(b, _) => SequenceId::Branch(b),
        }
    }

    /// Index innerhalb der eigenen Punktfolge.
    pub fn index(self) -> usize {
        match self {
            PointRef::Main(i) | PointRef::Branch(_, i) => i,
        }
    }

    /// Gleiche Punktfolge, anderer Index.
    pub fn with_index(self, index: usize) -> Self {
        match self {
            PointRef::Main(_) => PointRef::Main(index),
            PointRef::Branch(b, _) => PointRef::Branch(b, index),
        }
    }
}

/// Eine Punktfolge: Hauptlinie oder ein bestimmter Abzweig.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceId {
    /// Hauptlinie
    Main,
    /// Abzweig mit Index
    Branch(usize),
}

impl SequenceId {
    /// Punkt-Referenz in dieser Folge.
    pub fn point(self, index: usize) -> PointRef {
        match self {
            SequenceId::Main => PointRef::Main(index),
            SequenceId::Branch(b) => PointRef::Branch(b, index),
        }
    }
}

/// Anker eines Abzweigs.
///
/// Serialisiert als `{"toMain": 2}` bzw. `{"toBranch": [0, 1]}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConnectionRef {
    /// Anker an einem Hauptlinien-Punkt
    ToMain(usize),
    /// Anker an einem Punkt eines anderen Abzweigs
    ToBranch(usize, usize),
}

impl ConnectionRef {
    /// Der referenzierte Punkt.
    pub fn target(self) -> PointRef {
        match self {
            ConnectionRef::ToMain(i) => PointRef::Main(i),
            ConnectionRef::ToBranch(b, p) => PointRef::Branch(b, p),
        }
    }

    /// Anker auf den gegebenen Punkt.
    pub fn from_target(target: PointRef) -> Self {
        match target {
            PointRef::Main(i) => ConnectionRef::ToMain(i),
            PointRef::Branch(b, p) => ConnectionRef::ToBranch(b, p),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn equality_is_structural() {
        let mut set = HashSet::new();
        set.insert(PointRef::Branch(1, 2));
        assert!(set.contains(&PointRef::Branch(1, 2)));
        assert!(!set.contains(&PointRef::Branch(2, 1)));
        assert_ne!(PointRef::Main(0), PointRef::Branch(0, 0));
    }

    #[test]
    fn connection_round_trips_through_target() {
        for conn in [ConnectionRef::ToMain(3), ConnectionRef::ToBranch(1, 4)] {
            assert_eq!(ConnectionRef::from_target(conn.target()), conn);
        }
    }

    #[test]
    fn connection_serializes_tagged() {
        let json = serde_json::to_string(&ConnectionRef::ToBranch(0, 2)).expect("JSON");
        assert_eq!(json, r#"{"toBranch":[0,2]}"#);
        let back: ConnectionRef = serde_json::from_str(r#"{"toMain":5}"#).expect("JSON");
        assert_eq!(back, ConnectionRef::ToMain(5));
    }
}
