//! Reordering methods offered to the user

use serde::{Deserialize, Serialize};

/// How a playlist gets reordered. Each method maps to one backend evaluator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformationMethod {
    /// Clustering-based smoothing of genre transitions
    #[default]
    Simmer,
    /// Shortest-path (TSP) ordering
    Bake,
    /// Deliberate chaos
    Microwave,
}

impl TransformationMethod {
    pub const ALL: [TransformationMethod; 3] = [
        TransformationMethod::Simmer,
        TransformationMethod::Bake,
        TransformationMethod::Microwave,
    ];

    /// Backend evaluator identifier
    pub fn evaluator(&self) -> &'static str {
        match self {
            TransformationMethod::Simmer => "clustering",
            TransformationMethod::Bake => "tsp",
            TransformationMethod::Microwave => "chaos",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TransformationMethod::Simmer => "Simmer",
            TransformationMethod::Bake => "Bake",
            TransformationMethod::Microwave => "Microwave",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TransformationMethod::Simmer => {
                "Clusters your tracks to smooth out the transitions between genres."
            }
            TransformationMethod::Bake => {
                "Finds the shortest path through your tracks' audio features."
            }
            TransformationMethod::Microwave => {
                "Shuffles for maximum whiplash between consecutive tracks."
            }
        }
    }

    pub fn from_evaluator(evaluator: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.evaluator().eq_ignore_ascii_case(evaluator))
    }
}

impl std::str::FromStr for TransformationMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simmer" | "clustering" => Ok(TransformationMethod::Simmer),
            "bake" | "tsp" => Ok(TransformationMethod::Bake),
            "microwave" | "chaos" => Ok(TransformationMethod::Microwave),
            _ => Err(format!(
                "Unknown method: {}. Use simmer, bake, or microwave",
                s
            )),
        }
    }
}

impl std::fmt::Display for TransformationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluator_mapping() {
        assert_eq!(TransformationMethod::Simmer.evaluator(), "clustering");
        assert_eq!(TransformationMethod::Bake.evaluator(), "tsp");
        assert_eq!(TransformationMethod::Microwave.evaluator(), "chaos");
    }

    #[test]
    fn test_from_str_accepts_names_and_evaluators() {
        assert_eq!("Bake".parse::<TransformationMethod>(), Ok(TransformationMethod::Bake));
        assert_eq!("tsp".parse::<TransformationMethod>(), Ok(TransformationMethod::Bake));
        assert_eq!(" CHAOS ".parse::<TransformationMethod>(), Ok(TransformationMethod::Microwave));
        assert!("boil".parse::<TransformationMethod>().is_err());
    }

    #[test]
    fn test_from_evaluator() {
        assert_eq!(
            TransformationMethod::from_evaluator("clustering"),
            Some(TransformationMethod::Simmer)
        );
        assert_eq!(TransformationMethod::from_evaluator("fry"), None);
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(TransformationMethod::Microwave.to_string(), "Microwave");
    }
}
