// ============================================================
// SENTIMENT TYPES
// ============================================================
// Score returned by the external classifier and the fixed
// bands rows are bucketed into

use serde::{Deserialize, Serialize};

/// Polarity values within this distance of zero classify as Neutral
pub const POLARITY_NEUTRAL_BAND: f64 = 0.1;

/// Subjectivity values above this threshold classify as Subjective
pub const SUBJECTIVITY_THRESHOLD: f64 = 0.5;

/// Sentiment score for one text snippet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentScore {
    /// Sentiment valence in [-1, 1]
    pub polarity: f64,

    /// Opinion vs. fact content in [0, 1]
    pub subjectivity: f64,

    /// Named entities extracted from the text
    #[serde(default)]
    pub entities: Vec<String>,
}

impl SentimentScore {
    /// The default substituted when the classifier fails for a row
    pub fn neutral() -> Self {
        Self {
            polarity: 0.0,
            subjectivity: 0.0,
            entities: Vec::new(),
        }
    }

    /// Clamp polarity to [-1, 1] and subjectivity to [0, 1]
    pub fn clamped(mut self) -> Self {
        self.polarity = self.polarity.clamp(-1.0, 1.0);
        self.subjectivity = self.subjectivity.clamp(0.0, 1.0);
        self
    }
}

/// Polarity band a row falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolarityBand {
    Positive,
    Negative,
    Neutral,
}

impl PolarityBand {
    pub const ALL: [PolarityBand; 3] = [
        PolarityBand::Positive,
        PolarityBand::Negative,
        PolarityBand::Neutral,
    ];

    /// Classify a polarity value against the static thresholds
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > POLARITY_NEUTRAL_BAND {
            PolarityBand::Positive
        } else if polarity < -POLARITY_NEUTRAL_BAND {
            PolarityBand::Negative
        } else {
            PolarityBand::Neutral
        }
    }
}

impl std::fmt::Display for PolarityBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolarityBand::Positive => write!(f, "Positive"),
            PolarityBand::Negative => write!(f, "Negative"),
            PolarityBand::Neutral => write!(f, "Neutral"),
        }
    }
}

/// Subjectivity band a row falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubjectivityBand {
    Subjective,
    Objective,
}

impl SubjectivityBand {
    pub const ALL: [SubjectivityBand; 2] =
        [SubjectivityBand::Subjective, SubjectivityBand::Objective];

    /// Classify a subjectivity value against the static threshold
    pub fn from_subjectivity(subjectivity: f64) -> Self {
        if subjectivity > SUBJECTIVITY_THRESHOLD {
            SubjectivityBand::Subjective
        } else {
            SubjectivityBand::Objective
        }
    }
}

impl std::fmt::Display for SubjectivityBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubjectivityBand::Subjective => write!(f, "Subjective"),
            SubjectivityBand::Objective => write!(f, "Objective"),
        }
    }
}

/// Combined bucket: the cross product of the two bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SentimentBucket {
    pub polarity: PolarityBand,
    pub subjectivity: SubjectivityBand,
}

impl SentimentBucket {
    pub fn new(polarity: PolarityBand, subjectivity: SubjectivityBand) -> Self {
        Self {
            polarity,
            subjectivity,
        }
    }

    /// Classify a (polarity, subjectivity) pair
    pub fn classify(polarity: f64, subjectivity: f64) -> Self {
        Self {
            polarity: PolarityBand::from_polarity(polarity),
            subjectivity: SubjectivityBand::from_subjectivity(subjectivity),
        }
    }

    /// Display label used by the dashboard, e.g. "Positive & Subjective"
    pub fn label(&self) -> String {
        format!("{} & {}", self.polarity, self.subjectivity)
    }
}

impl std::fmt::Display for SentimentBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} & {}", self.polarity, self.subjectivity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polarity_bands() {
        assert_eq!(PolarityBand::from_polarity(0.5), PolarityBand::Positive);
        assert_eq!(PolarityBand::from_polarity(-0.3), PolarityBand::Negative);
        assert_eq!(PolarityBand::from_polarity(0.0), PolarityBand::Neutral);

        // Boundary values are Neutral, not Positive/Negative
        assert_eq!(PolarityBand::from_polarity(0.1), PolarityBand::Neutral);
        assert_eq!(PolarityBand::from_polarity(-0.1), PolarityBand::Neutral);
        assert_eq!(PolarityBand::from_polarity(0.11), PolarityBand::Positive);
        assert_eq!(PolarityBand::from_polarity(-0.11), PolarityBand::Negative);
    }

    #[test]
    fn test_subjectivity_bands() {
        assert_eq!(
            SubjectivityBand::from_subjectivity(0.8),
            SubjectivityBand::Subjective
        );
        assert_eq!(
            SubjectivityBand::from_subjectivity(0.2),
            SubjectivityBand::Objective
        );

        // Boundary value is Objective
        assert_eq!(
            SubjectivityBand::from_subjectivity(0.5),
            SubjectivityBand::Objective
        );
    }

    #[test]
    fn test_bucket_classification() {
        assert_eq!(
            SentimentBucket::classify(0.5, 0.8).label(),
            "Positive & Subjective"
        );
        assert_eq!(
            SentimentBucket::classify(-0.3, 0.2).label(),
            "Negative & Objective"
        );
        assert_eq!(
            SentimentBucket::classify(0.0, 0.6).label(),
            "Neutral & Subjective"
        );
    }

    #[test]
    fn test_neutral_default_bucket() {
        let score = SentimentScore::neutral();
        assert_eq!(
            SentimentBucket::classify(score.polarity, score.subjectivity).label(),
            "Neutral & Objective"
        );
        assert!(score.entities.is_empty());
    }

    #[test]
    fn test_score_clamping() {
        let score = SentimentScore {
            polarity: 1.7,
            subjectivity: -0.2,
            entities: Vec::new(),
        }
        .clamped();

        assert_eq!(score.polarity, 1.0);
        assert_eq!(score.subjectivity, 0.0);
    }
}
