use std::path::Path;

use crate::model::runtime::RuntimeConfig;
use crate::model::{ArtifactLoadError, Classifier, InferenceError, OnnxClassifier};

/// Class id the artifact's label encoding uses for "positive sentiment".
pub const POSITIVE_CLASS_ID: i64 = 1;

// ---------------------------------------------------------------------------
// Prediction – result of one classify call
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// The classifier's own decision.
    pub positive: bool,
    /// P(positive | text), in `[0, 1]`.
    pub confidence: f64,
}

impl Prediction {
    /// Confidence as a whole percentage, truncated (progress bar scale).
    pub fn score_percent(&self) -> u8 {
        (self.confidence * 100.0).clamp(0.0, 100.0) as u8
    }

    /// Confidence as a percentage rounded to two decimals.
    pub fn rounded_percent(&self) -> f64 {
        (self.confidence * 100.0 * 100.0).round() / 100.0
    }

    /// [`Self::rounded_percent`] as display text. Whole numbers keep one
    /// decimal (`50.0`), others print their shortest form (`87.5`, `87.66`).
    pub fn percent_label(&self) -> String {
        let pct = self.rounded_percent();
        if pct.fract() == 0.0 {
            format!("{pct:.1}")
        } else {
            format!("{pct}")
        }
    }
}

// ---------------------------------------------------------------------------
// Predictor – single-text wrapper around a loaded classifier
// ---------------------------------------------------------------------------

pub struct Predictor {
    classifier: Box<dyn Classifier>,
    /// `predict_proba` column holding the positive class.
    positive_column: usize,
}

impl Predictor {
    /// Load the artifact at `path`. Any failure here is fatal to startup.
    pub fn initialize(path: &Path) -> Result<Self, ArtifactLoadError> {
        Self::initialize_with(path, RuntimeConfig::default())
    }

    pub fn initialize_with(path: &Path, config: RuntimeConfig) -> Result<Self, ArtifactLoadError> {
        let classifier = OnnxClassifier::load(path, config)?;
        Self::with_classifier(Box::new(classifier))
    }

    /// Wrap an already constructed classifier.
    pub fn with_classifier(classifier: Box<dyn Classifier>) -> Result<Self, ArtifactLoadError> {
        let positive_column = classifier
            .classes()
            .iter()
            .position(|&c| c == POSITIVE_CLASS_ID)
            .ok_or(ArtifactLoadError::MissingPositiveClass(POSITIVE_CLASS_ID))?;
        Ok(Self {
            classifier,
            positive_column,
        })
    }

    /// Classify one text. Empty text is passed through like any other.
    pub fn classify(&self, text: &str) -> Result<Prediction, InferenceError> {
        let batch = [text];

        let labels = self.classifier.predict(&batch)?;
        let label = single(labels)?;

        let rows = self.classifier.predict_proba(&batch)?;
        let row = single(rows)?;
        let confidence =
            row.get(self.positive_column)
                .copied()
                .ok_or(InferenceError::MissingProbability {
                    column: self.positive_column,
                    got: row.len(),
                })?;

        let prediction = Prediction {
            positive: label == POSITIVE_CLASS_ID,
            confidence,
        };
        log::debug!(
            "classified {} chars → positive={} confidence={:.4}",
            text.chars().count(),
            prediction.positive,
            prediction.confidence
        );
        Ok(prediction)
    }
}

fn single<T>(mut rows: Vec<T>) -> Result<T, InferenceError> {
    if rows.len() != 1 {
        return Err(InferenceError::BatchShape {
            expected: 1,
            got: rows.len(),
        });
    }
    rows.pop().ok_or(InferenceError::BatchShape {
        expected: 1,
        got: 0,
    })
}
