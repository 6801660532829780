use std::collections::HashMap;
use std::path::Path;

use ndarray::Array2;
use ort::session::{Output, Session};
use ort::tensor::TensorElementType;
use ort::value::{DynValue, Tensor, ValueType};

use super::error::{ArtifactLoadError, InferenceError};
use super::runtime::{create_session_builder, RuntimeConfig};
use super::Classifier;

/// Output names used by the common scikit-learn → ONNX converter.
const LABEL_OUTPUT: &str = "output_label";
const PROBABILITY_OUTPUT: &str = "output_probability";

/// Optional model metadata key listing the label encoding, e.g. `"0,1"`.
pub const CLASSES_METADATA_KEY: &str = "classes";
const DEFAULT_CLASSES: [i64; 2] = [0, 1];

// ---------------------------------------------------------------------------
// OnnxClassifier – an exported text pipeline behind an ONNX session
// ---------------------------------------------------------------------------

/// A fitted text classification pipeline exported to ONNX.
///
/// Expected graph signature:
/// - one input: string tensor `[batch, 1]` of raw documents
/// - `output_label`: int64 tensor `[batch]`
/// - `output_probability`: float tensor `[batch, n_classes]` (exported
///   without the ZipMap post-processing node)
#[derive(Debug)]
pub struct OnnxClassifier {
    session: Session,
    input_name: String,
    label_output: String,
    probability_output: String,
    classes: Vec<i64>,
}

impl OnnxClassifier {
    /// Load an `.onnx` artifact. Dispatch by extension.
    pub fn load(path: &Path, config: RuntimeConfig) -> Result<Self, ArtifactLoadError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        if ext != "onnx" {
            return Err(ArtifactLoadError::UnsupportedFormat(ext));
        }
        if !path.is_file() {
            return Err(ArtifactLoadError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let session = create_session_builder(config)?
            .commit_from_file(path)
            .map_err(|e| ArtifactLoadError::from_session_failure(path.to_path_buf(), e.to_string()))?;

        let input_name = Self::validate_input(&session)?;
        let label_output = pick_output(&session.outputs, LABEL_OUTPUT, TensorElementType::Int64)?;
        let probability_output =
            pick_output(&session.outputs, PROBABILITY_OUTPUT, TensorElementType::Float32)?;

        let classes = match session
            .metadata()
            .and_then(|m| m.custom(CLASSES_METADATA_KEY))
            .map_err(|e| ArtifactLoadError::Invalid(format!("reading metadata: {e}")))?
        {
            Some(raw) => parse_classes(&raw)?,
            None => DEFAULT_CLASSES.to_vec(),
        };

        log::info!(
            "Loaded classifier from {} (input {input_name:?}, outputs {label_output:?}/{probability_output:?}, classes {classes:?})",
            path.display()
        );

        Ok(Self {
            session,
            input_name,
            label_output,
            probability_output,
            classes,
        })
    }

    /// The graph must take exactly one string tensor of documents.
    fn validate_input(session: &Session) -> Result<String, ArtifactLoadError> {
        let [input] = session.inputs.as_slice() else {
            return Err(ArtifactLoadError::Invalid(format!(
                "model must have exactly 1 input, found {}",
                session.inputs.len()
            )));
        };
        if !matches!(
            input.input_type,
            ValueType::Tensor {
                ty: TensorElementType::String,
                ..
            }
        ) {
            return Err(ArtifactLoadError::Invalid(format!(
                "input {:?} must be a string tensor",
                input.name
            )));
        }
        Ok(input.name.clone())
    }

    /// Documents as a `[batch, 1]` string tensor keyed by the input name.
    fn inputs(&self, batch: &[&str]) -> Result<HashMap<&str, DynValue>, InferenceError> {
        let docs = Array2::from_shape_vec(
            (batch.len(), 1),
            batch.iter().map(|doc| doc.to_string()).collect(),
        )
        .map_err(|e| InferenceError::Classifier(format!("building input array: {e}")))?;
        let tensor = Tensor::from_string_array(docs).map_err(run_failed)?;

        let mut inputs = HashMap::new();
        inputs.insert(self.input_name.as_str(), tensor.into_dyn());
        Ok(inputs)
    }
}

impl Classifier for OnnxClassifier {
    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn predict(&self, batch: &[&str]) -> Result<Vec<i64>, InferenceError> {
        let outputs = self.session.run(self.inputs(batch)?).map_err(run_failed)?;
        let labels = outputs[self.label_output.as_str()]
            .try_extract_tensor::<i64>()
            .map_err(run_failed)?;
        Ok(labels.iter().copied().collect())
    }

    fn predict_proba(&self, batch: &[&str]) -> Result<Vec<Vec<f64>>, InferenceError> {
        let outputs = self.session.run(self.inputs(batch)?).map_err(run_failed)?;
        let probabilities = outputs[self.probability_output.as_str()]
            .try_extract_tensor::<f32>()
            .map_err(run_failed)?;

        let shape = probabilities.shape();
        if shape.len() != 2 {
            return Err(InferenceError::Classifier(format!(
                "probability output has shape {shape:?}, expected [batch, classes]"
            )));
        }
        let flat: Vec<f64> = probabilities.iter().map(|&p| f64::from(p)).collect();
        Ok(flat.chunks(shape[1].max(1)).map(<[f64]>::to_vec).collect())
    }
}

fn run_failed(e: ort::Error) -> InferenceError {
    InferenceError::Classifier(e.to_string())
}

/// Prefer the conventional output name; otherwise take the first tensor
/// output of the wanted element type.
fn pick_output(
    outputs: &[Output],
    preferred: &str,
    ty: TensorElementType,
) -> Result<String, ArtifactLoadError> {
    let is_wanted_tensor = |o: &Output| {
        matches!(&o.output_type, ValueType::Tensor { ty: t, .. } if *t == ty)
    };

    if let Some(o) = outputs.iter().find(|o| o.name == preferred) {
        return if is_wanted_tensor(o) {
            Ok(o.name.clone())
        } else {
            Err(ArtifactLoadError::Invalid(format!(
                "output {preferred:?} is not a {ty:?} tensor (export the pipeline without ZipMap)"
            )))
        };
    }
    outputs
        .iter()
        .find(|o| is_wanted_tensor(o))
        .map(|o| o.name.clone())
        .ok_or_else(|| ArtifactLoadError::Invalid(format!("model has no {ty:?} tensor output")))
}

/// Parse the `classes` metadata value: comma-separated, sorted, unique ids.
pub fn parse_classes(raw: &str) -> Result<Vec<i64>, ArtifactLoadError> {
    let classes = raw
        .split(',')
        .map(|tok| {
            tok.trim()
                .parse::<i64>()
                .map_err(|_| ArtifactLoadError::Invalid(format!("class id {tok:?} is not an integer")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if classes.len() < 2 {
        return Err(ArtifactLoadError::Invalid(format!(
            "need at least two classes, found {}",
            classes.len()
        )));
    }
    if classes.windows(2).any(|w| w[0] >= w[1]) {
        return Err(ArtifactLoadError::Invalid(
            "classes must be sorted and unique".into(),
        ));
    }
    Ok(classes)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::Builder;

    use super::*;

    #[test]
    fn classes_metadata_is_parsed() {
        assert_eq!(parse_classes("0,1").unwrap(), vec![0, 1]);
        assert_eq!(parse_classes(" -1, 0 ,1 ").unwrap(), vec![-1, 0, 1]);
    }

    #[test]
    fn malformed_classes_metadata_is_invalid() {
        for raw in ["", "1", "0,pos", "1,0", "0,0"] {
            assert!(
                matches!(parse_classes(raw), Err(ArtifactLoadError::Invalid(_))),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn pickles_are_not_understood() {
        let f = Builder::new().suffix(".joblib").tempfile().unwrap();
        let err = OnnxClassifier::load(f.path(), RuntimeConfig::default()).unwrap_err();
        assert!(matches!(err, ArtifactLoadError::UnsupportedFormat(ext) if ext == "joblib"));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = OnnxClassifier::load(&dir.path().join("nope.onnx"), RuntimeConfig::default())
            .unwrap_err();
        assert!(matches!(err, ArtifactLoadError::NotFound { .. }));
    }

    #[test]
    fn garbage_is_corrupt() {
        let mut f = Builder::new().suffix(".onnx").tempfile().unwrap();
        f.write_all(b"definitely not a protobuf graph").unwrap();
        let err = OnnxClassifier::load(f.path(), RuntimeConfig::default()).unwrap_err();
        assert!(
            matches!(
                err,
                ArtifactLoadError::Corrupt { .. } | ArtifactLoadError::VersionMismatch { .. }
            ),
            "{err}"
        );
    }
}
