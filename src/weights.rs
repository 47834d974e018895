use std::path::Path;

use anyhow::Result;

use crate::errors::{FormatError, ShapeMismatchError};
use crate::tensor::Tensor;

/// One layer's weight/bias pair.
#[derive(Debug, Clone)]
pub struct LayerWeights {
    pub weight: Tensor,
    pub bias: Tensor,
}

/// The full parameter set of the fixed five-layer network, immutable after
/// loading.
#[derive(Debug, Clone)]
pub struct WeightSet {
    pub conv1: LayerWeights,
    pub conv2: LayerWeights,
    pub fc1: LayerWeights,
    pub fc2: LayerWeights,
    pub fc3: LayerWeights,
}

impl WeightSet {
    /// Loads `<layer>.weight.txt` / `<layer>.bias.txt` pairs from `dir`,
    /// shaped for the fixed topology.
    pub fn load(dir: &Path) -> Result<Self> {
        Ok(Self {
            conv1: load_pair(dir, "conv1", &[8, 1, 5, 5], &[8])?,
            conv2: load_pair(dir, "conv2", &[16, 8, 5, 5], &[16])?,
            fc1: load_pair(dir, "fc1", &[128, 256], &[128])?,
            fc2: load_pair(dir, "fc2", &[64, 128], &[64])?,
            fc3: load_pair(dir, "fc3", &[10, 64], &[10])?,
        })
    }
}

fn load_pair(
    dir: &Path,
    layer: &str,
    weight_shape: &[usize],
    bias_shape: &[usize],
) -> Result<LayerWeights> {
    let weight = load_tensor(&dir.join(format!("{layer}.weight.txt")), weight_shape)?;
    let bias = load_tensor(&dir.join(format!("{layer}.bias.txt")), bias_shape)?;
    tracing::debug!("loaded {layer}: weight {:?}, bias {:?}", weight.shape, bias.shape);
    Ok(LayerWeights { weight, bias })
}

/// Parses a whitespace/newline-delimited plain-text float file into a tensor
/// of the requested shape.
pub fn load_tensor(path: &Path, shape: &[usize]) -> Result<Tensor> {
    let display = path.display().to_string();
    let text = std::fs::read_to_string(path).map_err(|source| FormatError::Io {
        source,
        path: display.clone(),
    })?;

    let mut values = Vec::new();
    for (index, token) in text.split_whitespace().enumerate() {
        let value: f32 = token.parse().map_err(|_| FormatError::BadFloat {
            path: display.clone(),
            index,
            token: token.to_string(),
        })?;
        values.push(value);
    }

    let expected: usize = shape.iter().product();
    if values.len() != expected {
        return Err(ShapeMismatchError {
            path: display,
            parsed: values.len(),
            expected,
            shape: shape.to_vec(),
        }
        .into());
    }

    Ok(Tensor::new(values, shape.to_vec())?)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn parses_whitespace_and_newlines() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("w.txt");
        std::fs::write(&path, "1.5 -2.0\n3e-1\t4\n").unwrap();

        let t = load_tensor(&path, &[2, 2]).unwrap();
        assert_eq!(t.shape, vec![2, 2]);
        assert_eq!(t.data, vec![1.5, -2.0, 0.3, 4.0]);
    }

    #[test]
    fn rejects_non_numeric_token() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("w.txt");
        std::fs::write(&path, "1.0 oops 3.0").unwrap();

        let err = load_tensor(&path, &[3]).unwrap_err();
        match err.downcast_ref::<FormatError>() {
            Some(FormatError::BadFloat { index, token, .. }) => {
                assert_eq!(*index, 1);
                assert_eq!(token, "oops");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_wrong_element_count() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("w.txt");
        std::fs::write(&path, "1 2 3 4 5").unwrap();

        let err = load_tensor(&path, &[2, 3]).unwrap_err();
        let mismatch = err.downcast_ref::<ShapeMismatchError>().unwrap();
        assert_eq!(mismatch.parsed, 5);
        assert_eq!(mismatch.expected, 6);
        assert_eq!(mismatch.shape, vec![2, 3]);
    }

    #[test]
    fn loads_a_complete_weight_set() {
        let tmp = TempDir::new().unwrap();
        let write = |name: &str, count: usize| {
            let mut text = String::new();
            for i in 0..count {
                text.push_str(&format!("{}\n", i as f32 * 1e-3));
            }
            std::fs::write(tmp.path().join(name), text).unwrap();
        };
        write("conv1.weight.txt", 8 * 1 * 5 * 5);
        write("conv1.bias.txt", 8);
        write("conv2.weight.txt", 16 * 8 * 5 * 5);
        write("conv2.bias.txt", 16);
        write("fc1.weight.txt", 128 * 256);
        write("fc1.bias.txt", 128);
        write("fc2.weight.txt", 64 * 128);
        write("fc2.bias.txt", 64);
        write("fc3.weight.txt", 10 * 64);
        write("fc3.bias.txt", 10);

        let set = WeightSet::load(tmp.path()).unwrap();
        assert_eq!(set.conv1.weight.shape, vec![8, 1, 5, 5]);
        assert_eq!(set.conv2.weight.shape, vec![16, 8, 5, 5]);
        assert_eq!(set.fc1.weight.shape, vec![128, 256]);
        assert_eq!(set.fc2.bias.shape, vec![64]);
        assert_eq!(set.fc3.weight.shape, vec![10, 64]);
    }
}
