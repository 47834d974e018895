use crate::errors::ShapeError;
use crate::layers::trait_def::LayerOp;
use crate::tensor::Tensor;

/// Affine map `y = w·x + b`.
#[derive(Debug, Clone)]
pub struct LinearLayer {
    /// `[out_features, in_features]`
    pub weight: Tensor,
    /// `[out_features]`
    pub bias: Tensor,
}

impl LayerOp for LinearLayer {
    fn name(&self) -> &'static str {
        "linear"
    }

    fn apply(&self, input: &Tensor) -> Result<Tensor, ShapeError> {
        linear(input, &self.weight, &self.bias)
    }
}

/// `x: [n]`, `weight: [m, n]`, `bias: [m]` → `[m]`. Each output accumulates
/// from the bias over ascending input index.
pub fn linear(x: &Tensor, weight: &Tensor, bias: &Tensor) -> Result<Tensor, ShapeError> {
    if x.ndim() != 1 {
        return Err(ShapeError::Rank {
            expected: 1,
            shape: x.shape.clone(),
        });
    }
    if weight.ndim() != 2 {
        return Err(ShapeError::Rank {
            expected: 2,
            shape: weight.shape.clone(),
        });
    }
    let (m, n) = (weight.shape[0], weight.shape[1]);
    if x.shape[0] != n {
        return Err(ShapeError::DimensionMismatch {
            rows: m,
            cols: n,
            len: x.shape[0],
        });
    }
    if bias.ndim() != 1 || bias.shape[0] != m {
        return Err(ShapeError::BiasMismatch {
            channels: m,
            len: bias.total_elements(),
        });
    }

    let mut out = vec![0.0f32; m];
    for o in 0..m {
        let mut sum = bias.data[o];
        for i in 0..n {
            sum += weight.data[o * n + i] * x.data[i];
        }
        out[o] = sum;
    }
    Tensor::new(out, vec![m])
}
