use crate::errors::ShapeError;
use crate::layers::trait_def::LayerOp;
use crate::tensor::Tensor;

/// Elementwise rectification.
#[derive(Debug, Clone)]
pub struct ReluLayer;

impl LayerOp for ReluLayer {
    fn name(&self) -> &'static str {
        "relu"
    }

    fn apply(&self, input: &Tensor) -> Result<Tensor, ShapeError> {
        relu(input)
    }
}

/// `max(0, v)` over every element; same shape, freshly allocated.
pub fn relu(x: &Tensor) -> Result<Tensor, ShapeError> {
    let data = x.data.iter().map(|&v| v.max(0.0)).collect();
    Tensor::new(data, x.shape.clone())
}
