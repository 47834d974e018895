use crate::errors::ShapeError;
use crate::layers::trait_def::LayerOp;
use crate::tensor::Tensor;

/// Collapses any tensor to rank 1, keeping row-major element order. A
/// `[c, h, w]` feature map therefore flattens channel-major, which is the
/// order the fully-connected weights were trained against.
#[derive(Debug, Clone)]
pub struct FlattenLayer;

impl LayerOp for FlattenLayer {
    fn name(&self) -> &'static str {
        "flatten"
    }

    fn apply(&self, input: &Tensor) -> Result<Tensor, ShapeError> {
        input.reshape(vec![input.total_elements()])
    }
}
