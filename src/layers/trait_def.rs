use crate::errors::ShapeError;
use crate::tensor::Tensor;

/// A single forward-pass operator.
///
/// Implementations never mutate their input and always allocate a fresh
/// output tensor.
pub trait LayerOp {
    fn name(&self) -> &'static str;

    fn apply(&self, input: &Tensor) -> Result<Tensor, ShapeError>;
}
