use crate::errors::ShapeError;
use crate::layers::{AvgPoolLayer, ConvLayer, FlattenLayer, LayerOp, LinearLayer, ReluLayer};
use crate::tensor::Tensor;
use crate::weights::WeightSet;

/// A typed layer descriptor. The executor in [`Network::forward`] interprets
/// the descriptor list in order; the list fully determines the compute
/// sequence.
#[derive(Debug, Clone)]
pub enum Layer {
    Conv(ConvLayer),
    AvgPool(AvgPoolLayer),
    Relu(ReluLayer),
    Flatten(FlattenLayer),
    Linear(LinearLayer),
}

impl Layer {
    fn op(&self) -> &dyn LayerOp {
        match self {
            Layer::Conv(layer) => layer,
            Layer::AvgPool(layer) => layer,
            Layer::Relu(layer) => layer,
            Layer::Flatten(layer) => layer,
            Layer::Linear(layer) => layer,
        }
    }
}

/// An ordered stack of layers sharing one executor.
#[derive(Debug, Clone)]
pub struct Network {
    pub layers: Vec<Layer>,
}

impl Network {
    pub fn new(layers: Vec<Layer>) -> Self {
        Self { layers }
    }

    /// The fixed digit classifier: two conv/relu/pool stages, then three
    /// fully-connected stages. Feature maps run
    /// `1×28×28 → 8×24×24 → 8×12×12 → 16×8×8 → 16×4×4 → 256 → 128 → 64 → 10`.
    pub fn from_weights(weights: WeightSet) -> Self {
        Self::new(vec![
            Layer::Conv(ConvLayer {
                weight: weights.conv1.weight,
                bias: weights.conv1.bias,
            }),
            Layer::Relu(ReluLayer),
            Layer::AvgPool(AvgPoolLayer),
            Layer::Conv(ConvLayer {
                weight: weights.conv2.weight,
                bias: weights.conv2.bias,
            }),
            Layer::Relu(ReluLayer),
            Layer::AvgPool(AvgPoolLayer),
            Layer::Flatten(FlattenLayer),
            Layer::Linear(LinearLayer {
                weight: weights.fc1.weight,
                bias: weights.fc1.bias,
            }),
            Layer::Relu(ReluLayer),
            Layer::Linear(LinearLayer {
                weight: weights.fc2.weight,
                bias: weights.fc2.bias,
            }),
            Layer::Relu(ReluLayer),
            Layer::Linear(LinearLayer {
                weight: weights.fc3.weight,
                bias: weights.fc3.bias,
            }),
        ])
    }

    /// Runs one image through the stack, returning the unnormalized class
    /// scores. A rank-2 `[rows, cols]` image is reinterpreted as a
    /// single-channel `[1, rows, cols]` feature map.
    pub fn forward(&self, image: &Tensor) -> Result<Tensor, ShapeError> {
        let mut x = if image.ndim() == 2 {
            image.reshape(vec![1, image.shape[0], image.shape[1]])?
        } else {
            image.clone()
        };
        for layer in &self.layers {
            let op = layer.op();
            x = op.apply(&x)?;
            tracing::trace!("{} -> {:?}", op.name(), x.shape);
        }
        Ok(x)
    }
}
