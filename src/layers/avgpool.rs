use crate::errors::ShapeError;
use crate::layers::trait_def::LayerOp;
use crate::tensor::Tensor;

/// Non-overlapping 2×2 mean pooling, stride 2.
#[derive(Debug, Clone)]
pub struct AvgPoolLayer;

impl LayerOp for AvgPoolLayer {
    fn name(&self) -> &'static str {
        "avgpool2d"
    }

    fn apply(&self, input: &Tensor) -> Result<Tensor, ShapeError> {
        avgpool2d(input)
    }
}

/// `x: [c, h, w]` → `[c, h/2, w/2]`, each output the mean of its 2×2 window.
///
/// Odd trailing rows/columns are dropped (floor division), matching the
/// arithmetic the weights were trained against.
pub fn avgpool2d(x: &Tensor) -> Result<Tensor, ShapeError> {
    if x.ndim() != 3 {
        return Err(ShapeError::Rank {
            expected: 3,
            shape: x.shape.clone(),
        });
    }
    let (c, h, w) = (x.shape[0], x.shape[1], x.shape[2]);
    let out_h = h / 2;
    let out_w = w / 2;

    let mut out = vec![0.0f32; c * out_h * out_w];
    for ch in 0..c {
        for oh in 0..out_h {
            for ow in 0..out_w {
                let mut sum = 0.0f32;
                for r in 0..2 {
                    for col in 0..2 {
                        sum += x.data[(ch * h + oh * 2 + r) * w + ow * 2 + col];
                    }
                }
                out[(ch * out_h + oh) * out_w + ow] = sum / 4.0;
            }
        }
    }
    Tensor::new(out, vec![c, out_h, out_w])
}
