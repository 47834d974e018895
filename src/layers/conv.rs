use crate::errors::ShapeError;
use crate::layers::trait_def::LayerOp;
use crate::tensor::Tensor;

/// 2D "valid" convolution: stride 1, no padding, no dilation.
#[derive(Debug, Clone)]
pub struct ConvLayer {
    /// `[out_channels, in_channels, kernel_h, kernel_w]`
    pub weight: Tensor,
    /// `[out_channels]`
    pub bias: Tensor,
}

impl LayerOp for ConvLayer {
    fn name(&self) -> &'static str {
        "conv2d"
    }

    fn apply(&self, input: &Tensor) -> Result<Tensor, ShapeError> {
        conv2d(input, &self.weight, &self.bias)
    }
}

/// `x: [in_c, h, w]`, `weight: [out_c, in_c, kh, kw]`, `bias: [out_c]` →
/// `[out_c, h-kh+1, w-kw+1]`.
///
/// Each output accumulates from the bias, input-channel-major, then kernel
/// row, then kernel column. The downstream evaluator reproduces this float
/// arithmetic term for term, so the accumulation order must not be
/// rearranged.
pub fn conv2d(x: &Tensor, weight: &Tensor, bias: &Tensor) -> Result<Tensor, ShapeError> {
    if x.ndim() != 3 {
        return Err(ShapeError::Rank {
            expected: 3,
            shape: x.shape.clone(),
        });
    }
    if weight.ndim() != 4 {
        return Err(ShapeError::Rank {
            expected: 4,
            shape: weight.shape.clone(),
        });
    }
    let (in_c, h, w) = (x.shape[0], x.shape[1], x.shape[2]);
    let (out_c, kh, kw) = (weight.shape[0], weight.shape[2], weight.shape[3]);
    if weight.shape[1] != in_c {
        return Err(ShapeError::ChannelMismatch {
            input: in_c,
            kernel: weight.shape[1],
        });
    }
    if bias.ndim() != 1 || bias.shape[0] != out_c {
        return Err(ShapeError::BiasMismatch {
            channels: out_c,
            len: bias.total_elements(),
        });
    }
    if h < kh || w < kw {
        return Err(ShapeError::KernelTooLarge { kh, kw, h, w });
    }

    let out_h = h - kh + 1;
    let out_w = w - kw + 1;
    let mut out = vec![0.0f32; out_c * out_h * out_w];
    for oc in 0..out_c {
        for oh in 0..out_h {
            for ow in 0..out_w {
                let mut sum = bias.data[oc];
                for ic in 0..in_c {
                    for r in 0..kh {
                        for c in 0..kw {
                            sum += x.data[(ic * h + oh + r) * w + ow + c]
                                * weight.data[((oc * in_c + ic) * kh + r) * kw + c];
                        }
                    }
                }
                out[(oc * out_h + oh) * out_w + ow] = sum;
            }
        }
    }
    Tensor::new(out, vec![out_c, out_h, out_w])
}
