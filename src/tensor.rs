use crate::errors::ShapeError;

/// Row-major, shape-tagged buffer of `f32` values.
///
/// `data.len()` always equals the product of `shape`; every constructor and
/// every operator producing a tensor re-establishes that invariant before
/// returning.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    pub data: Vec<f32>,
    pub shape: Vec<usize>,
}

impl Tensor {
    pub fn new(data: Vec<f32>, shape: Vec<usize>) -> Result<Self, ShapeError> {
        let expected: usize = shape.iter().product();
        if data.len() != expected {
            return Err(ShapeError::LengthMismatch {
                len: data.len(),
                shape,
            });
        }
        Ok(Self { data, shape })
    }

    pub fn zeros(shape: Vec<usize>) -> Self {
        let total = shape.iter().product();
        Self {
            data: vec![0.0; total],
            shape,
        }
    }

    pub fn total_elements(&self) -> usize {
        self.shape.iter().product()
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn flat_index(&self, coords: &[usize]) -> usize {
        debug_assert_eq!(coords.len(), self.shape.len());
        let mut idx = 0;
        let mut stride = 1;
        for i in (0..self.shape.len()).rev() {
            idx += coords[i] * stride;
            stride *= self.shape[i];
        }
        idx
    }

    /// Same backing values under a new shape; the element count must match.
    pub fn reshape(&self, new_shape: Vec<usize>) -> Result<Self, ShapeError> {
        let new_total: usize = new_shape.iter().product();
        if new_total != self.data.len() {
            return Err(ShapeError::BadReshape {
                len: self.data.len(),
                shape: new_shape,
            });
        }
        Ok(Self {
            data: self.data.clone(),
            shape: new_shape,
        })
    }
}
