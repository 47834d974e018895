use std::path::Path;

use anyhow::Result;

use crate::errors::FormatError;
use crate::tensor::Tensor;

pub const IMAGE_MAGIC: u32 = 2051;
pub const LABEL_MAGIC: u32 = 2049;

const IMAGE_HEADER_LEN: usize = 16;
const LABEL_HEADER_LEN: usize = 8;

/// A labeled image collection. `images.len() == labels.len()` by
/// construction; each image is a `[rows, cols]` tensor with values in
/// `[0, 1]`.
#[derive(Debug)]
pub struct Dataset {
    pub images: Vec<Tensor>,
    pub labels: Vec<u8>,
}

impl Dataset {
    pub fn load(images_path: &Path, labels_path: &Path) -> Result<Self> {
        let images = load_images(images_path)?;
        let labels = load_labels(labels_path)?;
        if images.len() != labels.len() {
            return Err(FormatError::CountMismatch {
                images: images.len(),
                labels: labels.len(),
            }
            .into());
        }
        tracing::info!("loaded {} labeled images", images.len());
        Ok(Self { images, labels })
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Parses a big-endian IDX image file:
/// `[magic][count][rows][cols]` then `count * rows * cols` u8 pixels.
pub fn load_images(path: &Path) -> Result<Vec<Tensor>> {
    let display = path.display().to_string();
    let bytes = read_file(path)?;
    if bytes.len() < IMAGE_HEADER_LEN {
        return Err(FormatError::Header {
            path: display,
            found: bytes.len(),
        }
        .into());
    }

    let magic = be_u32(&bytes, 0);
    if magic != IMAGE_MAGIC {
        return Err(FormatError::BadMagic {
            path: display,
            expected: IMAGE_MAGIC,
            found: magic,
        }
        .into());
    }
    let count = be_u32(&bytes, 4) as usize;
    let rows = be_u32(&bytes, 8) as usize;
    let cols = be_u32(&bytes, 12) as usize;

    let image_len = rows * cols;
    let payload = &bytes[IMAGE_HEADER_LEN..];
    if payload.len() != count * image_len {
        return Err(FormatError::PayloadLength {
            path: display,
            expected: count * image_len,
            found: payload.len(),
        }
        .into());
    }

    let mut images = Vec::with_capacity(count);
    for i in 0..count {
        let pixels = &payload[i * image_len..(i + 1) * image_len];
        let data: Vec<f32> = pixels.iter().map(|&p| f32::from(p) / 255.0).collect();
        images.push(Tensor::new(data, vec![rows, cols])?);
    }
    Ok(images)
}

/// Parses a big-endian IDX label file: `[magic][count]` then `count` u8
/// labels.
pub fn load_labels(path: &Path) -> Result<Vec<u8>> {
    let display = path.display().to_string();
    let bytes = read_file(path)?;
    if bytes.len() < LABEL_HEADER_LEN {
        return Err(FormatError::Header {
            path: display,
            found: bytes.len(),
        }
        .into());
    }

    let magic = be_u32(&bytes, 0);
    if magic != LABEL_MAGIC {
        return Err(FormatError::BadMagic {
            path: display,
            expected: LABEL_MAGIC,
            found: magic,
        }
        .into());
    }
    let count = be_u32(&bytes, 4) as usize;

    let payload = &bytes[LABEL_HEADER_LEN..];
    if payload.len() != count {
        return Err(FormatError::PayloadLength {
            path: display,
            expected: count,
            found: payload.len(),
        }
        .into());
    }
    Ok(payload.to_vec())
}

fn read_file(path: &Path) -> Result<Vec<u8>, FormatError> {
    std::fs::read(path).map_err(|source| FormatError::Io {
        source,
        path: path.display().to_string(),
    })
}

fn be_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn image_bytes(magic: u32, count: u32, rows: u32, cols: u32, pixels: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&magic.to_be_bytes());
        bytes.extend_from_slice(&count.to_be_bytes());
        bytes.extend_from_slice(&rows.to_be_bytes());
        bytes.extend_from_slice(&cols.to_be_bytes());
        bytes.extend_from_slice(pixels);
        bytes
    }

    fn label_bytes(magic: u32, count: u32, labels: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&magic.to_be_bytes());
        bytes.extend_from_slice(&count.to_be_bytes());
        bytes.extend_from_slice(labels);
        bytes
    }

    #[test]
    fn load_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let images_path = tmp.path().join("images");
        let labels_path = tmp.path().join("labels");

        let pixels = [0u8, 51, 102, 153, 204, 255, 0, 255];
        std::fs::write(&images_path, image_bytes(IMAGE_MAGIC, 2, 2, 2, &pixels)).unwrap();
        std::fs::write(&labels_path, label_bytes(LABEL_MAGIC, 2, &[3, 7])).unwrap();

        let dataset = Dataset::load(&images_path, &labels_path).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.labels, vec![3, 7]);
        assert_eq!(dataset.images[0].shape, vec![2, 2]);
        assert_eq!(dataset.images[0].data[1], 51.0 / 255.0);
        assert_eq!(dataset.images[1].data[1], 1.0);
    }

    #[test]
    fn rejects_bad_magic() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("images");
        std::fs::write(&path, image_bytes(999, 1, 1, 1, &[0])).unwrap();

        let err = load_images(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FormatError>(),
            Some(FormatError::BadMagic { found: 999, .. })
        ));
    }

    #[test]
    fn rejects_truncated_payload() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("images");
        // header promises 2 images of 2x2, only one is present
        std::fs::write(&path, image_bytes(IMAGE_MAGIC, 2, 2, 2, &[1, 2, 3, 4])).unwrap();

        let err = load_images(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FormatError>(),
            Some(FormatError::PayloadLength {
                expected: 8,
                found: 4,
                ..
            })
        ));
    }

    #[test]
    fn rejects_oversized_payload() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("labels");
        std::fs::write(&path, label_bytes(LABEL_MAGIC, 1, &[5, 6])).unwrap();

        let err = load_labels(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FormatError>(),
            Some(FormatError::PayloadLength {
                expected: 1,
                found: 2,
                ..
            })
        ));
    }

    #[test]
    fn rejects_image_label_count_mismatch() {
        let tmp = TempDir::new().unwrap();
        let images_path = tmp.path().join("images");
        let labels_path = tmp.path().join("labels");
        std::fs::write(&images_path, image_bytes(IMAGE_MAGIC, 1, 1, 1, &[42])).unwrap();
        std::fs::write(&labels_path, label_bytes(LABEL_MAGIC, 2, &[1, 2])).unwrap();

        let err = Dataset::load(&images_path, &labels_path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FormatError>(),
            Some(FormatError::CountMismatch {
                images: 1,
                labels: 2
            })
        ));
    }
}
