use std::io;

use thiserror::Error;

/// A malformed input artifact: unreadable file, bad header, payload length
/// inconsistent with the header, or an unparseable numeric literal.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("I/O error while accessing {path}: {source}")]
    Io {
        #[source]
        source: io::Error,
        path: String,
    },

    #[error("{path}: file too short for header ({found} bytes)")]
    Header { path: String, found: usize },

    #[error("{path}: bad magic number {found} (expected {expected})")]
    BadMagic {
        path: String,
        expected: u32,
        found: u32,
    },

    #[error("{path}: header declares {expected} payload bytes, file carries {found}")]
    PayloadLength {
        path: String,
        expected: usize,
        found: usize,
    },

    #[error("image file holds {images} samples but label file holds {labels}")]
    CountMismatch { images: usize, labels: usize },

    #[error("{path}: token {index} ({token:?}) is not a floating-point literal")]
    BadFloat {
        path: String,
        index: usize,
        token: String,
    },
}

/// A weight file whose element count does not fill the shape it is loaded
/// into.
#[derive(Debug, Error)]
#[error("{path}: parsed {parsed} values, shape {shape:?} needs {expected}")]
pub struct ShapeMismatchError {
    pub path: String,
    pub parsed: usize,
    pub expected: usize,
    pub shape: Vec<usize>,
}

/// Operator-level dimension incompatibility.
#[derive(Debug, Error)]
pub enum ShapeError {
    #[error("data length {len} does not match shape {shape:?}")]
    LengthMismatch { len: usize, shape: Vec<usize> },

    #[error("expected a rank-{expected} tensor, got shape {shape:?}")]
    Rank { expected: usize, shape: Vec<usize> },

    #[error("kernel {kh}x{kw} does not fit input {h}x{w}")]
    KernelTooLarge {
        kh: usize,
        kw: usize,
        h: usize,
        w: usize,
    },

    #[error("input has {input} channels, kernel expects {kernel}")]
    ChannelMismatch { input: usize, kernel: usize },

    #[error("cannot apply {rows}x{cols} weights to a length-{len} vector")]
    DimensionMismatch {
        rows: usize,
        cols: usize,
        len: usize,
    },

    #[error("bias has {len} entries for {channels} output channels")]
    BiasMismatch { channels: usize, len: usize },

    #[error("cannot reshape {len} elements into {shape:?}")]
    BadReshape { len: usize, shape: Vec<usize> },
}
