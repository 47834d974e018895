#![allow(
    clippy::cast_precision_loss,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::needless_range_loop,
    clippy::uninlined_format_args
)]

pub mod errors;
pub mod layers;
pub mod mnist;
pub mod network;
pub mod runner;
pub mod tensor;
pub mod weights;
