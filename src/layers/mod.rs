pub mod avgpool;
pub mod conv;
pub mod flatten;
pub mod linear;
pub mod relu;
pub mod trait_def;

pub use avgpool::{avgpool2d, AvgPoolLayer};
pub use conv::{conv2d, ConvLayer};
pub use flatten::FlattenLayer;
pub use linear::{linear, LinearLayer};
pub use relu::{relu, ReluLayer};
pub use trait_def::LayerOp;
