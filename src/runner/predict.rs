use std::path::Path;

use anyhow::{ensure, Result};

use crate::mnist;
use crate::network::Network;
use crate::runner::evaluate::argmax;
use crate::weights::WeightSet;

/// Forwards one sample and prints its logits, the predicted class, and (if
/// a label file is supplied) the true label.
pub fn run(
    images: &Path,
    labels: Option<&Path>,
    weights_dir: &Path,
    index: usize,
) -> Result<()> {
    let dataset_images = mnist::load_images(images)?;
    ensure!(
        index < dataset_images.len(),
        "sample {} out of range ({} images)",
        index,
        dataset_images.len()
    );

    tracing::info!("loading weights from {}", weights_dir.display());
    let weights = WeightSet::load(weights_dir)?;
    let network = Network::from_weights(weights);

    let logits = network.forward(&dataset_images[index])?;
    println!("sample {}", index);
    for (class, score) in logits.data.iter().enumerate() {
        println!("  class {}: {:+.6}", class, score);
    }
    println!("predicted: {}", argmax(&logits.data));

    if let Some(labels_path) = labels {
        let dataset_labels = mnist::load_labels(labels_path)?;
        ensure!(
            index < dataset_labels.len(),
            "sample {} out of range ({} labels)",
            index,
            dataset_labels.len()
        );
        println!("truth: {}", dataset_labels[index]);
    }
    Ok(())
}
