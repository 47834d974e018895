use std::path::Path;

use anyhow::{ensure, Result};
use serde::Serialize;

use crate::mnist::Dataset;
use crate::network::Network;
use crate::weights::WeightSet;

/// Outcome of a single evaluated sample; logged and folded into the running
/// tally, never retained.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Classification {
    pub index: usize,
    pub predicted: usize,
    pub truth: usize,
    pub correct: bool,
}

/// Aggregate accuracy over the evaluated prefix of the dataset.
#[derive(Debug, Serialize)]
pub struct EvalReport {
    pub total: usize,
    pub correct: usize,
    /// Top-1 accuracy as a percentage.
    pub accuracy: f64,
}

pub fn run(
    images: &Path,
    labels: &Path,
    weights_dir: &Path,
    count: usize,
    json: bool,
) -> Result<()> {
    tracing::info!(
        "loading dataset from {} / {}",
        images.display(),
        labels.display()
    );
    let dataset = Dataset::load(images, labels)?;

    tracing::info!("loading weights from {}", weights_dir.display());
    let weights = WeightSet::load(weights_dir)?;
    let network = Network::from_weights(weights);

    let report = evaluate(&network, &dataset, count)?;
    println!(
        "Accuracy: {:.1}% ({}/{})",
        report.accuracy, report.correct, report.total
    );
    if json {
        println!("{}", serde_json::to_string(&report)?);
    }
    Ok(())
}

/// Forwards the first `count` images, scoring argmax predictions against the
/// labels.
pub fn evaluate(network: &Network, dataset: &Dataset, count: usize) -> Result<EvalReport> {
    ensure!(count > 0, "sample count must be at least 1");
    ensure!(
        count <= dataset.len(),
        "requested {} samples, dataset holds {}",
        count,
        dataset.len()
    );

    let mut correct = 0;
    for index in 0..count {
        let logits = network.forward(&dataset.images[index])?;
        let predicted = argmax(&logits.data);
        let truth = usize::from(dataset.labels[index]);
        let result = Classification {
            index,
            predicted,
            truth,
            correct: predicted == truth,
        };
        if result.correct {
            correct += 1;
        }
        println!(
            "{}/{}: predicted={} truth={} correct={}",
            index + 1,
            count,
            result.predicted,
            result.truth,
            result.correct
        );
    }

    Ok(EvalReport {
        total: count,
        correct,
        accuracy: 100.0 * correct as f64 / count as f64,
    })
}

/// Index of the largest value; ties resolve to the lowest index via a
/// left-to-right strict-greater scan.
pub fn argmax(values: &[f32]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argmax_takes_the_maximum() {
        assert_eq!(argmax(&[0.1, 0.9, 0.3]), 1);
        assert_eq!(argmax(&[-3.0, -1.0, -2.0]), 1);
        assert_eq!(argmax(&[7.0]), 0);
    }

    #[test]
    fn argmax_ties_break_to_the_lowest_index() {
        assert_eq!(argmax(&[0.5, 0.5, 0.1]), 0);
        assert_eq!(argmax(&[0.0, 0.2, 0.2, 0.2]), 1);
    }
}
