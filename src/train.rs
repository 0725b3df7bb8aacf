//! Training driver.
//!
//! [`Network::train`] repeatedly applies [`Network::process_batch`] to a list of
//! pre-assembled batches and periodically reports the average signed cost over an
//! evaluation batch.

use tracing::{info, warn};

use crate::{Error, Network, Result, TrainingBatch};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainConfig {
    /// Number of `process_batch` calls.
    pub iterations: usize,
    pub learning_rate: f32,
    /// Evaluate every `report_every` iterations (starting at iteration 0); 0 disables
    /// periodic reports.
    pub report_every: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            iterations: 10_000,
            learning_rate: 0.1,
            report_every: 1_000,
        }
    }
}

impl TrainConfig {
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(Error::InvalidConfig("iterations must be > 0".to_owned()));
        }
        if !self.learning_rate.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "learning_rate must be finite, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }
}

/// Average cost over the evaluation batch at one point of training.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostReport {
    /// Number of batches processed before the evaluation.
    pub iteration: usize,
    pub average_cost: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainReport {
    pub iterations: usize,
    pub reports: Vec<CostReport>,
}

impl TrainReport {
    /// The last recorded cost, if any.
    pub fn final_cost(&self) -> Option<f32> {
        self.reports.last().map(|r| r.average_cost)
    }
}

impl Network {
    /// Runs `cfg.iterations` batch updates, cycling through `batches` in order.
    ///
    /// With `eval` set, the average cost over it is recorded every `cfg.report_every`
    /// iterations and once more after the last update.
    pub fn train(
        &mut self,
        batches: &[TrainingBatch],
        eval: Option<&TrainingBatch>,
        cfg: &TrainConfig,
    ) -> Result<TrainReport> {
        cfg.validate()?;
        if batches.is_empty() {
            return Err(Error::InvalidConfig(
                "at least one training batch is required".to_owned(),
            ));
        }
        if let Some(eval) = eval {
            if eval.is_empty() {
                return Err(Error::EmptyBatch);
            }
        }

        let mut report = TrainReport::default();
        for i in 0..cfg.iterations {
            if cfg.report_every > 0 && i % cfg.report_every == 0 {
                if let Some(eval) = eval {
                    report.reports.push(self.report_cost(i, eval)?);
                }
            }
            self.process_batch(cfg.learning_rate, &batches[i % batches.len()])?;
        }
        report.iterations = cfg.iterations;

        if let Some(eval) = eval {
            report.reports.push(self.report_cost(cfg.iterations, eval)?);
        }
        Ok(report)
    }

    fn report_cost(&mut self, iteration: usize, eval: &TrainingBatch) -> Result<CostReport> {
        let average_cost = self.average_cost(eval)?;
        if average_cost.is_finite() {
            info!(iteration, average_cost, "average error");
        } else {
            warn!(iteration, average_cost, "average error is not finite");
        }
        Ok(CostReport {
            iteration,
            average_cost,
        })
    }
}
