//! Training infrastructure: the alternating self-play trainer with
//! explore-rate annealing, and rolling episode metrics.

pub mod metrics;
pub mod trainer;

pub use metrics::{EpisodeResult, TrainingMetrics};
pub use trainer::{Trainer, TrainerConfig};
