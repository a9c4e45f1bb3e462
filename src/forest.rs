//! The random forest: hyperparameters, the worker pool,
//! the learner, and the fitted model.
pub mod config;
pub mod worker_pool;
pub mod random_forest;
pub mod forest_classifier;


pub use config::{ForestConfig, MaxFeatures};
pub use worker_pool::WorkerPool;
pub use random_forest::RandomForestClassifier;
pub use forest_classifier::RandomForest;
