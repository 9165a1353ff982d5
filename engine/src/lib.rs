// Engine library root: cleaning, aggregation and estimation of hospital
// shopping spend, plus the gRPC service that exposes them.

pub mod analytics;
pub mod config;
pub mod data;
pub mod error;
pub mod estimator;
pub mod services;
