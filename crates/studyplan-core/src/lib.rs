//! studyplan-core — Study strategy estimation, quota allocation and sampling.
//!
//! This crate defines the data model and the pure functions the rest of the
//! studyplan system builds on: the strategy estimator, the weighted quota
//! allocator and the randomized subset sampler, plus the content parser,
//! configuration and plan reports around them.

pub mod allocation;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod sampler;
pub mod session;
pub mod strategy;

pub use allocation::{allocate, allocate_with, AllocationMethod};
pub use model::{
    EffortStatus, QuotaResult, StrategyResult, StudentProfile, WeightedCategory,
};
pub use sampler::{sample, Sampler};
pub use strategy::{estimate, estimate_with, explain};
