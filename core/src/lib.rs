//! Call analytics & simulation core.
//!
//! Ingests line-delimited call records and derives operational metrics:
//! average handling time, per-transition bottlenecks, customer-level
//! rollups, what-if improvement simulations, and recommendation
//! effectiveness from the feedback history.
//!
//! Everything is batch-oriented and synchronous: each computation loads
//! its own snapshot and works over it independently. The
//! retrieval/recommendation subsystem is an external collaborator
//! reached only through the [`recommender::Recommender`] trait.

pub mod aht;
pub mod bottleneck;
pub mod config;
pub mod customer;
pub mod engine;
pub mod error;
pub mod feedback;
pub mod generator;
pub mod record;
pub mod recommender;
pub mod rng;
pub mod simulation;
pub mod store;
pub mod timestamp;
pub mod types;
