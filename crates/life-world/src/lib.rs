//! World simulation engine.
//!
//! This module implements the double-buffered Game of Life grid, the
//! catalog of known lifeforms that can be stamped onto it, and a driver
//! that sequences generations and reports per-cell changes.

pub mod frame;
pub mod lifeform;
pub mod simulation;
pub mod world;

pub use frame::Frame;
pub use lifeform::{Family, Lifeform, LifeformCatalog, LifeformKind};
pub use simulation::{GenerationReport, RunSummary, Simulation};
pub use world::{TileVisitor, World};
