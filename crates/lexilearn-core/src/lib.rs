//! lexilearn-core — Tile rearrangement engine, sessions, and scoring.
//!
//! This crate defines the data model, the rearrangement engine shared by the
//! spelling and story games, the screening rubric, and the traits for the
//! external collaborators the games talk to.

pub mod buddy;
pub mod discrimination;
pub mod error;
pub mod model;
pub mod parser;
pub mod puzzles;
pub mod screening;
pub mod session;
pub mod similarity;
pub mod story;
pub mod tiles;
pub mod traits;
