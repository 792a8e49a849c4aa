//! Data reduction for materials characterization runs.
//!
//! Two independent workups share the same layers:
//!
//! * **thermal**: TGA/DSC exports, stride downsampled, with heat-flow
//!   peaks/troughs and mass-loss inflections located;
//! * **tensile**: load/strain exports, converted to stress, smoothed, with
//!   Young's modulus fitted over a strain window and toughness integrated.
//!
//! [`pipeline`] turns a directory of files into per-sample reports without
//! drawing anything; the `material-workup` binary renders them.

pub mod analysis;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
