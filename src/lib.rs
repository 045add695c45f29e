//! # AssetPack Core Library
//!
//! This crate provides the core functionality for the `assetpack` tool.
//!
//! It is designed to be used by the `assetpack` command-line application, but its public API
//! can also be used to programmatically classify loose 3D-asset files and pack them into
//! marketplace-ready ZIP archives.
//!
//! ## Key Modules
//!
//! - [`classify`]: Maps filenames and paths to semantic categories.
//! - [`normal_map`]: Detects the tangent-space encoding of normal maps and converts between them.
//! - [`naming`]: Derives engine-convention texture names (`T_<package>_<role>`).
//! - [`buckets`]: Partitions an input file set into typed buckets.
//! - [`strategy`]: The three packaging layouts (marketplace, categorized, custom tree).
//! - [`emit`]: Serializes archive plans into ZIP files with progress reporting.
//! - [`export`]: High-level export entry points tying the above together.

pub mod buckets;
pub mod classify;
pub mod cli;
pub mod common;
pub mod emit;
pub mod export;
pub mod naming;
pub mod normal_map;
pub mod plan;
pub mod progress;
pub mod strategy;
pub mod walk;

pub mod error;
pub use error::PackError;
