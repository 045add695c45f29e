//! The three interchangeable packaging layouts.
//!
//! Each strategy turns buckets (or, for the custom layout, a user-authored
//! tree) plus a package name into one or more [`crate::plan::ArchivePlan`]s.
//! Plan building is deterministic: bucket iteration order is classification
//! insertion order, so repeated runs over an unchanged input produce
//! identical entry lists.

pub mod categorized;
pub mod custom;
pub mod marketplace;
