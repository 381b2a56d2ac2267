//! Baseline-vs-draft record diffing.
//!
//! [`DraftState`] is the editable form state a profile editor mutates;
//! [`diff`] compares it against the last-known-published [`RecordSnapshot`]
//! and produces the minimal [`Changeset`] to publish, applying the coupling
//! rules for the name, website/redirect, and avatar/header fields.

mod draft;
mod engine;

pub use draft::DraftState;
pub use engine::diff;
