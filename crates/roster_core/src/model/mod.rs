//! Domain model for the student roster.
//!
//! # Responsibility
//! - Define the canonical student record and its raw submission shape.
//! - Own field-level validation and normalization rules.
//!
//! # Invariants
//! - Every student is identified by a stable `StudentId`.
//! - Business fields are stored trimmed and non-empty.

pub mod student;
