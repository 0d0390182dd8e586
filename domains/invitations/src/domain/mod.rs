//! Invitations domain layer: identifiers, outcome codes, failure classification

pub mod classify;
pub mod identifier;
pub mod outcome;
