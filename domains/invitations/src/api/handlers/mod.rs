//! HTTP handlers for the Invitations domain

pub mod invite;
