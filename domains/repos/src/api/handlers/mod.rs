//! HTTP handlers for the Repos domain

pub mod repos;
