#![deny(missing_debug_implementations)]

//! # pde-entities
//!
//! Reusable, agnostic domain entities for pasaeldato.
//!
//! The entities only contain generic functionality that does not reveal any application-specific business logic.

pub mod community;
pub mod geo;
pub mod id;
pub mod time;
pub mod tip;

#[cfg(any(test, feature = "builders"))]
pub mod builders;
