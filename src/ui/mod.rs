//! Headless UI surface.
//!
//! # Structure
//!
//! - [`dom`]: Document model and shared handle
//! - [`event`]: Event kinds, handler registration and dispatch
//! - [`markup`]: Builders for the markup the page components expect

pub mod dom;
pub mod event;
pub mod markup;
