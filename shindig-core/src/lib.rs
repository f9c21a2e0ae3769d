//! Core types for the shindig event RSVP app.
//!
//! This crate provides everything below the HTTP layer:
//! - `Event` and `Rsvp` records with their rendering helpers
//! - `Store` for the JSON-file-backed state
//! - cover image validation and storage

pub mod cover;
pub mod error;
pub mod event;
pub mod rsvp;
pub mod store;

pub use error::{ShindigError, ShindigResult};
pub use event::Event;
pub use rsvp::{Rsvp, Totals};
pub use store::Store;
