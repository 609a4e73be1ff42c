//! External append-only store
//!
//! Submissions are appended to a hosted realtime database. The handle is
//! created once at startup and injected wherever a form is submitted.

mod client;
mod traits;

pub use client::FirebaseStore;
pub use traits::{AppendStore, StoreError};

#[cfg(test)]
pub use traits::MockAppendStore;
