//! Prelude module for thai_date_utils crate.
//!
//! Re-exports the derive macros from derive_more used by the date and config types.

#[allow(unused_imports)]
pub use derive_more::{Deref, Display, Into};
