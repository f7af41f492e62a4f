//! # Domain Models
//!
//! Canonical record shared by every provider adapter.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`CanonicalAddress`] | Normalized postal address (CEP, street, neighborhood, city, UF) |

mod address;

pub use address::CanonicalAddress;
