//! # cbc-core: Refinement Types for Correct-by-Construction Models
//!
//! This crate is the leaf of the workspace. It defines the small value types
//! that every model crate builds on. Each one wraps a primitive together with
//! the guarantee that the primitive passed a check, so downstream code never
//! re-validates.
//!
//! ## Key Design Principles
//!
//! 1. **One fallible constructor per refinement.** `ProperFraction::new`,
//!    `IpAddress::parse`, `EmailAddress::parse`, `PhoneNumber::new`,
//!    `Slug::new`. Each returns `Result<Self, ValidationError>`. There is no
//!    panicking constructor and no exception-to-option adapter.
//!
//! 2. **Read-only accessors.** Inner fields are private. Once built, a value
//!    cannot be mutated into violating its invariant.
//!
//! 3. **Serde goes through the constructor.** Every refinement deserializes
//!    with `#[serde(try_from = ...)]`, so a JSON document cannot smuggle in an
//!    out-of-range fraction or a malformed address.
//!
//! 4. **Disjunctions are enums.** [`AtLeastOne`] replaces the "one of these
//!    optional fields must be set" check with a three-way sum type.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `cbc-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod choice;
pub mod contact;
pub mod error;
pub mod fraction;
pub mod network;
pub mod slug;
pub mod temporal;
pub mod text;

// Re-export primary types for ergonomic imports.
pub use choice::AtLeastOne;
pub use contact::{EmailAddress, PhoneNumber};
pub use error::{CbcError, ValidationError};
pub use fraction::ProperFraction;
pub use network::{IpAddress, IpPolicy};
pub use slug::Slug;
pub use temporal::{ElapsedTime, Timestamp};
pub use text::CaseInsensitiveString;
