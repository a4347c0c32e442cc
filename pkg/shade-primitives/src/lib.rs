#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::match_bool)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
#![deny(missing_docs)]

//! Core field primitives for the shade shielded-pool engine
//!
//! The central type is [`Element`], a 256-bit unsigned integer that stands in
//! for a field element everywhere in the pool: commitment hashes, nullifiers,
//! Merkle nodes, salts and addresses are all [`Element`]s.
//!
//! Hashing is deliberately *not* hard-wired: every consumer takes a
//! [`HashPrimitive`] by constructor injection, so the accumulator and the
//! transaction keeper can be tested against a cheap hash and deployed against
//! the same Poseidon instance the paired on-chain verifier uses. [`Poseidon`]
//! is the default implementation.

mod element;
mod hash;
mod path;

pub use element::Element;
pub use hash::{HashPrimitive, Poseidon};
pub use path::compute_merkle_root;

/// The base element used by the default Poseidon hash
///
/// This is (roughly) an integer modulo `p` where `p` is [`Element::MODULUS`]
pub type Base = pasta_curves::Fp;
