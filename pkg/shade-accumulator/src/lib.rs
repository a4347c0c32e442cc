#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::match_bool)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
#![deny(missing_docs)]

//! # shade-accumulator
//!
//! An append-only, fixed-height incremental Merkle [`Accumulator`], the
//! commitment set of the shade shielded pool.
//!
//! Unlike a keyed sparse tree, leaves are addressed by a densely increasing
//! insertion index: the first insert lands at index 0, the next at 1, and so
//! on up to `2^HEIGHT` leaves. Empty slots hold [`Element::ZERO`] at **every**
//! level: the paired verifier pads each layer with the raw zero element, not
//! with recursive empty-subtree hashes, and this crate pins the same
//! convention.
//!
//! ```rust
//! # use shade_accumulator::*;
//! # use shade_primitives::*;
//! let mut accumulator = Accumulator::<4, Poseidon>::new(Poseidon);
//!
//! let index = accumulator.insert(Element::new(123)).unwrap();
//! assert_eq!(index, 0);
//!
//! let proof = accumulator.generate_proof(index);
//! assert!(accumulator.verify_proof(
//!     accumulator.root(),
//!     Element::new(123),
//!     index,
//!     &proof.path,
//! ));
//! ```
//!
//! ## Single-writer discipline
//!
//! [`Accumulator::insert`] takes `&mut self`, so the borrow checker enforces
//! the single-writer rule in-process. When the accumulator is shared across
//! tasks it must sit behind a single mutation lock, since racing inserts
//! corrupt the cached-sibling invariant.

mod tree;

pub use tree::{Accumulator, MembershipProof, TreeFullError};
