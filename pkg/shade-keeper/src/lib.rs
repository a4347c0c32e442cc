#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::match_bool)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
#![deny(missing_docs)]

//! # shade-keeper
//!
//! The transaction engine of the shade shielded pool: the
//! commitment/nullifier data model, the fixed-arity split protocol, and the
//! boundaries to the proving backend and the on-chain verifier.
//!
//! Every operation is a shape of one primitive: prove that up to
//! [`NUM_NOTES`] committed input notes split into exactly two output notes
//! of equal total value, against the accumulator state as it existed before
//! the transaction. [`TransactionKeeper`] owns that protocol; [`Pool`] wires
//! it to a [`TransactionSubmitter`] for the chain leg.
//!
//! ```rust
//! # use shade_keeper::*;
//! # use shade_primitives::*;
//! let keeper = TransactionKeeper::new(Poseidon, MockProofGenerator);
//!
//! let deposit = keeper.lock(Element::new(1), 100_000, Element::new(1234))?;
//! assert_eq!(deposit.note.index(), 0);
//!
//! let withdrawal = keeper.unlock(
//!     Element::ZERO,
//!     40_000,
//!     Element::new(5678),
//!     &[deposit.commitment],
//! )?;
//! assert_eq!(withdrawal.remainder.amount(), 60_000);
//! # Ok::<_, KeeperError>(())
//! ```

mod commitment;
/// Protocol constants pinned to the paired verifier
pub mod constants;
mod error;
mod keeper;
mod note;
mod pool;
mod prover;
mod submitter;
mod witness;

pub use commitment::Commitment;
pub use constants::{BOOTSTRAP_SALT, BURN_SALT, NUM_NOTES, TREE_HEIGHT};
pub use error::KeeperError;
pub use keeper::{
    BridgeReceipt, LockReceipt, TransactionKeeper, TransferReceipt, UnlockReceipt,
};
pub use note::Note;
pub use pool::{Pool, PoolError};
pub use prover::{
    CachedProofGenerator, MockProofGenerator, Proof, ProofGenerationError, ProofGenerator,
};
pub use submitter::{LocalSubmitter, SubmitError, TransactionSubmitter};
pub use witness::SplitWitness;
