use shade_accumulator::TreeFullError;
use shade_primitives::Element;

use crate::prover::ProofGenerationError;

/// Errors raised by the transaction keeper
///
/// Every validation error is raised strictly before the accumulator is
/// mutated, so a failed call leaves no partial state behind. None of these
/// are retried by the keeper itself; [`ProofGeneration`] may be retried by
/// the caller with an unchanged witness, since proving is deterministic.
///
/// [`ProofGeneration`]: KeeperError::ProofGeneration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeeperError {
    /// The accumulator has no free slots left
    #[error(transparent)]
    TreeFull(#[from] TreeFullError),

    /// An input commitment failed validation (bad salt, wrong asset,
    /// missing index, or membership mismatch)
    #[error("invalid commitment: {reason}")]
    InvalidCommitment {
        /// What was wrong with the commitment
        reason: String,
    },

    /// An owned input was spent by someone other than its owner
    #[error("unauthorized: commitment owned by {owner} spent by {sender}")]
    Unauthorized {
        /// The owner recorded in the commitment
        owner: Element,
        /// The sender attempting the spend
        sender: Element,
    },

    /// Conservation of value was violated
    #[error("amount mismatch: inputs sum to {inputs}, outputs to {outputs}")]
    AmountMismatch {
        /// Sum of input amounts
        inputs: u128,
        /// Sum of output amounts
        outputs: u128,
    },

    /// The padded input count did not match the circuit arity
    #[error("arity mismatch: got {got} inputs, expected {expected}")]
    Arity {
        /// How many inputs were present after padding
        got: usize,
        /// The fixed circuit arity
        expected: usize,
    },

    /// Two value-bearing inputs reference the same accumulator slot
    #[error("duplicate input at index {index}")]
    DuplicateInput {
        /// The repeated accumulator index
        index: u64,
    },

    /// A value-bearing output was constructed with the zero burn salt,
    /// which would make it unrecoverable
    #[error("self-griefing: value-bearing output has the zero burn salt")]
    SelfGriefing,

    /// The external prover failed
    #[error(transparent)]
    ProofGeneration(#[from] ProofGenerationError),

    /// An internal consistency check failed
    ///
    /// Indicates a defect in the keeper or its caller, never a recoverable
    /// input problem.
    #[error("bug: {0}")]
    BugInvariant(String),
}

impl KeeperError {
    pub(crate) fn invalid_commitment(reason: impl Into<String>) -> Self {
        Self::InvalidCommitment {
            reason: reason.into(),
        }
    }
}
