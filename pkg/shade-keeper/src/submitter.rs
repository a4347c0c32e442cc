use shade_primitives::Element;

use crate::{constants::NUM_NOTES, prover::Proof};

/// Error from submitting a proven transaction to the verifier contract
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("transaction submission failed: {message}")]
pub struct SubmitError {
    message: String,
}

impl SubmitError {
    /// Wrap a submission failure message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The on-chain verifier boundary
///
/// One method per verifier entry point, mirroring its signal layout: the
/// commitment hashes, nullifiers and proof passed here are exactly what the
/// contract checks the proof against. Implementations range from a real RPC
/// client to [`LocalSubmitter`], which accepts everything for local
/// simulation.
pub trait TransactionSubmitter {
    /// Submit a deposit: `lock(asset, amount, commitment, proof)`
    fn submit_lock(
        &self,
        asset: Element,
        amount: u64,
        commitment: Element,
        proof: &Proof,
    ) -> Result<(), SubmitError>;

    /// Submit a withdrawal:
    /// `unlock(asset, amount, remainder_commitment, nullifiers, proof)`
    fn submit_unlock(
        &self,
        asset: Element,
        amount: u64,
        remainder_commitment: Element,
        nullifiers: &[Element; NUM_NOTES],
        proof: &Proof,
    ) -> Result<(), SubmitError>;

    /// Submit a transfer:
    /// `transferFrom(payout_commitment, remainder_commitment, nullifiers, proof)`
    fn submit_transfer(
        &self,
        payout_commitment: Element,
        remainder_commitment: Element,
        nullifiers: &[Element; NUM_NOTES],
        proof: &Proof,
    ) -> Result<(), SubmitError>;
}

/// A no-op submitter for local simulation and tests
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSubmitter;

impl TransactionSubmitter for LocalSubmitter {
    fn submit_lock(
        &self,
        asset: Element,
        amount: u64,
        commitment: Element,
        _proof: &Proof,
    ) -> Result<(), SubmitError> {
        tracing::debug!(%asset, amount, %commitment, "local lock accepted");
        Ok(())
    }

    fn submit_unlock(
        &self,
        asset: Element,
        amount: u64,
        remainder_commitment: Element,
        _nullifiers: &[Element; NUM_NOTES],
        _proof: &Proof,
    ) -> Result<(), SubmitError> {
        tracing::debug!(%asset, amount, %remainder_commitment, "local unlock accepted");
        Ok(())
    }

    fn submit_transfer(
        &self,
        payout_commitment: Element,
        remainder_commitment: Element,
        _nullifiers: &[Element; NUM_NOTES],
        _proof: &Proof,
    ) -> Result<(), SubmitError> {
        tracing::debug!(%payout_commitment, %remainder_commitment, "local transfer accepted");
        Ok(())
    }
}
