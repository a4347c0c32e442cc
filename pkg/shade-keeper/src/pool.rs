use shade_primitives::{Element, HashPrimitive};

use crate::{
    commitment::Commitment,
    error::KeeperError,
    keeper::{LockReceipt, TransactionKeeper, TransferReceipt, UnlockReceipt},
    prover::ProofGenerator,
    submitter::{SubmitError, TransactionSubmitter},
};

/// Error from a pool operation: either the keeper rejected the transaction
/// or the submitter failed to place it on-chain
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// The keeper refused to build or prove the transaction
    #[error(transparent)]
    Keeper(#[from] KeeperError),

    /// The proof was built but submission failed
    ///
    /// The local accumulator already contains the outputs at this point;
    /// reconciling against authoritative chain state is the event-sync
    /// layer's job.
    #[error(transparent)]
    Submit(#[from] SubmitError),
}

/// A keeper paired with a transaction submitter
///
/// The split engine itself never talks to a chain; this thin wrapper runs
/// each keeper operation and forwards the proof and public signals to the
/// configured [`TransactionSubmitter`]. Swapping [`LocalSubmitter`] for a
/// real client is the only difference between simulation and production.
///
/// [`LocalSubmitter`]: crate::submitter::LocalSubmitter
pub struct Pool<H, P, S> {
    keeper: TransactionKeeper<H, P>,
    submitter: S,
}

impl<H, P, S> Pool<H, P, S>
where
    H: HashPrimitive + Clone,
    P: ProofGenerator,
    S: TransactionSubmitter,
{
    /// Pair a keeper with a submitter
    pub fn new(keeper: TransactionKeeper<H, P>, submitter: S) -> Self {
        Self { keeper, submitter }
    }

    /// The underlying keeper, for reads and event mirroring
    pub fn keeper(&self) -> &TransactionKeeper<H, P> {
        &self.keeper
    }

    /// Deposit and submit the lock proof
    pub fn lock(
        &self,
        asset: Element,
        amount: u64,
        salt: Element,
    ) -> Result<LockReceipt, PoolError> {
        let receipt = self.keeper.lock(asset, amount, salt)?;

        self.submitter.submit_lock(
            asset,
            amount,
            receipt.note.commitment_hash(),
            &receipt.proof,
        )?;

        Ok(receipt)
    }

    /// Withdraw and submit the unlock proof
    pub fn unlock(
        &self,
        sender: Element,
        amount: u64,
        remainder_salt: Element,
        inputs: &[Commitment],
    ) -> Result<UnlockReceipt, PoolError> {
        let receipt = self.keeper.unlock(sender, amount, remainder_salt, inputs)?;

        self.submitter.submit_unlock(
            receipt.burn.asset(),
            amount,
            receipt.remainder_note.commitment_hash(),
            &receipt.witness.nullifiers,
            &receipt.proof,
        )?;

        Ok(receipt)
    }

    /// Pay out and submit the transfer proof
    #[allow(clippy::too_many_arguments)]
    pub fn transfer(
        &self,
        sender: Element,
        payout_amount: u64,
        payout_salt: Element,
        payout_owner: Element,
        remainder_salt: Element,
        inputs: &[Commitment],
    ) -> Result<TransferReceipt, PoolError> {
        let receipt = self.keeper.transfer(
            sender,
            payout_amount,
            payout_salt,
            payout_owner,
            remainder_salt,
            inputs,
        )?;

        self.submitter.submit_transfer(
            receipt.payout_note.commitment_hash(),
            receipt.remainder_note.commitment_hash(),
            &receipt.witness.nullifiers,
            &receipt.proof,
        )?;

        Ok(receipt)
    }
}
