use parking_lot::RwLock;
use rand::rngs::OsRng;
use shade_accumulator::{Accumulator, MembershipProof};
use shade_primitives::{Element, HashPrimitive};
use tracing::debug;

use crate::{
    commitment::Commitment,
    constants::{BOOTSTRAP_SALT, BURN_SALT, NUM_NOTES, TREE_HEIGHT},
    error::KeeperError,
    note::Note,
    prover::{Proof, ProofGenerator},
    witness::SplitWitness,
};

/// Result of a successful [`lock`](TransactionKeeper::lock)
#[derive(Debug, Clone)]
pub struct LockReceipt {
    /// The deposited commitment, with its persistent index assigned
    pub commitment: Commitment,
    /// The public note for the deposit
    pub note: Note,
    /// The witness the proof was generated from
    pub witness: SplitWitness,
    /// The proof to submit alongside the on-chain lock
    pub proof: Proof,
}

/// Result of a successful [`unlock`](TransactionKeeper::unlock)
#[derive(Debug, Clone)]
pub struct UnlockReceipt {
    /// The public burn commitment for the withdrawn amount (never inserted)
    pub burn: Commitment,
    /// The private remainder, with its index assigned
    pub remainder: Commitment,
    /// The public note for the remainder
    pub remainder_note: Note,
    /// The witness the proof was generated from
    pub witness: SplitWitness,
    /// The proof to submit alongside the on-chain unlock
    pub proof: Proof,
}

/// Result of a successful [`bridge`](TransactionKeeper::bridge)
#[derive(Debug, Clone)]
pub struct BridgeReceipt {
    /// The leg staying in this domain, with its index assigned
    pub local: Commitment,
    /// The public note for the local leg
    pub local_note: Note,
    /// The leg bound for the remote domain, not inserted here
    pub remote: Commitment,
    /// The witness the proof was generated from
    pub witness: SplitWitness,
    /// The proof to submit alongside the bridge
    pub proof: Proof,
}

/// Result of a successful [`transfer`](TransactionKeeper::transfer)
#[derive(Debug, Clone)]
pub struct TransferReceipt {
    /// The payout commitment, with its index assigned
    pub payout: Commitment,
    /// The public note for the payout
    pub payout_note: Note,
    /// The private remainder, with its index assigned
    pub remainder: Commitment,
    /// The public note for the remainder
    pub remainder_note: Note,
    /// The witness the proof was generated from
    pub witness: SplitWitness,
    /// The proof to submit alongside the on-chain transfer
    pub proof: Proof,
}

/// The split transaction engine
///
/// Owns the single commitment accumulator and the proving backend, and is
/// the sole mutation authority over the accumulator. Every operation is a
/// variant of one protocol: validate and pad a fixed-arity input set, prove
/// a conservation-preserving split into two outputs against pre-transaction
/// state, and only then insert the outputs.
///
/// Locking discipline: witness assembly runs under the read lock, proving
/// runs with no lock held, output insertion takes the write lock strictly
/// after proof success. Cancelling an in-flight proof therefore never
/// corrupts accumulator state.
pub struct TransactionKeeper<H, P> {
    hasher: H,
    accumulator: RwLock<Accumulator<TREE_HEIGHT, H>>,
    prover: P,
}

impl<H, P> TransactionKeeper<H, P>
where
    H: HashPrimitive + Clone,
    P: ProofGenerator,
{
    /// Create a keeper over an empty accumulator
    pub fn new(hasher: H, prover: P) -> Self {
        Self {
            accumulator: RwLock::new(Accumulator::new(hasher.clone())),
            hasher,
            prover,
        }
    }

    /// The current accumulator root
    pub fn root(&self) -> Element {
        self.accumulator.read().root()
    }

    /// The index the next inserted commitment will land at
    pub fn next_index(&self) -> u64 {
        self.accumulator.read().next_index()
    }

    /// The committed leaf at `index`, or zero if the slot is empty
    pub fn get_value(&self, index: u64) -> Element {
        self.accumulator.read().get_value(index)
    }

    /// A membership proof for the leaf at `index` against the current root
    pub fn generate_proof(&self, index: u64) -> MembershipProof<TREE_HEIGHT> {
        self.accumulator.read().generate_proof(index)
    }

    /// The hash this keeper derives commitments with
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// The proving backend
    pub fn prover(&self) -> &P {
        &self.prover
    }

    /// Insert a commitment into the accumulator and assign its index
    ///
    /// Used internally after proof success, and by the event-sync layer to
    /// mirror insertions observed on-chain.
    pub fn insert_commitment(&self, commitment: &mut Commitment) -> Result<Note, KeeperError> {
        let hash = commitment.commitment_hash(&self.hasher);
        let index = self.accumulator.write().insert(hash)?;
        commitment.assign_index(index)?;

        Ok(Note::new(hash, index))
    }

    /// Prove a split of `inputs` into `left` and `right` against the
    /// keeper's accumulator
    ///
    /// This is the raw engine: it validates, pads, assembles the witness
    /// under the read lock, and proves with no lock held. It inserts
    /// nothing; callers commit the outputs after proof success. It also does
    /// not apply the self-griefing guard, because the burn path legitimately
    /// passes a zero-salt output; the derived operations guard their
    /// caller-constructed outputs before reaching this point.
    ///
    /// `salt_source` supplies blinding salts for the zero-amount padding
    /// inputs. It must return nonzero values; it is only ever a constant on
    /// the lock path, where the verifier has to rebuild the same tree.
    pub fn split(
        &self,
        sender: Element,
        inputs: &[Commitment],
        left: &Commitment,
        right: &Commitment,
        salt_source: &mut dyn FnMut() -> Element,
    ) -> Result<(SplitWitness, Proof), KeeperError> {
        let witness = {
            let accumulator = self.accumulator.read();
            self.assemble_witness(&accumulator, sender, inputs, left, right, salt_source)?
        };

        // no lock is held while the prover runs
        let proof = self.prover.prove(&witness)?;

        Ok((witness, proof))
    }

    /// Deposit `amount` of `asset` into the pool
    ///
    /// The proof runs against a throwaway two-leaf accumulator holding a
    /// bootstrap input and the deposit itself. The bootstrap input and the
    /// padding salts are pinned to [`BOOTSTRAP_SALT`] and the dummy right
    /// output to the zero salt, so the chain can rebuild the tree and check
    /// asset and amount without ever learning the real blinding salt. On
    /// success the deposit is inserted into the persistent accumulator.
    pub fn lock(
        &self,
        asset: Element,
        amount: u64,
        salt: Element,
    ) -> Result<LockReceipt, KeeperError> {
        let mut output = Commitment::new(asset, amount, salt);
        Self::guard_outputs(&[&output])?;

        let mut scratch = Accumulator::<TREE_HEIGHT, H>::new(self.hasher.clone());

        let mut bootstrap = Commitment::new(asset, amount, BOOTSTRAP_SALT);
        let index = scratch.insert(bootstrap.commitment_hash(&self.hasher))?;
        bootstrap.assign_index(index)?;

        // the scratch copy takes the ephemeral index; the caller's
        // commitment only ever gets the persistent one
        let mut scratch_output = output.clone();
        let index = scratch.insert(scratch_output.commitment_hash(&self.hasher))?;
        scratch_output.assign_index(index)?;

        // the verifier reconstructs this dummy output itself and pins the
        // zero salt for it (amount 0, so the burn sentinel is harmless)
        let placeholder = Commitment::new(asset, 0, Element::ZERO);

        let witness = self.assemble_witness(
            &scratch,
            Element::ZERO,
            std::slice::from_ref(&bootstrap),
            &scratch_output,
            &placeholder,
            &mut || BOOTSTRAP_SALT,
        )?;

        let proof = self.prover.prove(&witness)?;

        let note = self.insert_commitment(&mut output)?;
        debug!(index = note.index(), asset = %asset, amount, "locked");

        Ok(LockReceipt {
            commitment: output,
            note,
            witness,
            proof,
        })
    }

    /// Withdraw `amount` from the pool, burning it publicly
    ///
    /// The left output carries the reserved zero salt, making it a public
    /// burn sentinel the chain can check; the right output is the private
    /// remainder, inserted after proof success.
    pub fn unlock(
        &self,
        sender: Element,
        amount: u64,
        remainder_salt: Element,
        inputs: &[Commitment],
    ) -> Result<UnlockReceipt, KeeperError> {
        let asset = Self::shared_asset(inputs)?;
        let remainder_amount = Self::remainder(inputs, amount)?;

        let burn = Commitment::new(asset, amount, BURN_SALT);
        let mut remainder = Commitment::new(asset, remainder_amount, remainder_salt);
        Self::guard_outputs(&[&remainder])?;

        let (witness, proof) = self.split_with_fresh_salts(sender, inputs, &burn, &remainder)?;

        let remainder_note = self.insert_commitment(&mut remainder)?;
        debug!(amount, remainder = remainder_amount, "unlocked");

        Ok(UnlockReceipt {
            burn,
            remainder,
            remainder_note,
            witness,
            proof,
        })
    }

    /// Move value to another domain
    ///
    /// The local leg is inserted into this keeper's accumulator; the remote
    /// leg is returned for the remote domain to commit. Conservation holds
    /// across both legs.
    pub fn bridge(
        &self,
        sender: Element,
        local_amount: u64,
        local_salt: Element,
        remote_amount: u64,
        remote_salt: Element,
        inputs: &[Commitment],
    ) -> Result<BridgeReceipt, KeeperError> {
        let asset = Self::shared_asset(inputs)?;

        let mut local = Commitment::new(asset, local_amount, local_salt);
        let remote = Commitment::new(asset, remote_amount, remote_salt);
        Self::guard_outputs(&[&local, &remote])?;

        let (witness, proof) = self.split_with_fresh_salts(sender, inputs, &local, &remote)?;

        let local_note = self.insert_commitment(&mut local)?;
        debug!(local_amount, remote_amount, "bridged");

        Ok(BridgeReceipt {
            local,
            local_note,
            remote,
            witness,
            proof,
        })
    }

    /// Pay `payout_amount` to a (possibly owner-restricted) new note,
    /// keeping the remainder
    ///
    /// `payout_owner == 0` produces a bearer payout. Both outputs are
    /// inserted after proof success, payout first.
    pub fn transfer(
        &self,
        sender: Element,
        payout_amount: u64,
        payout_salt: Element,
        payout_owner: Element,
        remainder_salt: Element,
        inputs: &[Commitment],
    ) -> Result<TransferReceipt, KeeperError> {
        let asset = Self::shared_asset(inputs)?;
        let remainder_amount = Self::remainder(inputs, payout_amount)?;

        let mut payout = Commitment::with_owner(asset, payout_amount, payout_salt, payout_owner);
        let mut remainder = Commitment::new(asset, remainder_amount, remainder_salt);
        Self::guard_outputs(&[&payout, &remainder])?;

        let (witness, proof) = self.split_with_fresh_salts(sender, inputs, &payout, &remainder)?;

        let payout_note = self.insert_commitment(&mut payout)?;
        let remainder_note = self.insert_commitment(&mut remainder)?;
        debug!(
            payout = payout_amount,
            remainder = remainder_amount,
            "transferred"
        );

        Ok(TransferReceipt {
            payout,
            payout_note,
            remainder,
            remainder_note,
            witness,
            proof,
        })
    }

    fn split_with_fresh_salts(
        &self,
        sender: Element,
        inputs: &[Commitment],
        left: &Commitment,
        right: &Commitment,
    ) -> Result<(SplitWitness, Proof), KeeperError> {
        let mut salt_source = || Element::secure_random(OsRng);
        self.split(sender, inputs, left, right, &mut salt_source)
    }

    /// Reject caller-constructed outputs that would be burned by accident
    fn guard_outputs(outputs: &[&Commitment]) -> Result<(), KeeperError> {
        for output in outputs {
            if output.amount() > 0 && output.salt().is_zero() {
                return Err(KeeperError::SelfGriefing);
            }
        }

        Ok(())
    }

    fn shared_asset(inputs: &[Commitment]) -> Result<Element, KeeperError> {
        inputs
            .first()
            .map(Commitment::asset)
            .ok_or_else(|| KeeperError::invalid_commitment("at least one input is required"))
    }

    /// The value left over after paying `spent` out of `inputs`
    fn remainder(inputs: &[Commitment], spent: u64) -> Result<u64, KeeperError> {
        let total: u128 = inputs.iter().map(|c| u128::from(c.amount())).sum();

        total
            .checked_sub(u128::from(spent))
            .and_then(|r| u64::try_from(r).ok())
            .ok_or(KeeperError::AmountMismatch {
                inputs: total,
                outputs: u128::from(spent),
            })
    }

    /// Validate, pad and lay out the witness against `accumulator`
    ///
    /// Every check happens here, before anything is mutated. The membership
    /// paths snapshot the accumulator as it is *before* this transaction's
    /// outputs exist, which is the state the verifier checks against.
    fn assemble_witness(
        &self,
        accumulator: &Accumulator<TREE_HEIGHT, H>,
        sender: Element,
        inputs: &[Commitment],
        left: &Commitment,
        right: &Commitment,
        salt_source: &mut dyn FnMut() -> Element,
    ) -> Result<SplitWitness, KeeperError> {
        if inputs.len() > NUM_NOTES {
            return Err(KeeperError::Arity {
                got: inputs.len(),
                expected: NUM_NOTES,
            });
        }

        let asset = left.asset();

        // pad to the circuit arity with zero-amount placeholders
        let mut padded = inputs.to_vec();
        while padded.len() < NUM_NOTES {
            padded.push(Commitment::new(asset, 0, salt_source()));
        }

        for input in &padded {
            if input.salt().is_zero() {
                return Err(KeeperError::invalid_commitment("input salt is zero"));
            }

            if input.asset() != asset {
                return Err(KeeperError::invalid_commitment(format!(
                    "input asset {} does not match output asset {asset}",
                    input.asset()
                )));
            }

            if input.amount() > 0 && input.index().is_none() {
                return Err(KeeperError::invalid_commitment(
                    "value-bearing input has no accumulator index",
                ));
            }

            // any input claiming a slot must actually sit in it, even a
            // zero-amount one
            if let Some(index) = input.index() {
                if accumulator.get_value(index) != input.commitment_hash(&self.hasher) {
                    return Err(KeeperError::invalid_commitment(format!(
                        "input at index {index} is not committed to the accumulator"
                    )));
                }
            }

            if !input.owner().is_zero() && input.owner() != sender {
                return Err(KeeperError::Unauthorized {
                    owner: input.owner(),
                    sender,
                });
            }
        }

        if right.asset() != asset {
            return Err(KeeperError::invalid_commitment(
                "output assets differ",
            ));
        }

        // exact conservation in u128: eight u64 inputs cannot overflow it
        let input_sum: u128 = padded.iter().map(|c| u128::from(c.amount())).sum();
        let output_sum = u128::from(left.amount()) + u128::from(right.amount());
        if input_sum != output_sum {
            return Err(KeeperError::AmountMismatch {
                inputs: input_sum,
                outputs: output_sum,
            });
        }

        // unreachable given the padding above
        if padded.len() != NUM_NOTES {
            return Err(KeeperError::Arity {
                got: padded.len(),
                expected: NUM_NOTES,
            });
        }

        // a slot can only be spent once per transaction
        let mut spent_indices = Vec::with_capacity(NUM_NOTES);
        for input in padded.iter().filter(|c| c.amount() > 0) {
            if let Some(index) = input.index() {
                if spent_indices.contains(&index) {
                    return Err(KeeperError::DuplicateInput { index });
                }
                spent_indices.push(index);
            }
        }

        let mut amounts = [Element::ZERO; NUM_NOTES];
        let mut salts = [Element::ZERO; NUM_NOTES];
        let mut owners = [Element::ZERO; NUM_NOTES];
        let mut nullifiers = [Element::ZERO; NUM_NOTES];
        let mut paths = [[Element::ZERO; TREE_HEIGHT]; NUM_NOTES];
        let mut sides = [[Element::ZERO; TREE_HEIGHT]; NUM_NOTES];

        for (slot, input) in padded.iter().enumerate() {
            amounts[slot] = Element::from(input.amount());
            salts[slot] = input.salt();
            owners[slot] = input.owner();
            nullifiers[slot] = input.nullifier_hash(&self.hasher);

            let membership = match input.index() {
                Some(index) => accumulator.generate_proof(index),
                None => MembershipProof::empty(),
            };

            paths[slot] = membership.path;
            for (level, side) in membership.sides.iter().enumerate() {
                sides[slot][level] = match side {
                    false => Element::ZERO,
                    true => Element::ONE,
                };
            }
        }

        let witness = SplitWitness {
            sender,
            root: accumulator.root(),
            asset,
            amounts,
            salts,
            owners,
            left_amount: Element::from(left.amount()),
            left_salt: left.salt(),
            left_owner: left.owner(),
            left_commitment: left.commitment_hash(&self.hasher),
            right_amount: Element::from(right.amount()),
            right_salt: right.salt(),
            right_owner: right.owner(),
            right_commitment: right.commitment_hash(&self.hasher),
            nullifiers,
            paths,
            sides,
        };

        debug!(root = %witness.root, inputs = inputs.len(), "assembled split witness");

        Ok(witness)
    }
}
