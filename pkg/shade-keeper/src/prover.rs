use std::collections::HashMap;

use borsh::{BorshDeserialize, BorshSerialize};
use parking_lot::Mutex;
use shade_primitives::Element;

use crate::witness::SplitWitness;

/// A proof plus the public signals it commits to
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Proof {
    /// Opaque proof bytes for the on-chain verifier
    pub proof: Vec<u8>,

    /// The public signals, in the order the verifier expects
    pub public_signals: Vec<Element>,
}

/// Error from the proving backend
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("proof generation failed: {message}")]
pub struct ProofGenerationError {
    message: String,
}

impl ProofGenerationError {
    /// Wrap a backend failure message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The proving backend boundary
///
/// `prove` is treated as a pure, deterministic, potentially slow function of
/// the witness: the same witness always yields an equivalent proof, so a
/// failed call may be retried with the witness unchanged. Implementations
/// must not hold references into keeper state; the keeper guarantees no lock
/// is held while `prove` runs.
pub trait ProofGenerator {
    /// Produce a proof for an assembled witness
    fn prove(&self, witness: &SplitWitness) -> Result<Proof, ProofGenerationError>;
}

impl<P: ProofGenerator + ?Sized> ProofGenerator for &P {
    fn prove(&self, witness: &SplitWitness) -> Result<Proof, ProofGenerationError> {
        (**self).prove(witness)
    }
}

/// A memoizing wrapper around another [`ProofGenerator`]
///
/// Keyed strictly by witness content ([`SplitWitness::cache_key`], Keccak-256
/// of the canonical bytes), never by call order: two calls with identical
/// witnesses hit the cache regardless of what happened between them, and two
/// witnesses differing in any field never alias.
///
/// A development and test convenience. Production paths construct their
/// backend directly and skip this wrapper.
#[derive(Debug)]
pub struct CachedProofGenerator<P> {
    inner: P,
    cache: Mutex<HashMap<[u8; 32], Proof>>,
}

impl<P: ProofGenerator> CachedProofGenerator<P> {
    /// Wrap `inner` with an empty cache
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// The number of distinct witnesses proven so far
    pub fn cached_proofs(&self) -> usize {
        self.cache.lock().len()
    }

    /// The wrapped backend
    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: ProofGenerator> ProofGenerator for CachedProofGenerator<P> {
    fn prove(&self, witness: &SplitWitness) -> Result<Proof, ProofGenerationError> {
        let key = witness.cache_key();

        if let Some(hit) = self.cache.lock().get(&key) {
            tracing::debug!(key = %hex::encode(key), "proof cache hit");
            return Ok(hit.clone());
        }

        let proof = self.inner.prove(witness)?;
        self.cache.lock().insert(key, proof.clone());

        Ok(proof)
    }
}

/// A deterministic local-simulation backend
///
/// The "proof" is the witness's content address and the public signals are
/// taken straight from the witness, so tests can assert on both without a
/// real proving stack.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockProofGenerator;

impl ProofGenerator for MockProofGenerator {
    fn prove(&self, witness: &SplitWitness) -> Result<Proof, ProofGenerationError> {
        Ok(Proof {
            proof: witness.cache_key().to_vec(),
            public_signals: witness.public_inputs(),
        })
    }
}
