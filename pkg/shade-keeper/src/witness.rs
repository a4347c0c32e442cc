use borsh::{BorshDeserialize, BorshSerialize};
use shade_primitives::Element;
use sha3::{Digest, Keccak256};

use crate::constants::{NUM_NOTES, TREE_HEIGHT};

/// The full witness for one split proof
///
/// Field order is pinned to the paired verifier's signal layout, and the
/// borsh encoding of this struct (fields in declaration order, fixed-width
/// big-endian elements) is the canonical serialization: equal witnesses have
/// equal bytes, and the bytes are what the proof cache keys on.
///
/// Getting this layout wrong is not a type error. A reordered field still
/// compiles and proves; the verifier just rejects the proof, or worse,
/// accepts it for the wrong transaction.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SplitWitness {
    /// The spending address (zero for the bootstrap lock path)
    pub sender: Element,

    /// The accumulator root the membership paths commit to
    pub root: Element,

    /// The single asset shared by every input and output
    pub asset: Element,

    /// Per-input amounts, zero for padding slots
    pub amounts: [Element; NUM_NOTES],

    /// Per-input blinding salts, all nonzero
    pub salts: [Element; NUM_NOTES],

    /// Per-input owners, zero for bearer notes
    pub owners: [Element; NUM_NOTES],

    /// Left output
    pub left_amount: Element,
    /// Left output blinding salt (zero only for the burn sentinel)
    pub left_salt: Element,
    /// Left output owner
    pub left_owner: Element,
    /// Left output commitment hash (public signal)
    pub left_commitment: Element,

    /// Right output
    pub right_amount: Element,
    /// Right output blinding salt
    pub right_salt: Element,
    /// Right output owner
    pub right_owner: Element,
    /// Right output commitment hash (public signal)
    pub right_commitment: Element,

    /// Per-input nullifier hashes (public signals)
    pub nullifiers: [Element; NUM_NOTES],

    /// Per-input Merkle sibling paths, deepest level first
    pub paths: [[Element; TREE_HEIGHT]; NUM_NOTES],

    /// Per-input side bits as field elements (0 = left child, 1 = right)
    pub sides: [[Element; TREE_HEIGHT]; NUM_NOTES],
}

impl SplitWitness {
    /// The canonical byte encoding of this witness
    pub fn canonical_bytes(&self) -> Vec<u8> {
        borsh::to_vec(self).expect("a fixed-shape witness always serializes")
    }

    /// Keccak-256 of [`canonical_bytes`], the content address of this witness
    ///
    /// [`canonical_bytes`]: SplitWitness::canonical_bytes
    pub fn cache_key(&self) -> [u8; 32] {
        let mut hasher = Keccak256::new();
        hasher.update(self.canonical_bytes());
        hasher.finalize().into()
    }

    /// The public signals in verifier order: root, both output commitments,
    /// then the input nullifiers
    pub fn public_inputs(&self) -> Vec<Element> {
        let mut signals = Vec::with_capacity(3 + NUM_NOTES);
        signals.push(self.root);
        signals.push(self.left_commitment);
        signals.push(self.right_commitment);
        signals.extend(self.nullifiers);
        signals
    }
}
