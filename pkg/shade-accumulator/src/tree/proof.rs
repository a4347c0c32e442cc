use shade_primitives::{compute_merkle_root, Element, HashPrimitive};

use super::Accumulator;

/// A Merkle membership proof for a single leaf of an [`Accumulator`]
///
/// `path` holds the sibling hash at each level, deepest level first, with
/// [`Element::ZERO`] for siblings that have not been filled. `sides` holds
/// the matching side bit: `false` when the proven node is the left child at
/// that level, `true` when it is the right child.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(bound(
        serialize = "[Element; HEIGHT]: serde::Serialize, [bool; HEIGHT]: serde::Serialize",
        deserialize = "[Element; HEIGHT]: serde::Deserialize<'de>, \
                       [bool; HEIGHT]: serde::Deserialize<'de>"
    ))
)]
pub struct MembershipProof<const HEIGHT: usize> {
    /// The sibling hash at each level, deepest first
    pub path: [Element; HEIGHT],

    /// The side bit at each level: `false` = proven node is the left child
    pub sides: [bool; HEIGHT],

    /// The root this proof was generated against
    pub root: Element,
}

impl<const HEIGHT: usize> MembershipProof<HEIGHT> {
    /// A placeholder proof: all-zero path against the zero root
    ///
    /// Used for padding slots whose membership is never checked (zero-amount
    /// inputs). It does not verify against any non-empty accumulator.
    pub fn empty() -> Self {
        Self {
            path: [Element::ZERO; HEIGHT],
            sides: [false; HEIGHT],
            root: Element::ZERO,
        }
    }

    /// The sibling/side pairs, deepest level first
    pub fn siblings(&self) -> impl Iterator<Item = (Element, bool)> + '_ {
        self.path.iter().copied().zip(self.sides.iter().copied())
    }

    /// The root this path commits `leaf` to
    pub fn compute_root<H: HashPrimitive>(&self, hasher: &H, leaf: Element) -> Element {
        compute_merkle_root(hasher, leaf, self.siblings())
    }

    /// `true` if this path commits `leaf` to the root the proof was
    /// generated against
    pub fn verify<H: HashPrimitive>(&self, hasher: &H, leaf: Element) -> bool {
        self.compute_root(hasher, leaf) == self.root
    }
}

impl<const HEIGHT: usize, H: HashPrimitive> Accumulator<HEIGHT, H> {
    /// Generate a membership proof for the leaf at `index`
    ///
    /// Runs in `O(HEIGHT)`: one sibling lookup per materialized layer.
    /// Indices beyond [`len`] prove the zero leaf in an empty slot; callers
    /// are expected to check [`get_value`] first.
    ///
    /// [`len`]: Accumulator::len
    /// [`get_value`]: Accumulator::get_value
    pub fn generate_proof(&self, index: u64) -> MembershipProof<HEIGHT> {
        let mut path = [Element::ZERO; HEIGHT];
        let mut sides = [false; HEIGHT];

        let mut position = usize::try_from(index).unwrap_or(usize::MAX);

        for level in 0..HEIGHT {
            path[level] = self.layers[level]
                .get(position ^ 1)
                .copied()
                .unwrap_or(Element::ZERO);
            sides[level] = position % 2 == 1;

            position /= 2;
        }

        MembershipProof {
            path,
            sides,
            root: self.root,
        }
    }

    /// Check a sibling path against an explicit root
    ///
    /// Side bits are derived from `index`, so a valid path presented at the
    /// wrong index fails.
    pub fn verify_proof(
        &self,
        root: Element,
        leaf: Element,
        index: u64,
        path: &[Element; HEIGHT],
    ) -> bool {
        let siblings = path
            .iter()
            .enumerate()
            .map(|(level, sibling)| (*sibling, (index >> level) & 1 == 1));

        compute_merkle_root(&self.hasher, leaf, siblings) == root
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use shade_primitives::Poseidon;
    use test_strategy::proptest;

    use super::super::*;

    /// Generate a proof the slow way: materialize every layer with raw zero
    /// padding and read siblings out of it
    fn naive_proof<const HEIGHT: usize>(leaves: &[Element], index: u64) -> Vec<(Element, bool)> {
        let mut layer = leaves.to_vec();
        let mut position = usize::try_from(index).unwrap();
        let mut siblings = Vec::with_capacity(HEIGHT);

        for _ in 0..HEIGHT {
            let sibling = layer.get(position ^ 1).copied().unwrap_or(Element::ZERO);
            siblings.push((sibling, position % 2 == 1));

            let mut next = Vec::with_capacity(layer.len().div_ceil(2));
            for pair in layer.chunks(2) {
                let left = pair[0];
                let right = pair.get(1).copied().unwrap_or(Element::ZERO);
                next.push(Poseidon.merge(left, right));
            }

            layer = next;
            position /= 2;
        }

        siblings
    }

    #[test]
    fn proof_verifies_for_each_leaf() {
        let leaves = [
            Element::new(11),
            Element::new(22),
            Element::new(33),
            Element::new(44),
            Element::new(55),
        ];
        let accumulator = Accumulator::<4, Poseidon>::from_leaves(Poseidon, leaves).unwrap();

        for (index, leaf) in leaves.iter().enumerate() {
            let index = index as u64;
            let proof = accumulator.generate_proof(index);

            assert_eq!(proof.root, accumulator.root());
            assert!(proof.verify(&Poseidon, *leaf));
            assert!(accumulator.verify_proof(accumulator.root(), *leaf, index, &proof.path));
        }
    }

    #[test]
    fn wrong_leaf_or_index_fails() {
        let leaves = [Element::new(1), Element::new(2), Element::new(3)];
        let accumulator = Accumulator::<4, Poseidon>::from_leaves(Poseidon, leaves).unwrap();

        let proof = accumulator.generate_proof(1);
        let root = accumulator.root();

        assert!(!proof.verify(&Poseidon, Element::new(9)));
        assert!(!accumulator.verify_proof(root, Element::new(2), 0, &proof.path));
        assert!(!accumulator.verify_proof(Element::new(42), Element::new(2), 1, &proof.path));
    }

    #[test]
    fn proof_goes_stale_after_insert() {
        let mut accumulator = Accumulator::<4, Poseidon>::new(Poseidon);
        accumulator.insert(Element::new(1)).unwrap();

        let proof = accumulator.generate_proof(0);
        accumulator.insert(Element::new(2)).unwrap();

        // still valid against the root it was generated for, not the new one
        assert!(proof.verify(&Poseidon, Element::new(1)));
        assert_ne!(proof.root, accumulator.root());
        assert!(!accumulator.verify_proof(
            accumulator.root(),
            Element::new(1),
            0,
            &proof.path
        ));

        // a fresh proof tracks the new root
        let fresh = accumulator.generate_proof(0);
        assert!(accumulator.verify_proof(accumulator.root(), Element::new(1), 0, &fresh.path));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn proof_serde_round_trip() {
        let accumulator =
            Accumulator::<4, Poseidon>::from_leaves(Poseidon, [Element::new(5), Element::new(6)])
                .unwrap();

        let proof = accumulator.generate_proof(1);
        let json = serde_json::to_string(&proof).unwrap();
        let restored: MembershipProof<4> = serde_json::from_str(&json).unwrap();

        assert_eq!(proof, restored);
    }

    #[proptest]
    fn proof_matches_naive_layer_walk(
        #[strategy(proptest::collection::vec(1u64..=1_000_000, 1..=8))] values: Vec<u64>,
        #[strategy(0usize..8)] index: usize,
    ) {
        prop_assume!(index < values.len());

        let leaves = values.iter().map(|v| Element::new(*v)).collect::<Vec<_>>();
        let accumulator =
            Accumulator::<3, Poseidon>::from_leaves(Poseidon, leaves.iter().copied()).unwrap();

        let proof = accumulator.generate_proof(index as u64);
        let naive = naive_proof::<3>(&leaves, index as u64);

        prop_assert_eq!(proof.siblings().collect::<Vec<_>>(), naive);
        prop_assert!(proof.verify(&Poseidon, leaves[index]));
    }
}
