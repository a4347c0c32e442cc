use shade_primitives::{Element, HashPrimitive};

mod error;
mod insert;
mod proof;

pub use error::TreeFullError;
pub use proof::MembershipProof;

/// An append-only incremental Merkle tree of fixed height `HEIGHT`
///
/// Leaves are commitment hashes, addressed by a dense insertion index that
/// starts at 0 and never repeats. Slots that have not been filled yet hold
/// [`Element::ZERO`], and zero is also the padding value at every internal
/// level, so the root of an empty accumulator is [`Element::ZERO`] itself.
///
/// Inserts and membership proofs both run in `O(HEIGHT)`: inserts via a
/// cached left-sibling per level, proofs via materialized node layers.
#[derive(Debug, Clone)]
pub struct Accumulator<const HEIGHT: usize, H> {
    hasher: H,

    root: Element,

    /// The index the next insert will land at (also the current leaf count)
    next_index: u64,

    /// For each level, the most recent node that landed at an even position
    ///
    /// When a later insert lands at the odd position next to it, this is the
    /// left operand of the merge. Stale entries are never read: an even
    /// position always overwrites before the paired odd position reads.
    filled_subtrees: [Element; HEIGHT],

    /// Every materialized node, by level: `layers[0]` is the leaves,
    /// `layers[HEIGHT]` is the root (once any leaf exists)
    layers: Vec<Vec<Element>>,
}

impl<const HEIGHT: usize, H: HashPrimitive> Accumulator<HEIGHT, H> {
    /// The maximum number of leaves this accumulator can hold
    pub const CAPACITY: u64 = 1 << HEIGHT;

    /// Create an empty accumulator using the given hash
    pub fn new(hasher: H) -> Self {
        Self {
            hasher,
            root: Element::ZERO,
            next_index: 0,
            filled_subtrees: [Element::ZERO; HEIGHT],
            layers: vec![Vec::new(); HEIGHT + 1],
        }
    }

    /// Rebuild an accumulator by inserting `leaves` in order
    ///
    /// This is how a client recovers its view from a persisted insertion log.
    pub fn from_leaves<I>(hasher: H, leaves: I) -> Result<Self, TreeFullError>
    where
        I: IntoIterator<Item = Element>,
    {
        let mut accumulator = Self::new(hasher);

        for leaf in leaves {
            accumulator.insert(leaf)?;
        }

        Ok(accumulator)
    }

    /// The current root hash
    ///
    /// [`Element::ZERO`] if the accumulator is empty.
    pub fn root(&self) -> Element {
        self.root
    }

    /// The index the next [`insert`] will return
    ///
    /// [`insert`]: Accumulator::insert
    pub fn next_index(&self) -> u64 {
        self.next_index
    }

    /// The number of leaves inserted so far
    pub fn len(&self) -> u64 {
        self.next_index
    }

    /// `true` if no leaves have been inserted
    pub fn is_empty(&self) -> bool {
        self.next_index == 0
    }

    /// The leaf stored at `index`
    ///
    /// [`Element::ZERO`] if the slot has not been filled.
    pub fn get_value(&self, index: u64) -> Element {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.layers[0].get(i))
            .copied()
            .unwrap_or(Element::ZERO)
    }

    /// Iterate over the inserted leaves in insertion order
    pub fn leaves(&self) -> impl Iterator<Item = Element> + '_ {
        self.layers[0].iter().copied()
    }

    /// The hash this accumulator was built with
    pub fn hasher(&self) -> &H {
        &self.hasher
    }
}

#[cfg(test)]
mod tests {
    use shade_primitives::Poseidon;

    use super::*;

    #[test]
    fn empty_accumulator() {
        let accumulator = Accumulator::<4, Poseidon>::new(Poseidon);

        assert_eq!(accumulator.root(), Element::ZERO);
        assert_eq!(accumulator.next_index(), 0);
        assert_eq!(accumulator.len(), 0);
        assert!(accumulator.is_empty());
        assert_eq!(accumulator.get_value(0), Element::ZERO);
        assert_eq!(accumulator.get_value(u64::MAX), Element::ZERO);
    }

    #[test]
    fn capacity_is_two_to_the_height() {
        assert_eq!(Accumulator::<4, Poseidon>::CAPACITY, 16);
        assert_eq!(Accumulator::<30, Poseidon>::CAPACITY, 1 << 30);
    }

    #[test]
    fn from_leaves_matches_repeated_insert() {
        let leaves = [Element::new(10), Element::new(20), Element::new(30)];

        let rebuilt = Accumulator::<4, Poseidon>::from_leaves(Poseidon, leaves).unwrap();

        let mut inserted = Accumulator::<4, Poseidon>::new(Poseidon);
        for leaf in leaves {
            inserted.insert(leaf).unwrap();
        }

        assert_eq!(rebuilt.root(), inserted.root());
        assert_eq!(rebuilt.next_index(), inserted.next_index());
        assert_eq!(rebuilt.leaves().collect::<Vec<_>>(), leaves);
    }
}
