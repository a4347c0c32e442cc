use shade_primitives::{Element, HashPrimitive};

use crate::{error::KeeperError, note::Note};

/// The private content of a note in the pool
///
/// A commitment binds an asset, an amount, a blinding salt and an optional
/// owner. Only the derived hashes ever leave the client: the commitment hash
/// is what lands in the accumulator, the nullifier hash is what gets
/// published when the note is spent.
///
/// The hash layout is pinned to the paired verifier:
///
/// ```text
/// nullifier_hash  = hash(asset, amount, salt, owner)
/// commitment_hash = merge(nullifier_hash, salt)
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Commitment {
    asset: Element,
    amount: u64,
    salt: Element,
    owner: Element,
    index: Option<u64>,
}

impl Commitment {
    /// Create a bearer commitment (no owner restriction)
    pub fn new(asset: Element, amount: u64, salt: Element) -> Self {
        Self::with_owner(asset, amount, salt, Element::ZERO)
    }

    /// Create a commitment spendable only by `owner`
    ///
    /// `owner == 0` means bearer: anyone who knows the private fields can
    /// spend it.
    pub fn with_owner(asset: Element, amount: u64, salt: Element, owner: Element) -> Self {
        Self {
            asset,
            amount,
            salt,
            owner,
            index: None,
        }
    }

    /// The asset this commitment denominates
    pub fn asset(&self) -> Element {
        self.asset
    }

    /// The committed amount
    pub fn amount(&self) -> u64 {
        self.amount
    }

    /// The blinding salt (zero is the reserved burn sentinel)
    pub fn salt(&self) -> Element {
        self.salt
    }

    /// The owner address, or zero for a bearer note
    pub fn owner(&self) -> Element {
        self.owner
    }

    /// The accumulator index, if this commitment has been inserted
    pub fn index(&self) -> Option<u64> {
        self.index
    }

    /// The hash published when this commitment is spent
    pub fn nullifier_hash<H: HashPrimitive>(&self, hasher: &H) -> Element {
        hasher.hash(&[
            self.asset,
            Element::from(self.amount),
            self.salt,
            self.owner,
        ])
    }

    /// The hash inserted into the accumulator
    pub fn commitment_hash<H: HashPrimitive>(&self, hasher: &H) -> Element {
        hasher.merge(self.nullifier_hash(hasher), self.salt)
    }

    /// Record the accumulator index this commitment landed at
    ///
    /// The index is assigned exactly once, on first insertion. Re-assigning
    /// the same value is a no-op; a differing value means two inserts raced
    /// or the caller reused a commitment, and surfaces as
    /// [`KeeperError::BugInvariant`].
    pub fn assign_index(&mut self, index: u64) -> Result<(), KeeperError> {
        match self.index {
            None => {
                self.index = Some(index);
                Ok(())
            }
            Some(existing) if existing == index => Ok(()),
            Some(existing) => Err(KeeperError::BugInvariant(format!(
                "commitment index reassigned: {existing} -> {index}"
            ))),
        }
    }

    /// The public projection of this commitment, if it has been inserted
    pub fn to_note<H: HashPrimitive>(&self, hasher: &H) -> Option<Note> {
        let index = self.index?;
        Some(Note::new(self.commitment_hash(hasher), index))
    }
}

#[cfg(test)]
mod tests {
    use shade_primitives::Poseidon;
    use test_strategy::proptest;

    use super::*;

    fn commitment() -> Commitment {
        Commitment::with_owner(
            Element::new(1),
            100_000,
            Element::new(1234),
            Element::new(0xaa),
        )
    }

    #[test]
    fn hashes_are_referentially_transparent() {
        let a = commitment();
        let b = commitment();

        assert_eq!(a.nullifier_hash(&Poseidon), b.nullifier_hash(&Poseidon));
        assert_eq!(a.commitment_hash(&Poseidon), b.commitment_hash(&Poseidon));
    }

    #[test]
    fn each_field_affects_the_hashes() {
        let base = commitment();

        let variants = [
            Commitment::with_owner(Element::new(2), 100_000, Element::new(1234), Element::new(0xaa)),
            Commitment::with_owner(Element::new(1), 100_001, Element::new(1234), Element::new(0xaa)),
            Commitment::with_owner(Element::new(1), 100_000, Element::new(1235), Element::new(0xaa)),
            Commitment::with_owner(Element::new(1), 100_000, Element::new(1234), Element::new(0xab)),
        ];

        for variant in variants {
            assert_ne!(
                base.nullifier_hash(&Poseidon),
                variant.nullifier_hash(&Poseidon)
            );
            assert_ne!(
                base.commitment_hash(&Poseidon),
                variant.commitment_hash(&Poseidon)
            );
        }
    }

    #[test]
    fn commitment_hash_binds_the_salt_twice() {
        // the salt is folded into both hashes, so commitment != nullifier
        let c = commitment();
        assert_ne!(c.commitment_hash(&Poseidon), c.nullifier_hash(&Poseidon));
    }

    #[test]
    fn index_is_assigned_exactly_once() {
        let mut c = commitment();
        assert_eq!(c.index(), None);
        assert_eq!(c.to_note(&Poseidon), None);

        c.assign_index(3).unwrap();
        assert_eq!(c.index(), Some(3));

        // same value is idempotent
        c.assign_index(3).unwrap();
        assert_eq!(c.index(), Some(3));

        // a different value is an internal bug, not a user error
        let error = c.assign_index(4).unwrap_err();
        assert!(matches!(error, KeeperError::BugInvariant(_)));
        assert_eq!(c.index(), Some(3));
    }

    #[test]
    fn note_projection_reveals_no_private_fields() {
        let mut c = commitment();
        c.assign_index(7).unwrap();

        let note = c.to_note(&Poseidon).unwrap();
        assert_eq!(note.commitment_hash(), c.commitment_hash(&Poseidon));
        assert_eq!(note.index(), 7);
        assert!(!note.nullified());
    }

    #[proptest]
    fn bearer_and_owned_commitments_never_collide(
        #[strategy(1u64..u64::MAX)] amount: u64,
        #[strategy(1u64..1_000_000)] salt: u64,
        #[strategy(1u64..1_000_000)] owner: u64,
    ) {
        let bearer = Commitment::new(Element::new(1), amount, Element::new(salt));
        let owned =
            Commitment::with_owner(Element::new(1), amount, Element::new(salt), Element::new(owner));

        proptest::prop_assert_ne!(
            bearer.commitment_hash(&Poseidon),
            owned.commitment_hash(&Poseidon)
        );
    }
}
