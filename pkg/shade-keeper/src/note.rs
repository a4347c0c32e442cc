use shade_primitives::Element;

/// The public identity of an inserted commitment
///
/// A note reveals nothing about the commitment's economic content: just the
/// hash that sits in the accumulator, where it sits, and whether its
/// nullifier has been observed on-chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Note {
    commitment_hash: Element,
    index: u64,
    nullified: bool,
}

impl Note {
    /// Create an un-nullified note for an inserted commitment
    pub fn new(commitment_hash: Element, index: u64) -> Self {
        Self {
            commitment_hash,
            index,
            nullified: false,
        }
    }

    /// The hash stored in the accumulator
    pub fn commitment_hash(&self) -> Element {
        self.commitment_hash
    }

    /// The accumulator slot this note occupies
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Whether this note's nullifier has been published
    ///
    /// Not locally authoritative: the keeper never flips this itself, only
    /// the external event-sync layer does, via [`set_nullified`].
    ///
    /// [`set_nullified`]: Note::set_nullified
    pub fn nullified(&self) -> bool {
        self.nullified
    }

    /// Record an externally observed nullification
    pub fn set_nullified(&mut self, nullified: bool) {
        self.nullified = nullified;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nullified_flag() {
        let mut note = Note::new(Element::new(42), 0);
        assert!(!note.nullified());

        note.set_nullified(true);
        assert!(note.nullified());
        assert_eq!(note.commitment_hash(), Element::new(42));
        assert_eq!(note.index(), 0);
    }
}
