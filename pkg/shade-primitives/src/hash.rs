use halo2_gadgets::poseidon::primitives::{ConstantLength, Hash, P128Pow5T3};

use crate::{Base, Element};

/// An n-ary compression function over field elements
///
/// This is the seam between the pool engine and its hash provider: commitment
/// hashing uses [`hash`], Merkle node compression uses [`merge`]. Both must be
/// pinned to the same functions the paired on-chain verifier's circuit uses:
/// a mismatched hash compiles and runs, but produces witnesses the verifier
/// rejects.
///
/// The trait is injected by constructor everywhere (accumulator, keeper), so
/// components can be exercised independently of any particular hash.
///
/// [`hash`]: HashPrimitive::hash
/// [`merge`]: HashPrimitive::merge
pub trait HashPrimitive {
    /// Hash a fixed-length message of field elements
    ///
    /// An empty message hashes to [`Element::ZERO`].
    fn hash(&self, elements: &[Element]) -> Element;

    /// Hash two elements together
    ///
    /// This is used to calculate the hash of a parent node from the hash of
    /// its children, i.e.: `parent = merge(left, right)`. The operation is not
    /// symmetric.
    fn merge(&self, left: Element, right: Element) -> Element {
        self.hash(&[left, right])
    }
}

impl<H: HashPrimitive + ?Sized> HashPrimitive for &H {
    fn hash(&self, elements: &[Element]) -> Element {
        (**self).hash(elements)
    }

    fn merge(&self, left: Element, right: Element) -> Element {
        (**self).merge(left, right)
    }
}

/// The default [`HashPrimitive`]: Poseidon over the Pallas base field
///
/// Fixed-arity messages (1 to 4 elements, which covers Merkle compression and
/// every commitment layout in the pool) are hashed with a constant-length
/// Poseidon sponge; longer messages fall back to a left fold of 2-ary merges.
///
/// ```rust
/// # use shade_primitives::*;
/// let a = Poseidon.merge(Element::new(1), Element::new(2));
/// let b = Poseidon.merge(Element::new(2), Element::new(1));
///
/// assert_ne!(a, b);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Poseidon;

impl Poseidon {
    fn hash_const<const N: usize>(elements: [Element; N]) -> Element {
        type H<const N: usize> = Hash<Base, P128Pow5T3, ConstantLength<N>, 3, 2>;

        let hash = H::<N>::init().hash(elements.map(Element::to_base));
        Element::from_base(hash)
    }
}

impl HashPrimitive for Poseidon {
    fn hash(&self, elements: &[Element]) -> Element {
        match *elements {
            [] => Element::ZERO,
            [a] => Self::hash_const([a]),
            [a, b] => Self::hash_const([a, b]),
            [a, b, c] => Self::hash_const([a, b, c]),
            [a, b, c, d] => Self::hash_const([a, b, c, d]),
            _ => elements
                .iter()
                .copied()
                .reduce(|left, right| self.merge(left, right))
                .unwrap_or(Element::ZERO),
        }
    }
}
