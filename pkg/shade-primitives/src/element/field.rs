use ethnum::{uint, U256};
use ff::PrimeField;

use crate::{Base, Element};

impl Element {
    /// The modulus of the underlying prime field (the Pallas base field)
    pub const MODULUS: Element = Element(uint!(
        "0x40000000000000000000000000000000224698fc094cf91b992d30ed00000001"
    ));

    /// Convert this [`Element`] to its equivalent [`Base`] representation
    #[inline]
    #[must_use]
    pub fn to_base(self) -> Base {
        let u8s = self.0.to_le_bytes();
        Base::from_raw(u8s_to_u64(u8s))
    }

    /// Create an [`Element`] from a [`Base`]
    #[inline]
    #[must_use]
    pub fn from_base(base: Base) -> Element {
        let u8s = base.to_repr();
        Self(U256::from_le_bytes(u8s))
    }

    /// Reduce this element to its canonical form
    ///
    /// [`Base`]s are integers modulo "some prime number", and as such have a
    /// smaller set of possible values than [`Element`], which is just a 256-bit
    /// unsigned integer. This function reduces an element to its canonical form
    /// by applying this modulus.
    ///
    /// Elements in canonical form are guaranteed to be unchanged when
    /// converting to/from a [`Base`]
    #[inline]
    pub fn canonicalize(&mut self) {
        self.0 %= Self::MODULUS.0;
    }

    /// Whether this [`Element`] is in its canonical form
    #[inline]
    #[must_use]
    pub fn is_canonical(&self) -> bool {
        let mut canonical = *self;
        canonical.canonicalize();
        self == &canonical
    }
}

impl From<Base> for Element {
    fn from(value: Base) -> Self {
        Element::from_base(value)
    }
}

impl From<Element> for Base {
    fn from(value: Element) -> Self {
        value.to_base()
    }
}

fn u8s_to_u64(u8s: [u8; 32]) -> [u64; 4] {
    core::array::from_fn(|i| {
        let mut limb = [0u8; 8];
        limb.copy_from_slice(&u8s[i * 8..(i + 1) * 8]);
        u64::from_le_bytes(limb)
    })
}

#[cfg(test)]
mod tests {
    use test_strategy::proptest;

    use super::*;

    #[proptest]
    fn to_from_base_biject(mut element: Element) {
        element.canonicalize();

        let base = element.to_base();
        let element_again = Element::from_base(base);

        assert_eq!(element, element_again);
    }

    #[test]
    fn modulus_is_not_canonical() {
        assert!(Element::ONE.is_canonical());
        assert!(!Element::MODULUS.is_canonical());

        let mut wrapped = Element::MODULUS + Element::ONE;
        wrapped.canonicalize();
        assert_eq!(wrapped, Element::ONE);
    }
}
