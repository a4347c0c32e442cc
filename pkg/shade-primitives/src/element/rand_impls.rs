use rand::{CryptoRng, RngCore};

use crate::Element;

impl Element {
    /// Generate a uniformly random canonical [`Element`] from a CSPRNG
    ///
    /// The result is always canonical (see [`Element::canonicalize`]), so it
    /// round-trips through a [`Base`] unchanged.
    ///
    /// [`Base`]: crate::Base
    #[must_use]
    pub fn secure_random<R: RngCore + CryptoRng>(mut rng: R) -> Self {
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes);

        let mut element = Self::from_be_bytes(bytes);
        element.canonicalize();
        element
    }
}
