use crate::{Element, HashPrimitive};

/// Compute the root hash of a Merkle tree from a leaf and its sibling path
///
/// `siblings` yields tuples of the sibling value and a side bit, deepest level
/// first. The side bit follows the pool's pinned convention: `false` (side 0)
/// means the current node is the **left** child, so the sibling merges on the
/// right; `true` (side 1) means the current node is the right child.
///
/// ```rust
/// # use shade_primitives::*;
/// let hasher = Poseidon;
///
/// // a two-level tree over the leaves [0, 1, 2, 3]
/// let a = hasher.merge(Element::new(0), Element::new(1));
/// let b = hasher.merge(Element::new(2), Element::new(3));
/// let root = hasher.merge(a, b);
///
/// // prove that `2` is at index 2: sibling 3 on the right, then `a` on the left
/// let siblings = [(Element::new(3), false), (a, true)];
///
/// assert_eq!(compute_merkle_root(&hasher, Element::new(2), siblings), root);
/// assert_ne!(compute_merkle_root(&hasher, Element::ZERO, siblings), root);
/// ```
pub fn compute_merkle_root<H, I>(hasher: &H, mut leaf: Element, siblings: I) -> Element
where
    H: HashPrimitive,
    I: IntoIterator<Item = (Element, bool)>,
{
    for (sibling, side) in siblings {
        match side {
            // side 0: this node is on the left
            false => leaf = hasher.merge(leaf, sibling),

            // side 1: this node is on the right
            true => leaf = hasher.merge(sibling, leaf),
        }
    }

    leaf
}
