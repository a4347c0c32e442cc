use shade_primitives::{Element, HashPrimitive};

use super::{Accumulator, TreeFullError};

impl<const HEIGHT: usize, H: HashPrimitive> Accumulator<HEIGHT, H> {
    /// Insert `leaf` at the next free index, returning the index it landed at
    ///
    /// Recomputes the path from the new leaf to the root in `O(HEIGHT)`
    /// merges. A node at an even position merges with [`Element::ZERO`] on
    /// the right (its sibling slot is still empty); a node at an odd position
    /// merges with the cached left sibling from the previous insert at that
    /// level.
    ///
    /// Returns [`TreeFullError`] without mutating anything if all `2^HEIGHT`
    /// slots are taken.
    pub fn insert(&mut self, leaf: Element) -> Result<u64, TreeFullError> {
        if self.next_index >= Self::CAPACITY {
            return Err(TreeFullError {
                capacity: Self::CAPACITY,
            });
        }

        let index = self.next_index;
        let mut position = usize::try_from(index).unwrap_or_else(|_| {
            unreachable!("next_index below 2^HEIGHT always fits in usize")
        });

        set_node(&mut self.layers[0], position, leaf);

        let mut current = leaf;

        for level in 0..HEIGHT {
            if position % 2 == 0 {
                // left child: remember it for the insert that fills the
                // right slot, and pad with zero for now
                self.filled_subtrees[level] = current;
                current = self.hasher.merge(current, Element::ZERO);
            } else {
                current = self.hasher.merge(self.filled_subtrees[level], current);
            }

            position /= 2;
            set_node(&mut self.layers[level + 1], position, current);
        }

        self.root = current;
        self.next_index += 1;

        tracing::trace!(index, root = %self.root, "inserted leaf");

        Ok(index)
    }
}

/// Write `value` at `index`, growing the layer by one slot if needed
///
/// Inserts only ever touch the last position of a layer or the one just past
/// it, so a single conditional push suffices.
fn set_node(layer: &mut Vec<Element>, index: usize, value: Element) {
    if index == layer.len() {
        layer.push(value);
    } else {
        layer[index] = value;
    }
}
