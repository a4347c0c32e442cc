use shade_primitives::Element;

/// The fixed input arity of the split circuit
///
/// Every split consumes exactly this many input notes; callers supplying
/// fewer get zero-amount placeholders appended.
pub const NUM_NOTES: usize = 8;

/// The height of the commitment accumulator (capacity `2^30` notes)
pub const TREE_HEIGHT: usize = 30;

/// The reserved public burn salt
///
/// A zero salt makes a commitment publicly reconstructible and therefore
/// unspendable as a private note. Unlock outputs use it deliberately; any
/// other value-bearing output carrying it is rejected as self-griefing.
pub const BURN_SALT: Element = Element::ZERO;

/// The pinned salt for the bootstrap leg of a lock
///
/// Lock proofs run against a throwaway two-leaf accumulator that the
/// verifier must be able to rebuild without learning the depositor's real
/// salt, so the bootstrap input and all padding use this constant.
pub const BOOTSTRAP_SALT: Element = Element::ONE;
