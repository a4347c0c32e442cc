//! Full lifecycle of value through a local pool: deposit, pay out, withdraw
//! everything, ending with no outstanding unnullified value.

use shade_keeper::*;
use shade_primitives::{Element, Poseidon};

const ASSET: Element = Element::new(1);

fn pool() -> Pool<Poseidon, CachedProofGenerator<MockProofGenerator>, LocalSubmitter> {
    let prover = CachedProofGenerator::new(MockProofGenerator);
    Pool::new(TransactionKeeper::new(Poseidon, prover), LocalSubmitter)
}

/// Outstanding value = sum of amounts whose notes are not yet nullified
fn outstanding(entries: &[(u64, &Note)]) -> u64 {
    entries
        .iter()
        .filter(|(_, note)| !note.nullified())
        .map(|(amount, _)| amount)
        .sum()
}

#[test]
fn lock_transfer_unlock_drains_to_zero() {
    let pool = pool();

    // deposit 100_000 of the asset
    let deposit = pool.lock(ASSET, 100_000, Element::new(1234)).unwrap();
    assert_eq!(deposit.note.index(), 0);
    let root_after_lock = pool.keeper().root();
    assert_ne!(root_after_lock, Element::ZERO);

    // pay 5_000 to a bearer note, keep 95_000
    let transfer = pool
        .transfer(
            Element::ZERO,
            5_000,
            Element::new(0x51),
            Element::ZERO,
            Element::new(0x52),
            std::slice::from_ref(&deposit.commitment),
        )
        .unwrap();

    assert_eq!(transfer.payout_note.index(), 1);
    assert_eq!(transfer.remainder_note.index(), 2);
    assert_eq!(transfer.payout.amount(), 5_000);
    assert_eq!(transfer.remainder.amount(), 95_000);

    // the spend nullifies the deposit note; the event-sync layer would
    // observe the published nullifier and flip the flag
    let mut deposit_note = deposit.note;
    deposit_note.set_nullified(true);

    // withdraw the payout in full
    let first_unlock = pool
        .unlock(
            Element::ZERO,
            5_000,
            Element::new(0x53),
            std::slice::from_ref(&transfer.payout),
        )
        .unwrap();
    assert_eq!(first_unlock.remainder.amount(), 0);

    let mut payout_note = transfer.payout_note;
    payout_note.set_nullified(true);

    // withdraw the remainder in full
    let second_unlock = pool
        .unlock(
            Element::ZERO,
            95_000,
            Element::new(0x54),
            std::slice::from_ref(&transfer.remainder),
        )
        .unwrap();
    assert_eq!(second_unlock.remainder.amount(), 0);

    let mut remainder_note = transfer.remainder_note;
    remainder_note.set_nullified(true);

    let ledger = [
        (100_000, &deposit_note),
        (5_000, &payout_note),
        (95_000, &remainder_note),
    ];
    assert_eq!(outstanding(&ledger), 0);

    // every burned amount used the public zero salt
    assert_eq!(first_unlock.burn.salt(), Element::ZERO);
    assert_eq!(second_unlock.burn.salt(), Element::ZERO);
}

#[test]
fn owned_payout_is_only_spendable_by_its_owner() {
    let pool = pool();
    let alice = Element::new(0xa11ce);
    let bob = Element::new(0xb0b);

    let deposit = pool.lock(ASSET, 10_000, Element::new(99)).unwrap();

    let transfer = pool
        .transfer(
            Element::ZERO,
            4_000,
            Element::new(0x61),
            alice,
            Element::new(0x62),
            std::slice::from_ref(&deposit.commitment),
        )
        .unwrap();

    // bob cannot withdraw alice's payout
    let error = pool
        .unlock(bob, 4_000, Element::new(0x63), std::slice::from_ref(&transfer.payout))
        .unwrap_err();
    assert!(matches!(
        error,
        PoolError::Keeper(KeeperError::Unauthorized { .. })
    ));

    // alice can
    pool.unlock(
        alice,
        4_000,
        Element::new(0x64),
        std::slice::from_ref(&transfer.payout),
    )
    .unwrap();
}

#[test]
fn identical_lock_witnesses_hit_the_proof_cache() {
    let prover = CachedProofGenerator::new(MockProofGenerator);
    let keeper = TransactionKeeper::new(Poseidon, prover);

    // lock witnesses are built against a throwaway tree, so two deposits
    // with identical public data and salt are the same witness content
    let first = keeper.lock(ASSET, 777, Element::new(42)).unwrap();
    let second = keeper.lock(ASSET, 777, Element::new(42)).unwrap();

    assert_eq!(first.witness, second.witness);
    assert_eq!(first.proof, second.proof);
    assert_eq!(keeper.prover().cached_proofs(), 1);

    // the two deposits still land in distinct persistent slots
    assert_eq!(first.note.index(), 0);
    assert_eq!(second.note.index(), 1);

    // a different amount is a different witness
    keeper.lock(ASSET, 778, Element::new(42)).unwrap();
    assert_eq!(keeper.prover().cached_proofs(), 2);
}

#[test]
fn spent_inputs_stay_provable_against_their_old_root() {
    // membership paths snapshot pre-transaction state; after outputs are
    // inserted the old proof no longer matches the new root
    let pool = pool();

    let deposit = pool.lock(ASSET, 1_000, Element::new(7)).unwrap();
    let proof_before = pool.keeper().generate_proof(0);
    let root_before = pool.keeper().root();

    pool.unlock(
        Element::ZERO,
        400,
        Element::new(8),
        std::slice::from_ref(&deposit.commitment),
    )
    .unwrap();

    let leaf = deposit.note.commitment_hash();
    assert!(proof_before.verify(&Poseidon, leaf));
    assert_eq!(proof_before.root, root_before);
    assert_ne!(pool.keeper().root(), root_before);
}
