//! Next-fighter resolution
//!
//! Round-robin within a round in roster registration order. The resolver is
//! a pure read of the combined fighters+parties view: it never mutates
//! status, and calling it twice with identical inputs yields the same
//! answer. `None` means the round is exhausted, which callers must treat as
//! "advance to the next round", not as an error.

use crate::core::{Fighter, MoveStatus, PartyPair};

/// Read-only composite handed to the resolver: the full roster in
/// registration order plus the two registered parties, so ordering
/// decisions see membership without re-deriving it per call.
pub type CombinedFightersParties<'a> = (&'a [Fighter], &'a PartyPair);

/// Find the next fighter due to move, or `None` when every fighter has
/// moved this round.
///
/// Scans the roster in registration order and returns the first fighter
/// still idle. The currently moving fighter is never a candidate; status
/// transitions encode who still needs to move, so the caller invokes this
/// only at move boundaries.
pub fn find_next_fighter(view: CombinedFightersParties<'_>) -> Option<&Fighter> {
    let (fighters, parties) = view;
    debug_assert!(
        fighters.iter().all(|f| parties.contains(f.party_id)),
        "roster references an unregistered party"
    );
    fighters.iter().find(|f| f.move_status == MoveStatus::Idle)
}
