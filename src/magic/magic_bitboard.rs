//! Magic-bitboard lookup tables for rook-type and bishop-type movement.
//!
//! For each square the tables hold the relevant-occupancy mask, a multiplier
//! that perfectly hashes every subset of that mask, and the shift/offset that
//! place the hashed index inside one shared attack array. Magic numbers are
//! found at start-up by a seeded random search, so table construction is
//! repeatable from run to run under the same `rand` release. `StdRng` makes
//! no promise across `rand` versions, so callers must not persist the magics.
//!
//! Lifecycle: `MagicTables::initialize()` builds a table set; dropping it is
//! the matching terminate step. Most callers use `MagicTables::shared()`, a
//! lazily built read-only instance that is safe to share across threads.

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, trace};

use crate::game_state::chess_types::Square;
use crate::moves::bishop_moves::{bishop_attacks, BISHOP_RELEVANT_OCCUPANCY};
use crate::moves::rook_moves::{rook_attacks, ROOK_RELEVANT_OCCUPANCY};

/// Seed for the magic-number search.
pub const MAGIC_SEED: u64 = 0x7261_795F_6D61_6769;

/// Candidates whose top byte of `mask * magic` has fewer set bits than this
/// rarely hash well, so they are rejected before the full trial.
const MIN_HIGH_BITS: u32 = 6;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MagicEntry {
    pub mask: u64,
    pub magic: u64,
    pub shift: u32,
    pub offset: usize,
}

impl MagicEntry {
    #[inline]
    fn index(&self, blocker_key: u64) -> usize {
        debug_assert_eq!(blocker_key & !self.mask, 0, "blocker key outside relevant mask");
        self.offset + (blocker_key.wrapping_mul(self.magic) >> self.shift) as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SliderKind {
    Rook,
    Bishop,
}

impl SliderKind {
    fn relevant_occupancy(self, square: Square) -> u64 {
        match self {
            SliderKind::Rook => ROOK_RELEVANT_OCCUPANCY[square as usize],
            SliderKind::Bishop => BISHOP_RELEVANT_OCCUPANCY[square as usize],
        }
    }

    fn reference_attacks(self, square: Square, occupancy: u64) -> u64 {
        match self {
            SliderKind::Rook => rook_attacks(square, occupancy),
            SliderKind::Bishop => bishop_attacks(square, occupancy),
        }
    }
}

/// Precomputed sliding-piece lookups.
#[derive(Debug, Clone)]
pub struct MagicTables {
    rook: [MagicEntry; 64],
    bishop: [MagicEntry; 64],
    attacks: Vec<u64>,
}

impl MagicTables {
    /// Build every table from scratch with the default seed.
    pub fn initialize() -> Self {
        Self::initialize_with_seed(MAGIC_SEED)
    }

    pub fn initialize_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut attacks = Vec::new();
        let mut attempts = 0u64;

        let rook = build_entries(SliderKind::Rook, &mut rng, &mut attacks, &mut attempts);
        let rook_slots = attacks.len();
        let bishop = build_entries(SliderKind::Bishop, &mut rng, &mut attacks, &mut attempts);

        debug!(
            rook_slots,
            bishop_slots = attacks.len() - rook_slots,
            attempts,
            "magic tables initialized"
        );

        Self {
            rook,
            bishop,
            attacks,
        }
    }

    /// Process-wide instance, built on first use.
    pub fn shared() -> &'static MagicTables {
        static TABLES: OnceLock<MagicTables> = OnceLock::new();
        TABLES.get_or_init(MagicTables::initialize)
    }

    #[inline]
    pub fn rook_relevant_occupancy(&self, square: Square) -> u64 {
        self.rook[square as usize].mask
    }

    #[inline]
    pub fn bishop_relevant_occupancy(&self, square: Square) -> u64 {
        self.bishop[square as usize].mask
    }

    /// Rook destinations for `blocker_key`, which must lie inside the square's
    /// relevant-occupancy mask. Blocking squares of either color are included.
    #[inline]
    pub fn rook_destinations(&self, square: Square, blocker_key: u64) -> u64 {
        self.attacks[self.rook[square as usize].index(blocker_key)]
    }

    #[inline]
    pub fn bishop_destinations(&self, square: Square, blocker_key: u64) -> u64 {
        self.attacks[self.bishop[square as usize].index(blocker_key)]
    }

    /// Rook attacks against a full-board occupancy.
    #[inline]
    pub fn rook_attacks(&self, square: Square, occupancy: u64) -> u64 {
        self.rook_destinations(square, occupancy & self.rook_relevant_occupancy(square))
    }

    #[inline]
    pub fn bishop_attacks(&self, square: Square, occupancy: u64) -> u64 {
        self.bishop_destinations(square, occupancy & self.bishop_relevant_occupancy(square))
    }

    /// Number of attack slots shared by all squares.
    pub fn table_len(&self) -> usize {
        self.attacks.len()
    }
}

fn build_entries(
    kind: SliderKind,
    rng: &mut StdRng,
    attacks: &mut Vec<u64>,
    attempts: &mut u64,
) -> [MagicEntry; 64] {
    let mut entries = [MagicEntry::default(); 64];

    for square in 0..64u8 {
        let mask = kind.relevant_occupancy(square);
        let bits = mask.count_ones();
        let shift = 64 - bits;

        let subsets = enumerate_subsets(mask);
        let reference: Vec<u64> = subsets
            .iter()
            .map(|&blockers| kind.reference_attacks(square, blockers))
            .collect();

        let (magic, slots, tries) = find_magic(mask, shift, &subsets, &reference, rng);
        *attempts += tries;

        trace!(?kind, square, bits, tries, magic, "magic found");

        entries[square as usize] = MagicEntry {
            mask,
            magic,
            shift,
            offset: attacks.len(),
        };
        attacks.extend_from_slice(&slots);
    }

    entries
}

/// Every subset of `mask`, via the carry-rippler walk.
fn enumerate_subsets(mask: u64) -> Vec<u64> {
    let mut subsets = Vec::with_capacity(1usize << mask.count_ones());
    let mut subset = 0u64;

    loop {
        subsets.push(subset);
        subset = subset.wrapping_sub(mask) & mask;
        if subset == 0 {
            break;
        }
    }

    subsets
}

/// Search for a multiplier that maps every subset to a slot without a
/// destructive collision. Returns the magic, the filled slots, and the number
/// of candidates tried.
fn find_magic(
    mask: u64,
    shift: u32,
    subsets: &[u64],
    reference: &[u64],
    rng: &mut StdRng,
) -> (u64, Vec<u64>, u64) {
    let size = 1usize << (64 - shift);
    let mut slots = vec![0u64; size];
    // A slot is filled for the current trial only when its epoch matches.
    let mut epoch = vec![0u64; size];
    let mut trial = 0u64;

    loop {
        let magic = rng.next_u64() & rng.next_u64() & rng.next_u64();
        if (mask.wrapping_mul(magic) & 0xFF00_0000_0000_0000).count_ones() < MIN_HIGH_BITS {
            continue;
        }

        trial += 1;
        let mut collided = false;

        for (&blockers, &attack) in subsets.iter().zip(reference) {
            let index = (blockers.wrapping_mul(magic) >> shift) as usize;
            if epoch[index] != trial {
                epoch[index] = trial;
                slots[index] = attack;
            } else if slots[index] != attack {
                collided = true;
                break;
            }
        }

        if !collided {
            for (slot, stamp) in slots.iter_mut().zip(&epoch) {
                if *stamp != trial {
                    *slot = 0;
                }
            }
            return (magic, slots, trial);
        }
    }
}
