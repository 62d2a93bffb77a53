use rand::{rngs::StdRng, SeedableRng};

pub const DEFAULT_SEED: u64 = 42;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a over the bytes of `parts`, stable across processes and platforms.
pub fn stable_hash<I, B>(parts: I) -> u64
where
    I: IntoIterator<Item = B>,
    B: AsRef<[u8]>,
{
    parts.into_iter().fold(FNV_OFFSET_BASIS, |hash, part| {
        part.as_ref()
            .iter()
            .fold(hash, |h, byte| (h ^ u64::from(*byte)).wrapping_mul(FNV_PRIME))
    })
}

/// Generator for a named entity (zone, shipment) under a base seed.
pub fn keyed_rng(base_seed: u64, key: u64) -> StdRng {
    StdRng::seed_from_u64(base_seed ^ key.rotate_left(17))
}
