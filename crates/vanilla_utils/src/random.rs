//! Platform randomness used by [`crate::numbers::random_int`] and [`crate::arrays::shuffle`].

#[cfg(not(target_arch = "wasm32"))]
use std::{
    cell::Cell,
    collections::hash_map::RandomState,
    hash::{BuildHasher, Hasher},
};

#[cfg(not(target_arch = "wasm32"))]
thread_local! {
    static XORSHIFT_STATE: Cell<u64> = Cell::new(seed());
}

// Not cryptographic: the seed is the wall clock mixed through `RandomState`, and neither this
// generator nor `Math.random()` is suitable for tokens or keys.
#[cfg(not(target_arch = "wasm32"))]
fn seed() -> u64 {
    let mut hasher = RandomState::new().build_hasher();
    hasher.write_u64(crate::time::unix_time_ms_now());
    // zero is a fixed point of xorshift
    hasher.finish() | 1
}

/// Returns a uniformly distributed float in `[0, 1)`.
///
/// Uses `Math.random()` in the browser and a per-thread xorshift64* generator elsewhere. Neither
/// source is cryptographically secure.
pub fn random_unit() -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Math::random()
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let bits = XORSHIFT_STATE.with(|state| {
            let mut x = state.get();
            x ^= x >> 12;
            x ^= x << 25;
            x ^= x >> 27;
            state.set(x);
            x.wrapping_mul(0x2545_F491_4F6C_DD1D)
        });
        // top 53 bits fill the mantissa exactly
        (bits >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Returns a uniformly distributed index in `0..len`. `len` must be non-zero.
pub(crate) fn random_index(len: usize) -> usize {
    ((random_unit() * len as f64) as usize).min(len.saturating_sub(1))
}
