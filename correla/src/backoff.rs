use rand::Rng;

/// Delay in milliseconds: `base_ms` plus up to `jitter_percent` of it at random.
pub fn jitter_wait(base_ms: u64, jitter_percent: u32) -> u64 {
    if jitter_percent == 0 {
        return base_ms;
    }
    let spread = base_ms.saturating_mul(u64::from(jitter_percent)) / 100;
    base_ms.saturating_add(rand::rng().random_range(0..spread.max(1)))
}
