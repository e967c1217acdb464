//! Pure normalization helpers shared by adapters and the fallback generator:
//! platform-adjusted pricing and the controlled delivery-time vocabulary.

use rand::Rng;
use rust_decimal::Decimal;

pub const DELIVERY_INSTANT: &str = "Instant";

/// Platform-adjusted price: `round(base * multiplier * (1 ± jitter))` in
/// whole currency units, clamped non-negative. The jitter keeps the "same"
/// underlying item from showing one flat number on every platform.
pub fn platform_price(
    base: Decimal,
    multiplier: Decimal,
    jitter_fraction: f64,
    rng: &mut impl Rng,
) -> Decimal {
    let jitter = jitter_fraction.clamp(0.0, 0.95);
    let factor = if jitter > 0.0 { 1.0 + rng.gen_range(-jitter..=jitter) } else { 1.0 };
    let jittered = base * multiplier * Decimal::from_f64_retain(factor).unwrap_or(Decimal::ONE);
    jittered.round_dp(0).max(Decimal::ZERO)
}

/// Uniform pseudo-random amount in `[low, high]`, rounded to whole units.
/// Returns `low` when the range is empty or inverted.
pub fn decimal_between(
    rng: &mut impl Rng,
    low: Decimal,
    high: Decimal,
) -> Decimal {
    if high <= low {
        return low.round_dp(0);
    }
    let fraction: f64 = rng.gen();
    let span = high - low;
    let offset = span * Decimal::from_f64_retain(fraction).unwrap_or(Decimal::ZERO);
    (low + offset).round_dp(0)
}

pub fn minutes(value: u32) -> String {
    format!("{value} mins")
}

pub fn minutes_range(low: u32, high: u32) -> String {
    format!("{low}-{high} mins")
}

pub fn days_range(low: u32, high: u32) -> String {
    format!("{low}-{high} days")
}

/// Comparable ordering key for delivery-time strings. The classification is
/// string containment, not unit-aware parsing: callers that need strict
/// numeric comparison must pre-normalize their strings into durations first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum DeliverySpeed {
    Instant,
    Minutes,
    Other,
}

impl DeliverySpeed {
    /// The fast class used by the recommendation heuristic.
    pub fn is_fast(self) -> bool {
        matches!(self, Self::Instant | Self::Minutes)
    }
}

pub fn delivery_speed(text: &str) -> DeliverySpeed {
    let lowered = text.to_lowercase();
    if lowered.contains("instant") {
        DeliverySpeed::Instant
    } else if lowered.contains("min") {
        DeliverySpeed::Minutes
    } else {
        DeliverySpeed::Other
    }
}

/// Display form of a free-text query: first letter of each word upper-cased.
pub fn title_case(query: &str) -> String {
    query
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Stable 64-bit fingerprint of a query, case- and whitespace-insensitive.
/// Keeps synthesized base prices and review counts identical across repeated
/// searches for the same text.
pub fn query_seed(query: &str) -> u64 {
    let digest = blake3::hash(query.trim().to_lowercase().as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest.as_bytes()[..8]);
    u64::from_le_bytes(bytes)
}

/// Query-derived base price inside a category's price band.
pub fn base_price_for_query(query: &str, price_range: (Decimal, Decimal)) -> Decimal {
    let (low, high) = price_range;
    if high <= low {
        return low.round_dp(0);
    }
    let steps = query_seed(query) % 1_000;
    let fraction = Decimal::from(steps) / Decimal::from(1_000u32);
    (low + (high - low) * fraction).round_dp(0)
}
