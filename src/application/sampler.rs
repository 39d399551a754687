use crate::domain::features::{FeatureOrder, SamplePayload, SampleRange, SampleRangeTable};
use rand::Rng;

/// Draws one value for every feature in `order`, using the thread-local RNG.
pub fn generate_sample(order: &FeatureOrder, ranges: &SampleRangeTable) -> SamplePayload {
    let mut rng = rand::rng();
    generate_sample_with(order, ranges, &mut rng)
}

/// Same as [`generate_sample`] with a caller-supplied RNG.
pub fn generate_sample_with<R: Rng + ?Sized>(
    order: &FeatureOrder,
    ranges: &SampleRangeTable,
    rng: &mut R,
) -> SamplePayload {
    let mut payload = SamplePayload::default();
    for feature in order.iter() {
        let range = ranges.range_for(feature);
        payload.push(feature, sample_value(range, rng));
    }
    payload
}

/// `min + round(u * (max - min))` with `u` uniform in [0, 1).
fn sample_value<R: Rng + ?Sized>(range: SampleRange, rng: &mut R) -> i64 {
    let u: f64 = rng.random();
    let offset = (u * range.span() as f64).round() as u64;
    range.min.saturating_add_unsigned(offset).min(range.max)
}
