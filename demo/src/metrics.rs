/// Peak signal-to-noise ratio of `actual` against `reference`, in dB.
///
/// Infinite when the frames are identical.
pub fn psnr_u8(reference: &[u8], actual: &[u8]) -> f64 {
    assert_eq!(reference.len(), actual.len(), "frame length mismatch");
    if reference.is_empty() {
        return f64::INFINITY;
    }

    let squared: f64 = reference
        .iter()
        .zip(actual)
        .map(|(&a, &b)| {
            let d = a as f64 - b as f64;
            d * d
        })
        .sum();
    let mse = squared / reference.len() as f64;
    if mse == 0.0 {
        f64::INFINITY
    } else {
        10.0 * (255.0 * 255.0 / mse).log10()
    }
}
