//! Review-score math.

/// Lower bound of the 95% Wilson confidence interval for a
/// positive-review proportion, as a rounded integer percentage.
///
/// Raw percentages overstate games with few reviews; the Wilson bound
/// pulls a 100% score from one review down to 21 while barely moving a
/// large sample. With no reviews there is no sample to correct for, so
/// the raw score comes back unchanged.
pub fn wilson_lower_bound(score: u8, reviews: u32) -> u8 {
    if reviews == 0 {
        return score;
    }

    // z for 95% confidence
    let z = 1.96_f64;
    let n = f64::from(reviews);
    let p = f64::from(score) / 100.0;

    let z2 = z * z;
    let centre = p + z2 / (2.0 * n);
    let spread = z * (p * (1.0 - p) / n + z2 / (4.0 * n * n)).sqrt();
    let lower = (centre - spread) / (1.0 + z2 / n);

    (lower * 100.0).round() as u8
}
