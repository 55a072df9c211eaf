/// Returns the probability of dropping a majority instance
/// so that, in expectation, the minority label makes up
/// `target` of the downsampled sample.
///
/// Keeping each majority instance with probability `r` turns
/// a natural minority proportion `m` into `m / (m + (1 - m) r)`.
/// Solving for `r` at `target` gives
/// ```text
/// r = (m - target * m) / (target - target * m)
/// ```
/// and the drop probability is `1 - r`.
/// If `m >= target`, nothing needs to be dropped and this returns `0`.
#[inline]
pub fn drop_probability(natural_minority: f64, target: f64) -> f64 {
    if natural_minority >= target {
        return 0f64;
    }

    let keep = (natural_minority - target * natural_minority)
        / (target - target * natural_minority);

    (1f64 - keep).clamp(0f64, 1f64)
}
