use crate::distribution::Distribution;

/// Substituted for zero probabilities, keeps the divergence finite
pub const EPSILON: f32 = 1e-16;

#[inline(always)]
fn non_zero(v: f32) -> f32 {
    if v == 0.0 {
        EPSILON
    } else {
        v
    }
}

/// Discrete Kullback-Leibler divergence `D(P‖Q) = Σ p·ln(p/q)`,
/// zeroes in both vectors replaced by [`EPSILON`].
///
/// `p` and `q` are parallel vectors over the same vocabulary.
pub fn kl_divergence(p: &[f32], q: &[f32]) -> f32 {
    debug_assert_eq!(p.len(), q.len(), "vectors must be parallel");

    p.iter()
        .zip(q)
        .map(|(&p, &q)| {
            let p = non_zero(p);
            let q = non_zero(q);
            p * (p / q).ln()
        })
        .sum()
}

/// Divergence of the `input` distribution from the `reference` one,
/// over the union of their tokens.
///
/// Positive infinity if `input` has no mass on that vocabulary.
pub fn divergence(input: &Distribution, reference: &Distribution) -> f32 {
    let vocabulary = input
        .tokens()
        .chain(reference.tokens().filter(|t| !input.contains(t)));

    let (p, q): (Vec<f32>, Vec<f32>) = vocabulary
        .map(|token| (input.get(token) as f32, reference.get(token) as f32))
        .unzip();

    if !p.iter().any(|&v| v != 0.0) {
        return f32::INFINITY;
    }

    kl_divergence(&p, &q)
}
