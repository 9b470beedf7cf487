pub fn lerp(start: f64, end: f64, amount: f64) -> f64 {
    start + (end - start) * amount
}

/// Generalized mean of the given values with exponent `p`.
pub fn norm(p: f64, values: impl IntoIterator<Item = f64>) -> f64 {
    values
        .into_iter()
        .fold(0.0, |sum, x| sum + x.powf(p))
        .powf(p.recip())
}
