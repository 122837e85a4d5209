/// Discrete centroid of an aggregated output curve: sum(x * mu) / sum(mu)
/// over the output grid, a Riemann-sum approximation of the center of mass.
///
/// Returns `None` when the curve carries no mass (no rule fired); the
/// engine substitutes the documented midpoint fallback in that case.
pub fn centroid(curve: &[(f64, f64)]) -> Option<f64> {
    let (weighted, mass) = curve
        .iter()
        .fold((0.0, 0.0), |(num, den), (x, mu)| (num + x * mu, den + mu));

    if mass > 0.0 {
        Some(weighted / mass)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sampled<F: Fn(f64) -> f64>(min: f64, max: f64, n: usize, f: F) -> Vec<(f64, f64)> {
        (0..n)
            .map(|i| {
                let x = min + (max - min) * i as f64 / (n - 1) as f64;
                (x, f(x))
            })
            .collect()
    }

    #[test]
    fn symmetric_curve_centers_on_peak() {
        // triangle peaking at 17 over [10, 24]
        let curve = sampled(0.0, 30.0, 3001, |x| {
            if x < 10.0 || x > 24.0 {
                0.0
            } else if x < 17.0 {
                (x - 10.0) / 7.0
            } else {
                (24.0 - x) / 7.0
            }
        });
        let c = centroid(&curve).unwrap();
        assert!((c - 17.0).abs() < 0.01, "centroid = {}", c);
    }

    #[test]
    fn empty_mass_yields_none() {
        let curve = sampled(0.0, 30.0, 301, |_| 0.0);
        assert!(centroid(&curve).is_none());
    }

    #[test]
    fn open_ended_trapezoid_matches_analytic_value() {
        // trapezoid (0, 0, 4, 6): analytic centroid 38/15 ~= 2.5333
        let curve = sampled(0.0, 30.0, 3001, |x| {
            if x <= 4.0 {
                1.0
            } else if x < 6.0 {
                (6.0 - x) / 2.0
            } else {
                0.0
            }
        });
        let c = centroid(&curve).unwrap();
        assert!((c - 38.0 / 15.0).abs() < 0.01, "centroid = {}", c);
    }

    #[test]
    fn converges_as_resolution_increases() {
        let f = |x: f64| {
            if x < 20.0 {
                0.0
            } else if x < 24.0 {
                (x - 20.0) / 4.0
            } else {
                1.0
            }
        };
        let coarse = centroid(&sampled(0.0, 30.0, 61, f)).unwrap();
        let fine = centroid(&sampled(0.0, 30.0, 6001, f)).unwrap();
        assert!((coarse - fine).abs() < 0.2, "{} vs {}", coarse, fine);
    }
}
