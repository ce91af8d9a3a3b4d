//! Orthonormal probabilists' Hermite polynomials.
//!
//! The probabilists' Hermite family `He_k` is orthogonal under the standard
//! normal density:
//!
//! - `He_0(z) = 1`, `He_1(z) = z`
//! - `He_{k+1}(z) = z·He_k(z) - k·He_{k-1}(z)`
//! - `E[He_j(Z) He_k(Z)] = k!·δ_jk` for `Z ~ N(0, 1)`
//!
//! We work with the orthonormal version `ψ_k = He_k / sqrt(k!)`, so chaos
//! coefficients can be squared and summed directly. The normalized recurrence
//!
//! `ψ_{k+1}(z) = (z·ψ_k(z) - sqrt(k)·ψ_{k-1}(z)) / sqrt(k + 1)`
//!
//! avoids the factorial growth of `He_k` at high orders.

/// Evaluate `ψ_0(z), ..., ψ_order(z)` into `out`.
///
/// # Panics
/// Panics if `out.len() != order + 1`.
pub fn hermite_orthonormal_into(z: f64, order: usize, out: &mut [f64]) {
    assert_eq!(out.len(), order + 1, "output slice must hold order + 1 values");

    out[0] = 1.0;
    if order == 0 {
        return;
    }
    out[1] = z;
    for k in 1..order {
        let kf = k as f64;
        out[k + 1] = (z * out[k] - kf.sqrt() * out[k - 1]) / (kf + 1.0).sqrt();
    }
}

/// Evaluate `ψ_0(z), ..., ψ_order(z)`.
pub fn hermite_orthonormal(z: f64, order: usize) -> Vec<f64> {
    let mut out = vec![0.0; order + 1];
    hermite_orthonormal_into(z, order, &mut out);
    out
}

/// Evaluate the un-normalized `He_k(z)`.
pub fn hermite_he(k: usize, z: f64) -> f64 {
    let mut prev = 1.0;
    if k == 0 {
        return prev;
    }
    let mut cur = z;
    for n in 1..k {
        let next = z * cur - n as f64 * prev;
        prev = cur;
        cur = next;
    }
    cur
}
