//! Closed-form integrals of the 3-D Brownian-dynamics pair propagator.
//!
//! For two particles with contact distance `sigma` and relative diffusion
//! coefficient `d`, a free-space Green's function started at contact and
//! integrated over the region `r > sigma` gives the quantities below.
//! [`igbd_3d`] normalises the bimolecular reaction probability per step;
//! [`igbd_r_3d`] is its partial integral up to `r`, inverted by
//! [`random_ipv_3d`] to draw inter-particle vectors for dissociation.

use std::f64::consts::PI;

use brume_core::Real3;

use crate::random::RandomSource;

const SQRT_PI: f64 = 1.772_453_850_905_516;

/// Maximum bisection iterations in [`random_ipv_3d`].
const MAX_BISECTION_STEPS: usize = 100;

/// Complementary error function.
///
/// Chebyshev fit with fractional error below 1.2e-7 everywhere.
pub fn erfc(x: f64) -> f64 {
    let z = x.abs();
    let t = 1.0 / (1.0 + 0.5 * z);
    let poly = -1.265_512_23
        + t * (1.000_023_68
            + t * (0.374_091_96
                + t * (0.096_784_18
                    + t * (-0.186_288_06
                        + t * (0.278_868_07
                            + t * (-1.135_203_98
                                + t * (1.488_515_87 + t * (-0.822_152_23 + t * 0.170_872_77))))))));
    let ans = t * (-z * z + poly).exp();
    if x >= 0.0 {
        ans
    } else {
        2.0 - ans
    }
}

/// Error function, `1 - erfc(x)`.
pub fn erf(x: f64) -> f64 {
    1.0 - erfc(x)
}

/// Integral of the pair propagator over `r > sigma` after time `t`.
///
/// Returns zero when `d * t == 0`.
pub fn igbd_3d(sigma: f64, t: f64, d: f64) -> f64 {
    let dt = d * t;
    if dt <= 0.0 {
        return 0.0;
    }
    let dt2 = 2.0 * dt;
    let sqrt_dt = dt.sqrt();
    let sigma_sq = sigma * sigma;

    let term1 = 1.0 / (3.0 * SQRT_PI);
    let term2 = sigma_sq - dt2;
    let term3 = dt2 - 3.0 * sigma_sq;
    let term4 = SQRT_PI * sigma_sq * sigma * erfc(sigma / sqrt_dt);

    term1 * (-sqrt_dt * (term2 * (-sigma_sq / dt).exp() + term3) + term4)
}

/// Integral of the pair propagator over `sigma < r' < r` after time `t`.
///
/// Zero at `r == sigma`; tends to [`igbd_3d`] as `r` grows.
pub fn igbd_r_3d(r: f64, sigma: f64, t: f64, d: f64) -> f64 {
    let dt = d * t;
    if dt <= 0.0 {
        return 0.0;
    }
    let dt2 = 2.0 * dt;
    let dt4 = 4.0 * dt;
    let sqrt_dt = dt.sqrt();
    let sqrt_dt4 = dt4.sqrt();
    let sigma_sq = sigma * sigma;
    let sigma_cb = sigma_sq * sigma;
    let r_cb = r * r * r;
    let rps = r + sigma;
    let rms = r - sigma;

    let term1 = -2.0 * sqrt_dt / SQRT_PI;
    let term2 = (-sigma_sq / dt).exp() * (sigma_sq - dt2);
    let term3 = -(-rps * rps / dt4).exp() * (rms * rms + r * sigma - dt2);
    let term4 = (-rms * rms / dt4).exp() * (rps * rps - r * sigma - dt2);
    let term5 = -3.0 * sigma_sq + dt2;
    let term6 = (sigma_cb - r_cb) * erf(rms / sqrt_dt4);
    let term7 = -2.0 * sigma_cb * erf(sigma / sqrt_dt);
    let term8 = (sigma_cb + r_cb) * erf(rps / sqrt_dt4);

    (term1 * (term2 + term3 + term4 + term5) + term6 + term7 + term8) / 6.0
}

/// Unit vector uniformly distributed on the sphere.
pub fn random_direction<R: RandomSource + ?Sized>(rng: &mut R) -> Real3 {
    let cos_theta = rng.uniform(-1.0, 1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
    let phi = rng.uniform(0.0, 2.0 * PI);
    Real3::new(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta)
}

/// Draw a separation distance `r >= sigma` from the normalised
/// [`igbd_r_3d`] distribution.
///
/// Bisects on `[sigma, sigma + 10 * sqrt(6 d t)]`; draws beyond the upper
/// bound are clamped to it. With `d * t == 0` the distance is `sigma`.
pub fn draw_r_3d<R: RandomSource + ?Sized>(rng: &mut R, sigma: f64, t: f64, d: f64) -> f64 {
    let dt = d * t;
    if dt <= 0.0 {
        return sigma;
    }
    let target = rng.uniform(0.0, 1.0) * igbd_3d(sigma, t, d);
    let mut low = sigma;
    let mut high = sigma + 10.0 * (6.0 * dt).sqrt();
    if igbd_r_3d(high, sigma, t, d) <= target {
        return high;
    }
    for _ in 0..MAX_BISECTION_STEPS {
        let mid = 0.5 * (low + high);
        if igbd_r_3d(mid, sigma, t, d) < target {
            low = mid;
        } else {
            high = mid;
        }
        if high - low <= f64::EPSILON * high {
            break;
        }
    }
    0.5 * (low + high)
}

/// Draw an inter-particle vector for a pair dissociating at contact
/// distance `sigma` with relative diffusion coefficient `d`.
pub fn random_ipv_3d<R: RandomSource + ?Sized>(rng: &mut R, sigma: f64, t: f64, d: f64) -> Real3 {
    let r = draw_r_3d(rng, sigma, t, d);
    random_direction(rng) * r
}
