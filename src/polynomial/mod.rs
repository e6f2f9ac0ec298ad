//! Real-root solvers for quadratic, cubic and quartic polynomials
//!
//! Each solver returns every real root in ascending order, preserving
//! multiplicity (a double root of a quadratic appears twice). "No real
//! roots" is an empty result, never an error. Non-finite coefficients are
//! undefined behavior; callers validate upstream.
//!
//! The solvers share [`add_with_cancellation_check`], which clamps sums
//! that suffer near-total cancellation to exactly zero instead of letting
//! rounding noise pick a branch.

use crate::constants::{EPSILON14, EPSILON15};
use crate::math::sign_not_zero;

/// Sums two addends, clamping near-total cancellation to zero.
///
/// When the addends have opposite signs and their sum is smaller than
/// `tolerance` relative to the larger magnitude, the true sum is dominated
/// by rounding noise; this returns exactly 0.0 so downstream branch
/// selection (discriminant signs, sign disambiguation) stays deterministic.
pub fn add_with_cancellation_check(left: f64, right: f64, tolerance: f64) -> f64 {
    let difference = left + right;
    if left * right < 0.0 && (difference / left.abs().max(right.abs())).abs() < tolerance {
        return 0.0;
    }
    difference
}

/// Real roots of `a*x^2 + b*x + c = 0`, ascending, with multiplicity.
///
/// Degrades to a linear solve when `a` is zero; an unsolvable constant
/// yields an empty result. The general case uses the cancellation-avoiding
/// `q = -(b + sign(b)*sqrt(d))/2` formulation so the smaller-magnitude root
/// is computed by division rather than subtraction.
///
/// # Examples
///
/// ```rust
/// use ellipsoidal::polynomial::quadratic_real_roots;
///
/// assert_eq!(quadratic_real_roots(1.0, -3.0, 2.0), vec![1.0, 2.0]);
/// assert!(quadratic_real_roots(1.0, 0.0, 1.0).is_empty());
/// ```
pub fn quadratic_real_roots(a: f64, b: f64, c: f64) -> Vec<f64> {
    if a == 0.0 {
        if b == 0.0 {
            // Constant equation, no finite root.
            return vec![];
        }
        return vec![-c / b];
    }
    if b == 0.0 {
        if c == 0.0 {
            return vec![0.0, 0.0];
        }
        let ratio = -c / a;
        if ratio < 0.0 {
            return vec![];
        }
        let root = ratio.sqrt();
        return vec![-root, root];
    }
    if c == 0.0 {
        let ratio = -b / a;
        if ratio < 0.0 {
            return vec![ratio, 0.0];
        }
        return vec![0.0, ratio];
    }

    let b_squared = b * b;
    let four_ac = 4.0 * a * c;
    let radicand = add_with_cancellation_check(b_squared, -four_ac, EPSILON14);
    if radicand < 0.0 {
        return vec![];
    }

    let q = -0.5 * add_with_cancellation_check(b, sign_not_zero(b) * radicand.sqrt(), EPSILON14);
    // q/a and c/q land in either order depending on the signs of a and b.
    let root0 = q / a;
    let root1 = c / q;
    if root0 <= root1 {
        vec![root0, root1]
    } else {
        vec![root1, root0]
    }
}

/// Real roots of `a*x^3 + b*x^2 + c*x + d = 0`, ascending, with multiplicity.
///
/// Every vanishing-coefficient combination has an explicit fallback that
/// factors out `x` or `x^2` and defers to the quadratic or linear solve.
/// The full cubic is solved on its depressed form `t^3 + p*t + q`,
/// branching on the discriminant between the trigonometric three-root
/// solution and the Cardano-style single-root solution.
pub fn cubic_real_roots(a: f64, b: f64, c: f64, d: f64) -> Vec<f64> {
    if a == 0.0 {
        return quadratic_real_roots(b, c, d);
    }
    if d == 0.0 {
        // x * (a*x^2 + b*x + c) = 0
        let mut roots = quadratic_real_roots(a, b, c);
        roots.push(0.0);
        roots.sort_unstable_by(|left, right| left.partial_cmp(right).unwrap());
        return roots;
    }
    if b == 0.0 && c == 0.0 {
        // a*x^3 + d = 0 has a single real root.
        let ratio = -d / a;
        let root = if ratio < 0.0 {
            -(-ratio).cbrt()
        } else {
            ratio.cbrt()
        };
        return vec![root];
    }

    // Depress: x = t - b/(3a) turns the cubic into t^3 + p*t + q = 0.
    let shift = -b / (3.0 * a);
    let b_over_a = b / a;
    let c_over_a = c / a;
    let d_over_a = d / a;
    let p = c_over_a - b_over_a * b_over_a / 3.0;
    let q = 2.0 * b_over_a * b_over_a * b_over_a / 27.0 - b_over_a * c_over_a / 3.0 + d_over_a;

    let discriminant = -4.0 * p * p * p - 27.0 * q * q;

    let mut roots = if discriminant > 0.0 {
        // Three distinct real roots via the trigonometric solution;
        // discriminant > 0 guarantees p < 0 so the sqrt arguments are valid.
        let amplitude = 2.0 * (-p / 3.0).sqrt();
        let theta = ((3.0 * q) / (2.0 * p) * (-3.0 / p).sqrt()).acos() / 3.0;
        let third_turn = 2.0 * std::f64::consts::PI / 3.0;
        vec![
            shift + amplitude * theta.cos(),
            shift + amplitude * (theta - third_turn).cos(),
            shift + amplitude * (theta - 2.0 * third_turn).cos(),
        ]
    } else if discriminant < 0.0 {
        // One real root, Cardano-style. The sign treats zero as positive
        // (deliberately not the standard sign function): q == 0 must stay
        // on the positive branch so the cube-root magnitude below is
        // nonzero and the companion root -p/(3u) is well defined.
        let s = sign_not_zero(q);
        let radical = (q * q / 4.0 + p * p * p / 27.0).sqrt();
        let u = -(s * (q.abs() / 2.0 + radical)).cbrt();
        vec![shift + u - p / (3.0 * u)]
    } else if p == 0.0 {
        // Triple root at the shift.
        vec![shift, shift, shift]
    } else {
        // Discriminant exactly zero with p != 0: one double, one simple.
        let double_root = -3.0 * q / (2.0 * p);
        let simple_root = 3.0 * q / p;
        vec![shift + double_root, shift + double_root, shift + simple_root]
    };

    roots.sort_unstable_by(|left, right| left.partial_cmp(right).unwrap());
    roots
}

/// Real roots of `a*x^4 + b*x^3 + c*x^2 + d*x + e = 0`, ascending,
/// with multiplicity.
///
/// Degrades to the cubic solver when the leading coefficient is
/// negligible. Otherwise the quartic is normalized and depressed to
/// `y^4 + p*y^2 + q*y + r`; one real root `h^2` of the resolvent cubic
/// `z^3 + 2p*z^2 + (p^2 - 4r)*z - q^2 = 0` splits it into the two
/// quadratic factors `(y^2 + h*y + m)(y^2 - h*y + n)`. A vanishing
/// resolvent root means `q ~ 0` and the biquadratic `y^4 + p*y^2 + r` is
/// solved directly.
pub fn quartic_real_roots(a: f64, b: f64, c: f64, d: f64, e: f64) -> Vec<f64> {
    if a.abs() < EPSILON15 {
        return cubic_real_roots(b, c, d, e);
    }
    let a3 = b / a;
    let a2 = c / a;
    let a1 = d / a;
    let a0 = e / a;

    // Depress: x = y - a3/4.
    let a3_squared = a3 * a3;
    let p = a2 - 3.0 * a3_squared / 8.0;
    let q = a1 - a2 * a3 / 2.0 + a3_squared * a3 / 8.0;
    let r = a0 - a1 * a3 / 4.0 + a2 * a3_squared / 16.0 - 3.0 * a3_squared * a3_squared / 256.0;
    let shift = -a3 / 4.0;

    let resolvent_constant = add_with_cancellation_check(p * p, -4.0 * r, EPSILON14);
    let resolvent_roots = cubic_real_roots(1.0, 2.0 * p, resolvent_constant, -q * q);
    let h_squared = match resolvent_roots.last() {
        // Use the largest root; the resolvent always has one >= 0 when the
        // quartic has real roots.
        Some(&largest) => largest,
        None => return vec![],
    };

    if h_squared.abs() < EPSILON14 {
        // q ~ 0: biquadratic y^4 + p*y^2 + r = 0.
        let squares = quadratic_real_roots(1.0, p, r);
        if squares.len() != 2 {
            return vec![];
        }
        let (square0, square1) = (squares[0], squares[1]);
        if square0 >= 0.0 && square1 >= 0.0 {
            let y0 = square0.sqrt();
            let y1 = square1.sqrt();
            return vec![shift - y1, shift - y0, shift + y0, shift + y1];
        }
        if square1 >= 0.0 {
            let y = square1.sqrt();
            return vec![shift - y, shift + y];
        }
        return vec![];
    }
    if h_squared < 0.0 {
        return vec![];
    }

    let h = h_squared.sqrt();
    let m = (p + h_squared - q / h) / 2.0;
    let n = (p + h_squared + q / h) / 2.0;

    let mut roots: Vec<f64> = quadratic_real_roots(1.0, h, m)
        .into_iter()
        .chain(quadratic_real_roots(1.0, -h, n))
        .map(|y| shift + y)
        .collect();
    roots.sort_unstable_by(|left, right| left.partial_cmp(right).unwrap());
    roots
}
