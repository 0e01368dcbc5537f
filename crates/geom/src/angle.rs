use crate::scalar::Scalar;
use crate::Vector;

/// A monotonic stand-in for the angle of a vector, in `[0, 128)`.
///
/// Straight up (negative y) maps to 0, negative x to 32, positive y to 64 and
/// positive x to 96. The value grows monotonically with the true angle in
/// between, which is all that is needed to sort edges cyclically around a
/// vertex. It avoids `atan2` and is exact on the axes.
///
/// The zero vector maps to 0.
pub fn pseudo_angle<S: Scalar>(v: Vector<S>) -> S {
    let quarter = S::value(32.0);

    if v.x == S::ZERO {
        return if v.y <= S::ZERO {
            S::ZERO
        } else {
            quarter * S::TWO
        };
    } else if v.y == S::ZERO {
        return if v.x <= S::ZERO {
            quarter
        } else {
            S::value(96.0)
        };
    }

    let v = v.normalize();
    if v.y < S::ZERO {
        if v.x < S::ZERO {
            -quarter * v.x
        } else {
            S::value(128.0) - quarter * v.x
        }
    } else {
        quarter * S::TWO + quarter * v.x
    }
}

#[test]
fn axes() {
    use crate::vector;

    assert_eq!(pseudo_angle(vector(0.0f64, -1.0)), 0.0);
    assert_eq!(pseudo_angle(vector(-3.0f64, 0.0)), 32.0);
    assert_eq!(pseudo_angle(vector(0.0f64, 0.5)), 64.0);
    assert_eq!(pseudo_angle(vector(7.0f64, 0.0)), 96.0);
}

#[test]
fn monotonic() {
    use crate::vector;

    let count = 360;
    // Start right after "up" and rotate towards negative x.
    let mut prev = 0.0f64;
    for i in 1..count {
        let a = (i as f64) / (count as f64) * 2.0 * core::f64::consts::PI;
        let v = vector(-a.sin(), -a.cos());
        let angle = pseudo_angle(v);
        assert!(angle > prev, "{} <= {} at step {}", angle, prev, i);
        assert!(angle < 128.0);
        prev = angle;
    }
}
