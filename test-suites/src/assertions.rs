pub fn assert_approx_eq_abs(a: i128, b: i128, delta: i128) {
    assert!(
        a >= b - delta && a <= b + delta,
        "assertion failed: `(left != right)` \
         (left: `{:?}`, right: `{:?}`, epsilon: `{:?}`)",
        a,
        b,
        delta
    );
}
