// ============================================================================
// ENGINE.RS - Discrete Convolution Engine
// ============================================================================
//
// This module computes y[n] = x[n] * h[n] by the direct summation definition:
//
//     y[n] = Σ x[k] · h[n-k]    for 0 <= k < len(x) and 0 <= n-k < len(h)
//
// Everything here is a pure function of (x, h, n). Nothing is cached between
// calls; the editor recomputes the whole output after every edit and the
// step viewer asks for one output index at a time. The O(N·M) double loop
// is the flip-and-slide sum being visualized, so there is no FFT path.
//
// EMPTY INPUT:
// An empty operand produces an empty output, and asking for a step outside
// the output range produces all-zero products. Callers are expected to keep
// signals at 3 samples or more.
// ============================================================================

/// Number of output samples for operands of the given lengths.
///
/// Returns 0 when either operand is empty.
pub fn output_length(x_len: usize, h_len: usize) -> usize {
    if x_len == 0 || h_len == 0 {
        return 0;
    }
    x_len + h_len - 1
}

/// Full discrete convolution of `x` with `h`.
///
/// Output length is `x.len() + h.len() - 1`.
pub fn convolve(x: &[f64], h: &[f64]) -> Vec<f64> {
    let len = output_length(x.len(), h.len());
    let mut y = vec![0.0; len];

    for (n, out) in y.iter_mut().enumerate() {
        *out = overlap_sum(x, h, n);
    }

    y
}

/// The engine's state while evaluating a single output index.
#[derive(Debug, Clone, PartialEq)]
pub struct StepState {
    /// Output index being computed
    pub n: usize,

    /// `x[k] * h[n-k]` for every k in x's index range, zero where `h[n-k]`
    /// falls outside h
    pub products: Vec<f64>,

    /// Sum of `products`, equal to `convolve(x, h)[n]`
    pub sum: f64,

    /// Inclusive range of k where h[n-k] overlaps x, or None when it doesn't
    overlap: Option<(usize, usize)>,
}

impl StepState {
    /// The `(k, x[k] * h[n-k])` pairs inside the overlap window.
    ///
    /// Unlike filtering `products` for non-zero values, this keeps products
    /// that happen to be zero because a sample is zero.
    pub fn contributing(&self) -> Vec<(usize, f64)> {
        match self.overlap {
            Some((lo, hi)) => (lo..=hi).map(|k| (k, self.products[k])).collect(),
            None => Vec::new(),
        }
    }

    /// Inclusive `(first_k, last_k)` overlap window, if any.
    pub fn overlap(&self) -> Option<(usize, usize)> {
        self.overlap
    }
}

/// Evaluate the convolution sum at output index `n`.
pub fn step(x: &[f64], h: &[f64], n: usize) -> StepState {
    let mut products = vec![0.0; x.len()];
    let mut sum = 0.0;
    let mut overlap: Option<(usize, usize)> = None;

    for (k, &x_k) in x.iter().enumerate() {
        // h index for this k; skip when it is before h[0] or past the end
        let Some(h_idx) = n.checked_sub(k) else {
            break;
        };
        if h_idx >= h.len() {
            continue;
        }

        let product = x_k * h[h_idx];
        products[k] = product;
        sum += product;

        overlap = match overlap {
            Some((lo, _)) => Some((lo, k)),
            None => Some((k, k)),
        };
    }

    StepState {
        n,
        products,
        sum,
        overlap,
    }
}

/// Output samples `y[0..=upto]` computed one step at a time.
///
/// `upto` is clamped to the last output index, so the result is always a
/// prefix of [`convolve`].
pub fn partial(x: &[f64], h: &[f64], upto: usize) -> Vec<f64> {
    let len = output_length(x.len(), h.len());
    if len == 0 {
        return Vec::new();
    }
    let last = upto.min(len - 1);
    (0..=last).map(|n| step(x, h, n).sum).collect()
}

/// The reversed kernel slid to position `n`, as `(k, h[n-k])` pairs.
///
/// Only samples that exist in `h` are reported, ordered by increasing k.
/// k may be negative when the kernel hangs off the left edge of x.
pub fn flipped_and_shifted(h: &[f64], n: usize) -> Vec<(isize, f64)> {
    let n = n as isize;
    (0..h.len())
        .rev()
        .map(|j| (n - j as isize, h[j]))
        .collect()
}

// Sum of x[k] * h[n-k] over the overlap window without allocating.
fn overlap_sum(x: &[f64], h: &[f64], n: usize) -> f64 {
    // k must satisfy k <= n and n - k < h.len()
    let k_min = (n + 1).saturating_sub(h.len());
    let k_max = n.min(x.len().saturating_sub(1));
    if x.is_empty() || k_min > k_max {
        return 0.0;
    }

    (k_min..=k_max).map(|k| x[k] * h[n - k]).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len(), "length mismatch: {:?} vs {:?}", actual, expected);
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!((a - e).abs() < EPS, "index {}: {} != {}", i, a, e);
        }
    }

    #[test]
    fn textbook_example() {
        let x = [1.0, 2.0, 1.0];
        let h = [0.5, 0.3, 0.2];
        let y = convolve(&x, &h);
        assert_close(&y, &[0.5, 1.3, 1.3, 0.7, 0.2]);
        assert!((step(&x, &h, 2).sum - 1.3).abs() < EPS);
        // Σy = Σx · Σh
        assert!((y.iter().sum::<f64>() - 4.0).abs() < EPS);
    }

    #[test]
    fn shifted_impulse_copies_kernel() {
        let y = convolve(&[1.0, 0.0, 0.0], &[1.0, 1.0, 1.0]);
        assert_close(&y, &[1.0, 1.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn all_zero_input_gives_zero_output() {
        let y = convolve(&[0.0, 0.0, 0.0], &[1.0, 2.0, 3.0]);
        assert_close(&y, &[0.0; 5]);
    }

    #[test]
    fn output_length_is_sum_minus_one() {
        for lx in 1..8 {
            for lh in 1..8 {
                let x: Vec<f64> = (0..lx).map(|i| i as f64 - 1.5).collect();
                let h: Vec<f64> = (0..lh).map(|i| 0.25 * i as f64 + 1.0).collect();
                assert_eq!(convolve(&x, &h).len(), lx + lh - 1);
                assert_eq!(output_length(lx, lh), lx + lh - 1);
            }
        }
    }

    #[test]
    fn step_sum_matches_direct_convolution_at_every_index() {
        let x = [0.3, -1.2, 2.5, 0.0, 4.0, -0.7];
        let h = [1.5, -0.25, 0.8];
        let y = convolve(&x, &h);
        for (n, &y_n) in y.iter().enumerate() {
            let state = step(&x, &h, n);
            assert_eq!(state.n, n);
            assert_eq!(state.products.len(), x.len());
            assert!((state.sum - y_n).abs() < EPS, "n={}", n);
            let resummed: f64 = state.products.iter().sum();
            assert!((resummed - y_n).abs() < EPS);
        }
    }

    #[test]
    fn step_zero_fills_products_outside_overlap() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let h = [1.0, 1.0];
        let state = step(&x, &h, 1);
        assert_close(&state.products, &[1.0, 2.0, 0.0, 0.0]);
        assert_eq!(state.overlap(), Some((0, 1)));

        let last = step(&x, &h, 4);
        assert_close(&last.products, &[0.0, 0.0, 0.0, 4.0]);
        assert_eq!(last.overlap(), Some((3, 3)));
    }

    #[test]
    fn contributing_keeps_zero_products_inside_window() {
        let x = [1.0, 0.0, 2.0];
        let h = [1.0, 1.0, 1.0];
        let state = step(&x, &h, 2);
        assert_eq!(state.contributing(), vec![(0, 1.0), (1, 0.0), (2, 2.0)]);
    }

    #[test]
    fn partial_is_prefix_of_full_output() {
        let x = [1.0, 2.0, 1.0, -1.0];
        let h = [0.5, 0.3, 0.2];
        let y = convolve(&x, &h);
        for upto in 0..y.len() {
            assert_close(&partial(&x, &h, upto), &y[..=upto]);
        }
        // past the end clamps to the full output
        assert_close(&partial(&x, &h, 100), &y);
    }

    #[test]
    fn convolution_commutes() {
        let x = [0.9, -0.1, 3.3, 2.0, 0.5];
        let h = [1.0, -2.0, 0.25];
        assert_close(&convolve(&x, &h), &convolve(&h, &x));
    }

    #[test]
    fn unit_kernel_is_identity() {
        let x = [4.0, -3.5, 0.0, 1.25];
        assert_close(&convolve(&x, &[1.0]), &x);
    }

    #[test]
    fn kernel_is_reversed_and_slid() {
        let h = [0.5, 0.3, 0.2];
        assert_eq!(
            flipped_and_shifted(&h, 0),
            vec![(-2, 0.2), (-1, 0.3), (0, 0.5)]
        );
        assert_eq!(
            flipped_and_shifted(&h, 3),
            vec![(1, 0.2), (2, 0.3), (3, 0.5)]
        );
    }

    #[test]
    fn empty_operands_produce_empty_output() {
        assert!(convolve(&[], &[1.0, 2.0]).is_empty());
        assert!(convolve(&[1.0], &[]).is_empty());
        assert!(partial(&[], &[1.0], 3).is_empty());
        let state = step(&[1.0, 2.0], &[], 1);
        assert_eq!(state.sum, 0.0);
        assert!(state.contributing().is_empty());
    }

    #[test]
    fn step_past_output_range_is_all_zero() {
        let state = step(&[1.0, 2.0, 3.0], &[1.0, 1.0, 1.0], 10);
        assert_eq!(state.products, vec![0.0; 3]);
        assert_eq!(state.sum, 0.0);
        assert_eq!(state.overlap(), None);
    }
}
