//! Matrix product kernel behind [`crate::Matrix::dot`].
//!
//! Two backends share one entry point:
//! - default: a safe triple loop over contiguous row-major buffers
//! - optional: `matrixmultiply::sgemm` via the `matrixmultiply` feature

/// Computes `c = a * b` for contiguous row-major buffers.
///
/// Shapes (rows x cols): `a` is `(m, k)`, `b` is `(k, n)`, `c` is `(m, n)`.
/// `c` is overwritten.
///
/// # Panics
///
/// Panics if a buffer length does not match its dimensions.
#[inline]
pub(crate) fn matmul_f32(m: usize, k: usize, n: usize, a: &[f32], b: &[f32], c: &mut [f32]) {
    assert_eq!(Some(a.len()), m.checked_mul(k), "lhs buffer does not match (m, k)");
    assert_eq!(Some(b.len()), k.checked_mul(n), "rhs buffer does not match (k, n)");
    assert_eq!(Some(c.len()), m.checked_mul(n), "output buffer does not match (m, n)");

    if m == 0 || n == 0 {
        return;
    }
    if k == 0 {
        c.fill(0.0);
        return;
    }

    #[cfg(feature = "matrixmultiply")]
    {
        // SAFETY: the asserts above guarantee each buffer holds exactly its dense
        // row-major extent, so every strided access stays in bounds.
        unsafe {
            matrixmultiply::sgemm(
                m,
                k,
                n,
                1.0,
                a.as_ptr(),
                k as isize,
                1,
                b.as_ptr(),
                n as isize,
                1,
                0.0,
                c.as_mut_ptr(),
                n as isize,
                1,
            );
        }
    }

    #[cfg(not(feature = "matrixmultiply"))]
    for row in 0..m {
        let a_row = &a[row * k..(row + 1) * k];
        for col in 0..n {
            let mut acc = 0.0_f32;
            for (p, &av) in a_row.iter().enumerate() {
                acc = av.mul_add(b[p * n + col], acc);
            }
            c[row * n + col] = acc;
        }
    }
}
