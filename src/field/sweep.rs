//! Row-wise sweeps over field storage.
//!
//! Each sweep hands out disjoint mutable column slices of a single output
//! field while the closure reads any number of input fields by shared
//! reference. Because outputs are borrowed mutably, the compiler rejects a
//! stage that would read the field it writes.
//!
//! With the `parallel` feature, latitude rows are distributed over the rayon
//! thread pool. Per-cell arithmetic is identical in both paths, so results
//! are bit-for-bit the same.

use super::{Field2D, Field3D};

/// Visit every interior column `(j, k)` of `out`, `j in 1..=nj`, `k in 1..=nk`.
///
/// Ghost cells of `out` are never touched.
pub fn for_each_interior_column<F>(out: &mut Field3D, f: F)
where
    F: Fn(usize, usize, &mut [f64]) + Sync + Send,
{
    let (nj, nk, nl) = (out.nj(), out.nk(), out.nl());
    let row = out.row_len() * nl;

    let body = |(k, row_data): (usize, &mut [f64])| {
        if k == 0 || k > nk {
            return;
        }
        for j in 1..=nj {
            f(j, k, &mut row_data[j * nl..(j + 1) * nl]);
        }
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        out.as_mut_slice()
            .par_chunks_mut(row)
            .enumerate()
            .for_each(body);
    }
    #[cfg(not(feature = "parallel"))]
    out.as_mut_slice()
        .chunks_mut(row)
        .enumerate()
        .for_each(body);
}

/// Visit every column of `out`, ghost cells included.
pub fn for_each_column<F>(out: &mut Field3D, f: F)
where
    F: Fn(usize, usize, &mut [f64]) + Sync + Send,
{
    let (nj, nl) = (out.nj(), out.nl());
    let row = out.row_len() * nl;

    let body = |(k, row_data): (usize, &mut [f64])| {
        for j in 0..nj + 2 {
            f(j, k, &mut row_data[j * nl..(j + 1) * nl]);
        }
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        out.as_mut_slice()
            .par_chunks_mut(row)
            .enumerate()
            .for_each(body);
    }
    #[cfg(not(feature = "parallel"))]
    out.as_mut_slice()
        .chunks_mut(row)
        .enumerate()
        .for_each(body);
}

/// Visit every interior column of two outputs at once.
///
/// Used by stages that produce a pair of fields from the same inputs.
pub fn for_each_interior_pair<F>(out_a: &mut Field3D, out_b: &mut Field3D, f: F)
where
    F: Fn(usize, usize, &mut [f64], &mut [f64]) + Sync + Send,
{
    debug_assert_eq!(out_a.as_slice().len(), out_b.as_slice().len());
    let (nj, nk, nl) = (out_a.nj(), out_a.nk(), out_a.nl());
    let row = out_a.row_len() * nl;

    let body = |(k, (a, b)): (usize, (&mut [f64], &mut [f64]))| {
        if k == 0 || k > nk {
            return;
        }
        for j in 1..=nj {
            let span = j * nl..(j + 1) * nl;
            f(j, k, &mut a[span.clone()], &mut b[span]);
        }
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        out_a
            .as_mut_slice()
            .par_chunks_mut(row)
            .zip(out_b.as_mut_slice().par_chunks_mut(row))
            .enumerate()
            .for_each(body);
    }
    #[cfg(not(feature = "parallel"))]
    out_a
        .as_mut_slice()
        .chunks_mut(row)
        .zip(out_b.as_mut_slice().chunks_mut(row))
        .enumerate()
        .for_each(body);
}

/// Set every interior cell of a horizontal field to `f(j, k)`.
pub fn for_each_interior_cell<F>(out: &mut Field2D, f: F)
where
    F: Fn(usize, usize) -> f64 + Sync + Send,
{
    let (nj, nk) = (out.nj(), out.nk());
    let row = out.row_len();

    let body = |(k, row_data): (usize, &mut [f64])| {
        if k == 0 || k > nk {
            return;
        }
        for j in 1..=nj {
            row_data[j] = f(j, k);
        }
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        out.as_mut_slice()
            .par_chunks_mut(row)
            .enumerate()
            .for_each(body);
    }
    #[cfg(not(feature = "parallel"))]
    out.as_mut_slice()
        .chunks_mut(row)
        .enumerate()
        .for_each(body);
}
