//! Data-parallel evaluation over `ndarray` vectors.
//!
//! Each element is independent, so the work is split across rayon's global
//! pool; results match element-wise scalar evaluation exactly. The first
//! failing element's error is returned.

use ndarray::Array1;
use rayon::prelude::*;

use elliptic_types::error::{EllipticError, EllipticResult};

use crate::backend::EllipticBackend;

fn check_len(expected: usize, got: usize) -> EllipticResult<()> {
    if expected != got {
        return Err(EllipticError::ShapeMismatch { expected, got });
    }
    Ok(())
}

/// Apply a one-argument rule to every element of `a`.
pub fn map1<F>(a: &Array1<f64>, f: F) -> EllipticResult<Array1<f64>>
where
    F: Fn(f64) -> EllipticResult<f64> + Sync + Send,
{
    let xs = a.to_vec();
    let out = xs
        .par_iter()
        .map(|&x| f(x))
        .collect::<EllipticResult<Vec<f64>>>()?;
    Ok(Array1::from(out))
}

/// Apply a two-argument rule pairwise; `a` and `b` must have equal length.
pub fn map2<F>(a: &Array1<f64>, b: &Array1<f64>, f: F) -> EllipticResult<Array1<f64>>
where
    F: Fn(f64, f64) -> EllipticResult<f64> + Sync + Send,
{
    check_len(a.len(), b.len())?;
    let (xs, ys) = (a.to_vec(), b.to_vec());
    let out = xs
        .par_iter()
        .zip(ys.par_iter())
        .map(|(&x, &y)| f(x, y))
        .collect::<EllipticResult<Vec<f64>>>()?;
    Ok(Array1::from(out))
}

/// Apply a three-argument rule element-wise.
pub fn map3<F>(
    a: &Array1<f64>,
    b: &Array1<f64>,
    c: &Array1<f64>,
    f: F,
) -> EllipticResult<Array1<f64>>
where
    F: Fn(f64, f64, f64) -> EllipticResult<f64> + Sync + Send,
{
    check_len(a.len(), b.len())?;
    check_len(a.len(), c.len())?;
    let (xs, ys, zs) = (a.to_vec(), b.to_vec(), c.to_vec());
    let out = xs
        .par_iter()
        .zip(ys.par_iter())
        .zip(zs.par_iter())
        .map(|((&x, &y), &z)| f(x, y, z))
        .collect::<EllipticResult<Vec<f64>>>()?;
    Ok(Array1::from(out))
}

pub fn ellipk_batch<B: EllipticBackend + ?Sized>(
    backend: &B,
    m: &Array1<f64>,
) -> EllipticResult<Array1<f64>> {
    map1(m, |m| backend.ellipk(m))
}

pub fn ellipe_batch<B: EllipticBackend + ?Sized>(
    backend: &B,
    m: &Array1<f64>,
) -> EllipticResult<Array1<f64>> {
    map1(m, |m| backend.ellipe(m))
}

pub fn ellipf_batch<B: EllipticBackend + ?Sized>(
    backend: &B,
    phi: &Array1<f64>,
    m: &Array1<f64>,
) -> EllipticResult<Array1<f64>> {
    map2(phi, m, |phi, m| backend.ellipf(phi, m))
}

pub fn ellipeinc_batch<B: EllipticBackend + ?Sized>(
    backend: &B,
    phi: &Array1<f64>,
    m: &Array1<f64>,
) -> EllipticResult<Array1<f64>> {
    map2(phi, m, |phi, m| backend.ellipeinc(phi, m))
}

pub fn ellippiinc_batch<B: EllipticBackend + ?Sized>(
    backend: &B,
    n: &Array1<f64>,
    phi: &Array1<f64>,
    m: &Array1<f64>,
) -> EllipticResult<Array1<f64>> {
    map3(n, phi, m, |n, phi, m| backend.ellippiinc(n, phi, m))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Carlson;
    use crate::derivatives::ellipk_dm;

    #[test]
    fn test_batch_matches_scalar() {
        let b = Carlson::default();
        let m = Array1::linspace(0.0, 0.99, 64);
        let k = ellipk_batch(&b, &m).unwrap();
        for (i, &mi) in m.iter().enumerate() {
            assert_eq!(k[i], b.ellipk(mi).unwrap());
        }

        let phi = Array1::linspace(-3.0, 6.0, 64);
        let f = ellipf_batch(&b, &phi, &m).unwrap();
        let e = ellipeinc_batch(&b, &phi, &m).unwrap();
        for i in 0..64 {
            assert_eq!(f[i], b.ellipf(phi[i], m[i]).unwrap());
            assert_eq!(e[i], b.ellipeinc(phi[i], m[i]).unwrap());
        }
    }

    #[test]
    fn test_batch_of_derivative_rule() {
        let b = Carlson::default();
        let m = Array1::from(vec![0.0, 1e-5, 0.3, 0.9]);
        let dk = map1(&m, |m| ellipk_dm(&b, m)).unwrap();
        assert_eq!(dk[2], ellipk_dm(&b, 0.3).unwrap());
    }

    #[test]
    fn test_shape_mismatch() {
        let b = Carlson::default();
        let phi = Array1::zeros(3);
        let m = Array1::zeros(4);
        let err = ellipf_batch(&b, &phi, &m).unwrap_err();
        assert!(matches!(err, EllipticError::ShapeMismatch { expected: 3, got: 4 }));
        let n = Array1::zeros(3);
        assert!(ellippiinc_batch(&b, &n, &phi, &m).is_err());
    }

    #[test]
    fn test_error_propagates() {
        let b = Carlson::default();
        let m = Array1::from(vec![0.2, 1.5, 0.4]);
        assert!(ellipe_batch(&b, &m).unwrap_err().is_domain());
    }

    #[test]
    fn test_empty_input() {
        let b = Carlson::default();
        let m: Array1<f64> = Array1::zeros(0);
        assert_eq!(ellipk_batch(&b, &m).unwrap().len(), 0);
    }
}
