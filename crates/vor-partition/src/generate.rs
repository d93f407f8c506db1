//! Random site placement inside an axis-aligned box.

use rand::Rng;
use vor_math::Vector3;

use crate::{GenerateError, GenerateResult};

/// Draws allowed per site before giving up on finding a unique position.
pub const MAX_ATTEMPTS: usize = 10_000;

/// Largest value a uniform float draw in `[0, 1)` can take. The sampler divides the box
/// extent by this, so the quotient must stay finite too.
const MAX_UNIT_DRAW: f32 = 1.0 - f32::EPSILON;

/// Generate `count` distinct sites in the box spanned by `min` and `max`.
///
/// The first site is `min` and the last is `max`, so the box corners always bound the
/// partition. Every other site is drawn uniformly and redrawn while it equals (within
/// `EPSILON`) a site already placed. Corners may be given in any order; an axis where
/// they agree stays constant.
pub fn generate_sites<R>(count: usize, min: Vector3, max: Vector3, rng: &mut R) -> GenerateResult<Vec<Vector3>>
where
    R: Rng + ?Sized,
{
    if !min.to_array().iter().chain(max.to_array().iter()).all(|c| c.is_finite()) {
        return Err(GenerateError::NonFiniteBounds);
    }

    let lo = min.min(max);
    let hi = min.max(max);
    let extent = (hi - lo) / MAX_UNIT_DRAW;
    if !extent.to_array().iter().all(|c| c.is_finite()) {
        return Err(GenerateError::SpanOverflow);
    }

    let mut sites: Vec<Vector3> = Vec::with_capacity(count);

    for index in 0..count {
        let site = if index == 0 {
            min
        } else if index == count - 1 {
            max
        } else {
            draw_unique(&sites, lo, hi, rng).ok_or(GenerateError::Exhausted {
                index,
                attempts: MAX_ATTEMPTS,
            })?
        };
        sites.push(site);
    }

    tracing::debug!(count, %min, %max, "generated sites");
    Ok(sites)
}

fn draw_unique<R>(existing: &[Vector3], lo: Vector3, hi: Vector3, rng: &mut R) -> Option<Vector3>
where
    R: Rng + ?Sized,
{
    (0..MAX_ATTEMPTS)
        .map(|_| {
            Vector3::new(
                rng.gen_range(lo.x..=hi.x),
                rng.gen_range(lo.y..=hi.y),
                rng.gen_range(lo.z..=hi.z),
            )
        })
        .find(|candidate| !existing.contains(candidate))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_endpoints_are_corners() {
        let mut rng = StdRng::seed_from_u64(1);
        let min = Vector3::new(-10.0, 0.0, -10.0);
        let max = Vector3::new(10.0, 0.0, 10.0);

        let sites = generate_sites(10, min, max, &mut rng).unwrap();

        assert_eq!(sites.len(), 10);
        assert_eq!(sites[0], min);
        assert_eq!(sites[9], max);
    }

    #[test]
    fn test_sites_inside_box_and_unique() {
        let mut rng = StdRng::seed_from_u64(2);
        let min = Vector3::new(-10.0, 0.0, -10.0);
        let max = Vector3::new(10.0, 0.0, 10.0);

        let sites = generate_sites(200, min, max, &mut rng).unwrap();

        for (i, site) in sites.iter().enumerate() {
            assert!((min.x..=max.x).contains(&site.x));
            assert_eq!(site.y, 0.0);
            assert!((min.z..=max.z).contains(&site.z));
            for other in &sites[i + 1..] {
                assert_ne!(site, other);
            }
        }
    }

    #[test]
    fn test_reversed_corners() {
        let mut rng = StdRng::seed_from_u64(3);
        let min = Vector3::new(5.0, 5.0, 5.0);
        let max = Vector3::new(-5.0, -5.0, -5.0);

        let sites = generate_sites(20, min, max, &mut rng).unwrap();

        assert_eq!(sites[0], min);
        assert_eq!(sites[19], max);
        for site in &sites {
            assert!(site.x.abs() <= 5.0 && site.y.abs() <= 5.0 && site.z.abs() <= 5.0);
        }
    }

    #[test]
    fn test_small_counts() {
        let mut rng = StdRng::seed_from_u64(4);
        let (min, max) = (Vector3::ZERO, Vector3::ONE);

        assert!(generate_sites(0, min, max, &mut rng).unwrap().is_empty());
        assert_eq!(generate_sites(1, min, max, &mut rng).unwrap(), vec![min]);
        assert_eq!(generate_sites(2, min, max, &mut rng).unwrap(), vec![min, max]);
    }

    #[test]
    fn test_degenerate_box_exhausts() {
        let mut rng = StdRng::seed_from_u64(5);
        let corner = Vector3::new(1.0, 1.0, 1.0);

        let err = generate_sites(3, corner, corner, &mut rng).unwrap_err();
        assert_eq!(
            err,
            GenerateError::Exhausted {
                index: 1,
                attempts: MAX_ATTEMPTS
            }
        );
    }

    #[test]
    fn test_non_finite_bounds() {
        let mut rng = StdRng::seed_from_u64(6);

        let err = generate_sites(3, Vector3::ZERO, Vector3::POSITIVE_INFINITY, &mut rng);
        assert_eq!(err, Err(GenerateError::NonFiniteBounds));
    }

    #[test]
    fn test_overflowing_extent() {
        let mut rng = StdRng::seed_from_u64(7);
        let min = Vector3::new(-3e38, 0.0, 0.0);
        let max = Vector3::new(3e38, 0.0, 0.0);

        assert_eq!(generate_sites(3, min, max, &mut rng), Err(GenerateError::SpanOverflow));
        assert_eq!(generate_sites(3, max, min, &mut rng), Err(GenerateError::SpanOverflow));
    }

    #[test]
    fn test_wide_finite_extent() {
        let mut rng = StdRng::seed_from_u64(8);
        let min = Vector3::new(-1e38, -1e38, 0.0);
        let max = Vector3::new(1e38, 1e38, 0.0);

        let sites = generate_sites(5, min, max, &mut rng).unwrap();
        assert_eq!(sites.len(), 5);
    }

    #[test]
    fn test_seed_is_deterministic() {
        let (min, max) = (Vector3::ZERO, Vector3::new(100.0, 100.0, 100.0));
        let a = generate_sites(16, min, max, &mut StdRng::seed_from_u64(9)).unwrap();
        let b = generate_sites(16, min, max, &mut StdRng::seed_from_u64(9)).unwrap();

        assert_eq!(a, b);
    }
}
