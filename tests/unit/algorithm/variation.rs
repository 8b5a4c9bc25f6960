//! Tests for position hashing, weighted picks and random orientations

#[cfg(test)]
mod tests {
    use dualgrid::algorithm::rules::{RuleId, Symmetry};
    use dualgrid::algorithm::transform::TileTransform;
    use dualgrid::algorithm::variation::{
        MIRROR_X_SALT, ROTATION_SALT, VARIANT_SALT, position_hash, random_transform,
        unit_interval, weighted_index,
    };
    use dualgrid::spatial::coordinates::RenderCoord;
    use std::collections::HashSet;

    // Tests the hash is a pure function of its inputs
    // Verified by mixing a counter into the hasher
    #[test]
    fn test_position_hash_is_stable() {
        let coord = RenderCoord::new(12, -7);
        assert_eq!(
            position_hash(coord, RuleId(3), VARIANT_SALT, 0),
            position_hash(coord, RuleId(3), VARIANT_SALT, 0)
        );
    }

    // Tests every input influences the hash
    // Verified by leaving the salt out of the hash
    #[test]
    fn test_position_hash_inputs_matter() {
        let coord = RenderCoord::new(1, 2);
        let base = position_hash(coord, RuleId(3), VARIANT_SALT, 0);
        assert_ne!(base, position_hash(coord, RuleId(3), ROTATION_SALT, 0));
        assert_ne!(base, position_hash(coord, RuleId(4), VARIANT_SALT, 0));
        assert_ne!(base, position_hash(coord, RuleId(3), VARIANT_SALT, 1));
        assert_ne!(
            base,
            position_hash(RenderCoord::new(2, 1), RuleId(3), VARIANT_SALT, 0)
        );
    }

    // Tests hashes map into the half-open unit interval
    // Verified by dividing by u32::MAX instead of 2^32
    #[test]
    fn test_unit_interval_bounds() {
        assert!(unit_interval(0).abs() < f64::EPSILON);
        let top = unit_interval(u32::MAX);
        assert!(top < 1.0);
        assert!(top > 0.999_999);
    }

    // Tests samples land in the bucket of their cumulative weight
    // Verified by using <= instead of < for the bucket comparison
    #[test]
    fn test_weighted_index_buckets() {
        let weights = [1.0, 3.0];
        assert_eq!(weighted_index(&weights, 0.0), Some(0));
        assert_eq!(weighted_index(&weights, 0.2), Some(0));
        assert_eq!(weighted_index(&weights, 0.25), Some(1));
        assert_eq!(weighted_index(&weights, 0.99), Some(1));
    }

    // Tests zero weights are never chosen and edge samples are clamped
    // Verified by counting zero-weight entries in the cumulative sum
    #[test]
    fn test_weighted_index_skips_zero_weights() {
        assert_eq!(weighted_index(&[0.0, 2.0, 0.0], 0.0), Some(1));
        assert_eq!(weighted_index(&[0.0, 2.0, 0.0], 1.0), Some(1));
        assert_eq!(weighted_index(&[0.0, 0.0], 0.5), None);
        assert_eq!(weighted_index(&[], 0.5), None);
    }

    // Tests each policy draws from its own family
    // Verified by allowing mirrors under the rotation policy
    #[test]
    fn test_random_transform_families() {
        let rule = RuleId(1);
        let mut rotations = HashSet::new();
        let mut mirrors = HashSet::new();
        for x in 0..128 {
            let coord = RenderCoord::new(x, x / 3);
            assert_eq!(
                random_transform(Symmetry::Fixed, coord, rule, 0),
                TileTransform::IDENTITY
            );
            rotations.insert(random_transform(Symmetry::Rotated, coord, rule, 0));
            mirrors.insert(random_transform(Symmetry::MirrorX, coord, rule, 0));
        }

        assert!(rotations.iter().all(|t| !t.is_mirrored()));
        assert_eq!(rotations.len(), 4);
        assert_eq!(
            mirrors,
            HashSet::from([TileTransform::IDENTITY, TileTransform::MIRROR_X])
        );
    }

    // Tests the double mirror policy reaches all four of its orientations
    // Verified by sharing one salt between both mirror coins
    #[test]
    fn test_random_transform_mirror_xy() {
        let drawn: HashSet<_> = (0..256)
            .map(|x| random_transform(Symmetry::MirrorXY, RenderCoord::new(x, 0), RuleId(2), 5))
            .collect();
        assert_eq!(
            drawn,
            HashSet::from([
                TileTransform::IDENTITY,
                TileTransform::MIRROR_X,
                TileTransform::MIRROR_Y,
                TileTransform::MIRROR_XY,
            ])
        );
        assert_ne!(MIRROR_X_SALT, ROTATION_SALT);
    }
}
