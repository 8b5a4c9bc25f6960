//! Tests for `NeighborPattern` construction, display and transformation

#[cfg(test)]
mod tests {
    use dualgrid::algorithm::pattern::{NeighborPattern, PATTERN_COUNT};
    use dualgrid::algorithm::rules::Constraint;
    use dualgrid::algorithm::transform::TileTransform;
    use dualgrid::spatial::coordinates::Corner;
    use std::collections::HashSet;

    // Tests corner flags map to mask bits in canonical order
    // Verified by swapping the bottom-right and top-left bit positions
    #[test]
    fn test_from_corners_bit_order() {
        let pattern = NeighborPattern::from_corners([true, false, false, true]);
        assert_eq!(pattern.bits(), 0b1001);
        assert!(pattern.is_filled(Corner::BottomLeft));
        assert!(pattern.is_filled(Corner::TopRight));
        assert!(!pattern.is_filled(Corner::TopLeft));
        assert_eq!(pattern.filled_count(), 2);
    }

    // Tests constraints produce the matching pattern
    // Verified by treating Empty constraints as filled
    #[test]
    fn test_from_constraints() {
        let constraints = [
            Constraint::Empty,
            Constraint::Filled,
            Constraint::Filled,
            Constraint::Empty,
        ];
        assert_eq!(NeighborPattern::from_constraints(&constraints).bits(), 0b0110);
    }

    // Tests high bits are discarded
    // Verified by removing the mask in from_bits
    #[test]
    fn test_from_bits_masks_high_bits() {
        assert_eq!(NeighborPattern::from_bits(0xF3).bits(), 0b0011);
    }

    // Tests every pattern is enumerated once
    // Verified by iterating to PATTERN_COUNT - 1
    #[test]
    fn test_all_patterns_distinct() {
        let patterns: HashSet<_> = NeighborPattern::all().collect();
        assert_eq!(patterns.len(), PATTERN_COUNT);
        assert!(patterns.contains(&NeighborPattern::EMPTY));
        assert!(patterns.contains(&NeighborPattern::FULL));
    }

    // Tests display draws the top row first
    // Verified by printing the bottom row first
    #[test]
    fn test_display_layout() {
        let top_edge = NeighborPattern::from_bits(0b1100);
        assert_eq!(top_edge.to_string(), "##/..");
        let bottom_left = NeighborPattern::from_bits(0b0001);
        assert_eq!(bottom_left.to_string(), "../#.");
    }

    // Tests quarter turn moves the bottom-left corner to the top-left
    // Verified by rotating counter-clockwise in TileTransform::apply
    #[test]
    fn test_rotation_moves_corners_clockwise() {
        let bottom_left = NeighborPattern::EMPTY.with(Corner::BottomLeft);
        let rotated = bottom_left.transformed(TileTransform::ROTATE_90);
        assert_eq!(rotated, NeighborPattern::EMPTY.with(Corner::TopLeft));

        let half = bottom_left.transformed(TileTransform::ROTATE_180);
        assert_eq!(half, NeighborPattern::EMPTY.with(Corner::TopRight));
    }

    // Tests mirrors swap the expected corners
    // Verified by negating y for the horizontal mirror
    #[test]
    fn test_mirrors_swap_corners() {
        let bottom_left = NeighborPattern::EMPTY.with(Corner::BottomLeft);
        assert_eq!(
            bottom_left.transformed(TileTransform::MIRROR_X),
            NeighborPattern::EMPTY.with(Corner::BottomRight)
        );
        assert_eq!(
            bottom_left.transformed(TileTransform::MIRROR_Y),
            NeighborPattern::EMPTY.with(Corner::TopLeft)
        );
    }

    // Tests transformations preserve the number of filled corners
    // Verified by dropping corners that map onto the same corner
    #[test]
    fn test_transform_preserves_fill_count() {
        let transforms = [
            TileTransform::IDENTITY,
            TileTransform::ROTATE_90,
            TileTransform::ROTATE_270,
            TileTransform::MIRROR_X,
            TileTransform::MIRROR_Y,
        ];
        for pattern in NeighborPattern::all() {
            for transform in transforms {
                assert_eq!(
                    pattern.transformed(transform).filled_count(),
                    pattern.filled_count()
                );
            }
        }
    }
}
