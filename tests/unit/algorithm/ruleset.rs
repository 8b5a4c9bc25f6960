//! Tests for rule table validation, dispatch and variant selection

#[cfg(test)]
mod tests {
    use dualgrid::DualGridError;
    use dualgrid::algorithm::pattern::NeighborPattern;
    use dualgrid::algorithm::rules::{
        ObjectId, Rule, RuleId, SelectionMode, Symmetry, VariantId, WeightedVariant,
    };
    use dualgrid::algorithm::ruleset::{Evaluation, RuleSet, RuleSetOptions};
    use dualgrid::algorithm::transform::TileTransform;
    use dualgrid::spatial::coordinates::{Corner, RenderCoord};
    use std::collections::HashSet;

    fn origin() -> RenderCoord {
        RenderCoord::new(0, 0)
    }

    fn random_rule(id: u32, weights: &[f64]) -> Rule {
        let outputs = weights
            .iter()
            .enumerate()
            .map(|(index, &weight)| WeightedVariant::weighted(VariantId(index as u32), weight))
            .collect();
        Rule::from_pattern(RuleId(id), NeighborPattern::FULL)
            .with_outputs(outputs)
            .with_selection(SelectionMode::Random)
    }

    // Tests the standard table resolves every pattern
    // Verified by skipping the last pattern when building the table
    #[test]
    fn test_standard_is_complete() {
        let rules = RuleSet::standard();
        assert_eq!(rules.len(), 16);
        assert!(rules.is_complete());
        assert!(rules.coverage().is_complete());
    }

    // Tests standard variants equal the pattern mask
    // Verified by offsetting variant ids by one
    #[test]
    fn test_standard_variant_ids() {
        let rules = RuleSet::standard();
        for pattern in NeighborPattern::all().filter(|p| !p.is_empty()) {
            let Evaluation::Tile(tile) = rules.evaluate(pattern, origin()) else {
                panic!("pattern {pattern} did not produce a tile");
            };
            assert_eq!(tile.variant, VariantId(u32::from(pattern.bits())));
            assert_eq!(tile.transform, TileTransform::IDENTITY);
            assert!(!tile.animated);
        }
    }

    // Tests the standard all-empty rule matches but draws nothing
    // Verified by giving the all-empty rule an output
    #[test]
    fn test_standard_empty_is_blank() {
        let rules = RuleSet::standard();
        assert_eq!(
            rules.evaluate(NeighborPattern::EMPTY, origin()),
            Evaluation::Blank { rule: RuleId(0) }
        );
    }

    // Tests the first matching rule wins over later ones
    // Verified by searching rules from the end
    #[test]
    fn test_first_match_wins() {
        let rules = RuleSet::new(
            vec![
                Rule::from_pattern(RuleId(1), NeighborPattern::FULL).with_variant(VariantId(10)),
                Rule::from_pattern(RuleId(2), NeighborPattern::FULL).with_variant(VariantId(20)),
            ],
            RuleSetOptions::default(),
        )
        .unwrap();

        let tile = rules.evaluate(NeighborPattern::FULL, origin());
        assert_eq!(tile.tile().map(|t| t.variant), Some(VariantId(10)));
        assert_eq!(tile.tile().map(|t| t.rule_index), Some(0));
    }

    // Tests unmatched patterns report NoMatch
    // Verified by returning Blank for unmatched patterns
    #[test]
    fn test_no_match() {
        let rules = RuleSet::new(
            vec![Rule::from_pattern(RuleId(1), NeighborPattern::FULL).with_variant(VariantId(1))],
            RuleSetOptions::default(),
        )
        .unwrap();

        let evaluation = rules.evaluate(NeighborPattern::EMPTY, origin());
        assert!(evaluation.is_no_match());
        assert_eq!(rules.coverage().count(), 1);
        assert!(!rules.is_complete());
        assert!(rules.matching_rule(NeighborPattern::EMPTY).is_none());
    }

    // Tests symmetry expansion matches rotated patterns and can be disabled
    // Verified by ignoring the symmetry_expansion option
    #[test]
    fn test_symmetry_expansion_option() {
        let rule = Rule::from_pattern(RuleId(1), NeighborPattern::EMPTY.with(Corner::BottomLeft))
            .with_variant(VariantId(7))
            .with_symmetry(Symmetry::Rotated);
        let top_right = NeighborPattern::EMPTY.with(Corner::TopRight);

        let expanded = RuleSet::new(vec![rule.clone()], RuleSetOptions::default()).unwrap();
        let Evaluation::Tile(tile) = expanded.evaluate(top_right, origin()) else {
            panic!("rotated rule should match");
        };
        assert_eq!(tile.transform, TileTransform::ROTATE_180);
        assert_eq!(expanded.coverage().count(), 4);

        let literal = RuleSet::new(
            vec![rule],
            RuleSetOptions {
                symmetry_expansion: false,
                ..RuleSetOptions::default()
            },
        )
        .unwrap();
        assert!(literal.evaluate(top_right, origin()).is_no_match());
        assert_eq!(literal.coverage().count(), 1);
    }

    // Tests duplicate rule ids are rejected
    // Verified by removing the uniqueness check
    #[test]
    fn test_duplicate_ids_rejected() {
        let result = RuleSet::new(
            vec![
                Rule::from_pattern(RuleId(3), NeighborPattern::FULL),
                Rule::from_pattern(RuleId(3), NeighborPattern::EMPTY),
            ],
            RuleSetOptions::default(),
        );
        assert!(matches!(
            result,
            Err(DualGridError::InvalidParameter {
                parameter: "rules.id",
                ..
            })
        ));
    }

    // Tests invalid weights are rejected
    // Verified by accepting negative weights
    #[test]
    fn test_invalid_weights_rejected() {
        for weights in [vec![-1.0, 2.0], vec![f64::NAN], vec![0.0, 0.0]] {
            let result = RuleSet::new(vec![random_rule(1, &weights)], RuleSetOptions::default());
            assert!(result.is_err(), "weights {weights:?} should be rejected");
        }
    }

    // Tests random selection is deterministic per position
    // Verified by seeding selection from a thread-local generator
    #[test]
    fn test_random_selection_is_stable() {
        let rules =
            RuleSet::new(vec![random_rule(1, &[1.0, 1.0, 1.0])], RuleSetOptions::default())
                .unwrap();
        for x in -5..5 {
            let coord = RenderCoord::new(x, 2 * x);
            assert_eq!(
                rules.evaluate(NeighborPattern::FULL, coord),
                rules.evaluate(NeighborPattern::FULL, coord)
            );
        }
    }

    // Tests random selection spreads over candidates and respects zero weights
    // Verified by always choosing the first candidate
    #[test]
    fn test_random_selection_uses_weights() {
        let rules = RuleSet::new(
            vec![random_rule(1, &[1.0, 0.0, 1.0])],
            RuleSetOptions::default(),
        )
        .unwrap();

        let chosen: HashSet<_> = (0..200)
            .filter_map(|x| {
                rules
                    .evaluate(NeighborPattern::FULL, RenderCoord::new(x, 0))
                    .tile()
                    .map(|tile| tile.variant)
            })
            .collect();
        assert_eq!(chosen, HashSet::from([VariantId(0), VariantId(2)]));
    }

    // Tests the table seed changes random choices
    // Verified by leaving the seed out of the position hash
    #[test]
    fn test_seed_changes_selection() {
        let build = |seed| {
            RuleSet::new(
                vec![random_rule(1, &[1.0; 8])],
                RuleSetOptions {
                    seed,
                    ..RuleSetOptions::default()
                },
            )
            .unwrap()
        };
        let first = build(1);
        let second = build(2);
        let differs = (0..64).any(|x| {
            let coord = RenderCoord::new(x, -x);
            first.evaluate(NeighborPattern::FULL, coord)
                != second.evaluate(NeighborPattern::FULL, coord)
        });
        assert!(differs);
    }

    // Tests random orientation only applies to random selection
    // Verified by applying the random transform in fixed mode
    #[test]
    fn test_random_transform_only_in_random_mode() {
        let fixed = Rule::from_pattern(RuleId(1), NeighborPattern::FULL)
            .with_variant(VariantId(1))
            .with_random_transform(Symmetry::Rotated);
        let rules = RuleSet::new(vec![fixed], RuleSetOptions::default()).unwrap();
        for x in 0..32 {
            let tile = rules.evaluate(NeighborPattern::FULL, RenderCoord::new(x, 0));
            assert_eq!(tile.tile().map(|t| t.transform), Some(TileTransform::IDENTITY));
        }

        let random = random_rule(2, &[1.0]).with_random_transform(Symmetry::Rotated);
        let rules = RuleSet::new(vec![random], RuleSetOptions::default()).unwrap();
        let rotations: HashSet<_> = (0..64)
            .filter_map(|x| {
                rules
                    .evaluate(NeighborPattern::FULL, RenderCoord::new(x, 0))
                    .tile()
                    .map(|t| t.transform)
            })
            .collect();
        assert!(rotations.len() > 1);
        assert!(rotations.iter().all(|t| !t.is_mirrored()));
    }

    // Tests animation rules rest on the first frame and cycle by tick
    // Verified by indexing frames with the tick without wrapping
    #[test]
    fn test_animation_frames() {
        let rule = Rule::from_pattern(RuleId(1), NeighborPattern::FULL)
            .with_variant(VariantId(4))
            .with_variant(VariantId(5))
            .with_variant(VariantId(6))
            .with_selection(SelectionMode::Animation)
            .with_object(ObjectId(9));
        let rules = RuleSet::new(vec![rule], RuleSetOptions::default()).unwrap();

        let Evaluation::Tile(tile) = rules.evaluate(NeighborPattern::FULL, origin()) else {
            panic!("animation rule should match");
        };
        assert_eq!(tile.variant, VariantId(4));
        assert!(tile.animated);
        assert_eq!(tile.object, Some(ObjectId(9)));

        assert_eq!(rules.animation_frame(0, 0), Some(VariantId(4)));
        assert_eq!(rules.animation_frame(0, 4), Some(VariantId(5)));
        assert_eq!(rules.animation_frame(0, 8), Some(VariantId(6)));
        assert_eq!(rules.animation_frame(1, 0), None);
    }
}
