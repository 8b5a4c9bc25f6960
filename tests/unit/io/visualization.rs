//! Tests for the diagnostic overlay

#[cfg(test)]
mod tests {
    use dualgrid::DualGrid;
    use dualgrid::algorithm::ruleset::RuleSet;
    use dualgrid::io::configuration::{
        CONNECTION_COLOR, DATA_BOUNDARY_COLOR, FILLED_CELL_COLOR, RENDER_BOUNDARY_COLOR,
    };
    use dualgrid::io::visualization::OverlayRenderer;
    use dualgrid::spatial::coordinates::DataCoord;
    use image::Rgba;
    use tempfile::TempDir;

    fn single_cell() -> DualGrid {
        let mut grid = DualGrid::with_rule_set(RuleSet::standard());
        grid.fill(DataCoord::new(0, 0)).unwrap();
        grid
    }

    // Tests the overlay frames the data with one empty cell on every side
    // Verified by framing the render bounds instead
    #[test]
    fn test_overlay_dimensions() {
        let img = OverlayRenderer::new(32).unwrap().render(&single_cell()).unwrap();
        assert_eq!(img.dimensions(), (96, 96));
    }

    // Tests each overlay layer is drawn where expected
    // Verified by offsetting render boundaries by a full cell
    #[test]
    fn test_overlay_layers() {
        let img = OverlayRenderer::new(32).unwrap().render(&single_cell()).unwrap();

        assert_eq!(img.get_pixel(0, 0), &Rgba(DATA_BOUNDARY_COLOR));
        assert_eq!(img.get_pixel(16, 1), &Rgba(RENDER_BOUNDARY_COLOR));
        assert_eq!(img.get_pixel(40, 36), &Rgba(FILLED_CELL_COLOR));
        // Line from the center of render (0, 0) towards its bottom-left data cell
        assert_eq!(img.get_pixel(59, 37), &Rgba(CONNECTION_COLOR));
    }

    // Tests overlays need room for both boundary sets
    // Verified by accepting a single pixel per cell
    #[test]
    fn test_overlay_scale_validated() {
        assert!(OverlayRenderer::new(1).is_err());
        assert!(OverlayRenderer::new(2).is_ok());
    }

    // Tests an empty data grid has nothing to frame
    // Verified by falling back to an empty frame at the origin
    #[test]
    fn test_overlay_empty_grid() {
        let renderer = OverlayRenderer::new(8).unwrap();
        assert!(renderer.render(&DualGrid::new()).is_err());
    }

    // Tests export writes the overlay to disk
    // Verified by disabling file save operation
    #[test]
    fn test_overlay_export() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mask_overlay.png");

        OverlayRenderer::new(8)
            .unwrap()
            .export(&single_cell(), &path)
            .unwrap();
        assert!(path.exists());
    }
}
