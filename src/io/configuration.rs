//! Dual grid constants and runtime configuration defaults

// Rule evaluation
/// Seed mixed into position hashes when a rule table does not name one
pub const DEFAULT_VARIATION_SEED: u32 = 0;

/// Diagnostics kept per dual grid before the oldest are discarded
pub const MAX_RETAINED_DIAGNOSTICS: usize = 1024;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed mask dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

// Default values for configurable parameters
/// Fixed seed for reproducible random masks
pub const DEFAULT_SEED: u64 = 42;

/// Size of a random mask when `--random` is given without one
pub const DEFAULT_MAP_SIZE: &str = "32x32";

/// Default probability that a random mask cell is filled
pub const DEFAULT_FILL_DENSITY: f64 = 0.45;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 50;

// Output settings
/// Edge length in pixels of one render cell in the exported render image
pub const PIXELS_PER_CELL: u32 = 8;
/// Edge length in pixels of one data cell in the exported overlay
pub const OVERLAY_PIXELS_PER_CELL: u32 = 32;
/// Suffix added to render image filenames
pub const RENDER_SUFFIX: &str = "_render";
/// Suffix added to overlay image filenames
pub const OVERLAY_SUFFIX: &str = "_overlay";
/// Filename of the rule table dump when `--write-rules` names a directory
pub const RULE_TABLE_FILENAME: &str = "rules.json";

// Overlay styling
/// Data cell boundaries
pub const DATA_BOUNDARY_COLOR: [u8; 4] = [255, 0, 0, 255];
/// Render cell boundaries
pub const RENDER_BOUNDARY_COLOR: [u8; 4] = [0, 0, 255, 255];
/// Lines from a render cell center towards its filled data cells
pub const CONNECTION_COLOR: [u8; 4] = [124, 252, 0, 255];
/// Length of a connection line as a fraction of one cell
pub const CONNECTION_LENGTH: f64 = 0.3;
/// Fill of occupied data cells
pub const FILLED_CELL_COLOR: [u8; 4] = [64, 64, 64, 255];
/// Background of exported images
pub const BACKGROUND_COLOR: [u8; 4] = [0, 0, 0, 0];
