//! Command-line interface for turning PNG masks into dual-grid render images

use crate::algorithm::ruleset::{RuleSet, RuleSetOptions};
use crate::io::configuration::{
    DEFAULT_FILL_DENSITY, DEFAULT_MAP_SIZE, DEFAULT_SEED, MAX_GRID_DIMENSION,
    OVERLAY_PIXELS_PER_CELL, OVERLAY_SUFFIX, PIXELS_PER_CELL, RENDER_SUFFIX, RULE_TABLE_FILENAME,
};
use crate::io::error::{DualGridError, Result, invalid_parameter};
use crate::io::image::{export_render_grid_png, load_mask};
use crate::io::progress::{ProgressManager, Stage};
use crate::io::rule_table::{RuleTable, load_rule_set};
use crate::io::visualization::OverlayRenderer;
use crate::spatial::grid::DataGrid;
use crate::tilemap::dual_grid::DualGrid;
use clap::Parser;
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "dualgrid")]
#[command(
    author,
    version,
    about = "Auto-tile PNG masks with a dual grid and export the render grid"
)]
/// Command-line arguments for the dual-grid tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input PNG mask or directory of masks; opaque pixels are filled cells
    #[arg(value_name = "TARGET", required_unless_present = "random")]
    pub target: Option<PathBuf>,

    /// Generate a random WIDTHxHEIGHT mask instead of reading one
    #[arg(
        long,
        value_name = "WxH",
        value_parser = parse_dimensions,
        num_args = 0..=1,
        default_missing_value = DEFAULT_MAP_SIZE,
        conflicts_with = "target"
    )]
    pub random: Option<(usize, usize)>,

    /// Random seed for generated masks
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Probability that a generated cell is filled
    #[arg(short, long, default_value_t = DEFAULT_FILL_DENSITY)]
    pub density: f64,

    /// Directory for outputs of generated masks
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Rule table JSON file; the built-in sixteen-case table is used otherwise
    #[arg(short, long, value_name = "JSON")]
    pub rules: Option<PathBuf>,

    /// Match rules only in their authored orientation
    #[arg(long)]
    pub no_symmetry: bool,

    /// Also export the diagnostic overlay
    #[arg(short = 'O', long)]
    pub overlay: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Write the active rule table as JSON to this path
    #[arg(long, value_name = "PATH")]
    pub write_rules: Option<PathBuf>,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Parse a `WIDTHxHEIGHT` pair such as `64x48`
///
/// # Errors
///
/// Returns a message if the text is malformed or a dimension is outside
/// `1..=MAX_GRID_DIMENSION`
pub fn parse_dimensions(text: &str) -> std::result::Result<(usize, usize), String> {
    let (width, height) = text
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{text}'"))?;
    let parse = |value: &str| {
        value
            .trim()
            .parse::<usize>()
            .map_err(|e| format!("invalid dimension '{value}': {e}"))
            .and_then(|n| {
                if (1..=MAX_GRID_DIMENSION).contains(&n) {
                    Ok(n)
                } else {
                    Err(format!("dimension {n} is outside 1..={MAX_GRID_DIMENSION}"))
                }
            })
    };
    Ok((parse(width)?, parse(height)?))
}

/// Seeded random fill mask
///
/// # Errors
///
/// Returns `InvalidParameter` if a dimension is 0 or too large, or the density is
/// outside `[0, 1]`
pub fn random_mask(width: usize, height: usize, density: f64, seed: u64) -> Result<Array2<bool>> {
    if !(0.0..=1.0).contains(&density) {
        return Err(invalid_parameter(
            "density",
            &density,
            &"must be between 0 and 1",
        ));
    }
    for (parameter, value) in [("width", width), ("height", height)] {
        if value == 0 || value > MAX_GRID_DIMENSION {
            return Err(invalid_parameter(
                parameter,
                &value,
                &format!("must be in 1..={MAX_GRID_DIMENSION}"),
            ));
        }
    }

    let mut rng = StdRng::seed_from_u64(seed);
    Ok(Array2::from_shape_simple_fn((height, width), || {
        rng.random_bool(density)
    }))
}

/// Build the rule set named on the command line
///
/// # Errors
///
/// Returns an error if the rule table file cannot be loaded or validated
pub fn resolve_rule_set(rules_path: Option<&Path>, symmetry_expansion: bool) -> Result<RuleSet> {
    let rules = match rules_path {
        Some(path) => load_rule_set(path)?,
        None => RuleSet::standard(),
    };

    let rules = if rules.options().symmetry_expansion == symmetry_expansion {
        rules
    } else {
        let options = RuleSetOptions {
            symmetry_expansion,
            ..*rules.options()
        };
        RuleSet::new(rules.rules().to_vec(), options)?
    };

    if !rules.is_complete() {
        tracing::warn!(
            coverage = %rules.coverage(),
            "rule table does not cover every neighborhood; unmatched cells stay empty"
        );
    }

    Ok(rules)
}

/// Where a mask comes from
#[derive(Debug, Clone)]
enum MaskSource {
    File(PathBuf),
    Random {
        width: usize,
        height: usize,
        density: f64,
        seed: u64,
        stem_path: PathBuf,
    },
}

impl MaskSource {
    // Path whose stem and directory name the outputs
    fn stem_path(&self) -> &Path {
        match self {
            Self::File(path) => path,
            Self::Random { stem_path, .. } => stem_path,
        }
    }

    fn load(&self) -> Result<Array2<bool>> {
        match self {
            Self::File(path) => load_mask(path),
            Self::Random {
                width,
                height,
                density,
                seed,
                ..
            } => random_mask(*width, *height, *density, *seed),
        }
    }
}

/// Orchestrates batch processing of masks with progress tracking
#[derive(Debug)]
pub struct FileProcessor {
    cli: Cli,
    rules: RuleSet,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if the rule table cannot be loaded or validated
    pub fn new(cli: Cli) -> Result<Self> {
        let rules = resolve_rule_set(cli.rules.as_deref(), !cli.no_symmetry)?;
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Ok(Self {
            cli,
            rules,
            progress_manager,
        })
    }

    /// Rule set applied to every mask
    pub const fn rule_set(&self) -> &RuleSet {
        &self.rules
    }

    /// Process masks according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, rule table export or mask processing fails
    pub fn process(&mut self) -> Result<()> {
        if let Some(path) = self.cli.write_rules.as_deref() {
            let path = if path.is_dir() {
                path.join(RULE_TABLE_FILENAME)
            } else {
                path.to_path_buf()
            };
            RuleTable::from_rule_set(&self.rules).save(&path)?;
            tracing::info!(path = %path.display(), "rule table written");
        }

        let sources = self.collect_sources()?;

        if sources.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(sources.len());
        }

        for (index, source) in sources.iter().enumerate() {
            self.process_mask(source, index)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_sources(&self) -> Result<Vec<MaskSource>> {
        if let Some((width, height)) = self.cli.random {
            let stem_path = self
                .cli
                .output
                .join(format!("random_{width}x{height}_{}.png", self.cli.seed));
            let source = MaskSource::Random {
                width,
                height,
                density: self.cli.density,
                seed: self.cli.seed,
                stem_path,
            };
            return Ok(if self.should_process(source.stem_path()) {
                vec![source]
            } else {
                vec![]
            });
        }

        let target = self
            .cli
            .target
            .as_deref()
            .ok_or_else(|| {
                invalid_parameter("target", &"", &"either a target or --random is required")
            })?;

        if target.is_file() {
            if target.extension().and_then(|s| s.to_str()) == Some("png") {
                if self.should_process(target) {
                    Ok(vec![MaskSource::File(target.to_path_buf())])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &"target file must be a PNG image",
                ))
            }
        } else if target.is_dir() {
            let mut files = Vec::new();
            let entries = std::fs::read_dir(target).map_err(|e| DualGridError::FileSystem {
                path: target.to_path_buf(),
                operation: "read directory",
                source: e,
            })?;
            for entry in entries {
                let path = entry?.path();
                if path.extension().and_then(|s| s.to_str()) == Some("png")
                    && !Self::is_output(&path)
                    && self.should_process(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files.into_iter().map(MaskSource::File).collect())
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"target must be a PNG file or directory",
            ))
        }
    }

    fn should_process(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path, RENDER_SUFFIX);
        if output_path.exists() {
            tracing::info!(input = %input_path.display(), "skipping, output exists");
            false
        } else {
            true
        }
    }

    fn process_mask(&mut self, source: &MaskSource, index: usize) -> Result<()> {
        let start_time = Instant::now();
        let input_path = source.stem_path();
        let stages = if self.cli.overlay { 4 } else { 3 };

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path, stages);
        }

        let mask = source.load()?;
        self.complete_stage(index, Stage::Load);

        let data = DataGrid::from_mask(&mask)?;
        let mut grid = DualGrid::from_data(data, self.rules.clone());
        let diagnostics = grid.take_diagnostics();
        if !diagnostics.is_empty() {
            tracing::warn!(
                input = %input_path.display(),
                count = diagnostics.len(),
                "render cells left empty by an incomplete rule table"
            );
        }
        self.complete_stage(index, Stage::Build);

        if grid.render_grid().is_empty() {
            tracing::warn!(input = %input_path.display(), "mask has no filled cells, skipping");
            if let Some(ref mut pm) = self.progress_manager {
                pm.complete_file(index);
            }
            return Ok(());
        }

        let render_path = Self::get_output_path(input_path, RENDER_SUFFIX);
        export_render_grid_png(grid.render_grid(), &render_path, PIXELS_PER_CELL)?;
        self.complete_stage(index, Stage::Render);

        if self.cli.overlay {
            let overlay_path = Self::get_output_path(input_path, OVERLAY_SUFFIX);
            OverlayRenderer::new(OVERLAY_PIXELS_PER_CELL)?.export(&grid, &overlay_path)?;
            self.complete_stage(index, Stage::Overlay);
        }

        tracing::info!(
            input = %input_path.display(),
            data_cells = grid.data_grid().len(),
            render_tiles = grid.render_grid().len(),
            elapsed_ms = start_time.elapsed().as_millis(),
            "mask processed"
        );

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index);
        }

        Ok(())
    }

    fn complete_stage(&mut self, index: usize, stage: Stage) {
        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_stage(index, stage);
        }
    }

    fn is_output(path: &Path) -> bool {
        path.file_stem()
            .map(|stem| stem.to_string_lossy())
            .is_some_and(|stem| stem.ends_with(RENDER_SUFFIX) || stem.ends_with(OVERLAY_SUFFIX))
    }

    /// Output path next to `input_path` with `suffix` appended to the stem
    pub fn get_output_path(input_path: &Path, suffix: &str) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let output_name = format!("{}{suffix}.png", stem.to_string_lossy());

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}
