// Top-level lattice state — the one-shot startup construction.
//
// `Lattice` owns the generated grid, the tessellated triangle list, and
// the spatial index over it. It is built once from a validated config and
// is read-only afterwards; any number of collaborators can hold shared
// references to it without locking.
//
// Queries go through the bucket index, which agrees with the canonical
// linear scan on every probe (see `locate.rs` tests for the agreement
// property).

use crate::config::{ConfigError, LatticeConfig};
use crate::grid::PitchClassGrid;
use crate::locate::TriangleIndex;
use crate::tessellate;
use crate::types::Triangle;

/// The assembled lattice: grid, triangles, and spatial index.
#[derive(Clone, Debug)]
pub struct Lattice {
    pub config: LatticeConfig,
    pub grid: PitchClassGrid,
    pub triangles: Vec<Triangle>,
    index: TriangleIndex,
}

impl Lattice {
    /// Validate the config and build everything.
    pub fn from_config(config: &LatticeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = PitchClassGrid::generate(
            config.grid_width,
            config.grid_height,
            config.fifth_interval,
            config.major_third_interval,
        );
        let triangles = tessellate::build(&grid, config.triangle_size, config.base_octave);
        let index = TriangleIndex::build(&triangles, config.triangle_size);
        Ok(Self {
            config: config.clone(),
            grid,
            triangles,
            index,
        })
    }

    /// The standard playable lattice (`LatticeConfig::default()`).
    pub fn standard() -> Self {
        // Defaults validate; a failure here is a bug in the defaults.
        Self::from_config(&LatticeConfig::default()).expect("default config must be valid")
    }

    /// Which triangle contains `(x, z)`? `None` means the point is off the
    /// playable lattice — a normal outcome, not an error.
    pub fn find_triangle_at(&self, x: f64, z: f64) -> Option<&Triangle> {
        self.index.find_triangle_at(x, z, &self.triangles)
    }
}
