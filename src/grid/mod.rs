/// A 2-D grid of independent columns coupled by lateral Darcy flux.
///
/// Columns live in a flat array indexed `y * width + x`. Each
/// `update_thermal_system` call is one discrete timestep: all per-column
/// state settles first, then the lateral flux field is rebuilt from
/// snapshots — a hard barrier between the two phases.

pub mod darcy;

pub use darcy::{ColumnSnapshot, interface_flux};

use crate::column::{BoundaryRecord, Column, ColumnConfig};
use crate::constants::{
    BOUNDARY_SCAN_INTERVAL, DEFAULT_COLUMN_SPACING_M, DEFAULT_FLUX_EVENT_THRESHOLD_KG_M2_S,
    DEFAULT_GRADIENT_THRESHOLD_KG_M3,
};
use crate::events::{GridEvent, GridListener};
use glam::DVec2;

/// Lateral adjacency at the grid edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LateralBoundary {
    /// Toroidal wrap-around: `(x+1) mod width`, `(y+1) mod height`.
    #[default]
    Periodic,
    /// No flow across the outer edges.
    Closed,
}

#[derive(Debug, Clone)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
    pub column_spacing_m: f64,
    pub lateral_boundary: LateralBoundary,
    /// Density jump (kg/m³) above which a layer interface becomes an active
    /// boundary.
    pub gradient_threshold_kg_m3: f64,
    /// Interface mass flux (kg/m²·s) above which a flux event fires.
    pub flux_event_threshold_kg_m2_s: f64,
    pub column: ColumnConfig,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 8,
            height: 8,
            column_spacing_m: DEFAULT_COLUMN_SPACING_M,
            lateral_boundary: LateralBoundary::Periodic,
            gradient_threshold_kg_m3: DEFAULT_GRADIENT_THRESHOLD_KG_M3,
            flux_event_threshold_kg_m2_s: DEFAULT_FLUX_EVENT_THRESHOLD_KG_M2_S,
            column: ColumnConfig::default(),
        }
    }
}

/// A density boundary detected inside one column, tagged with its grid
/// location.
#[derive(Debug, Clone)]
pub struct ActiveBoundary {
    pub x: usize,
    pub y: usize,
    pub record: BoundaryRecord,
}

pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub column_spacing_m: f64,
    pub lateral_boundary: LateralBoundary,
    pub gradient_threshold_kg_m3: f64,
    pub flux_event_threshold_kg_m2_s: f64,

    /// Columns in row-major order, `y * width + x`.
    pub columns: Vec<Column>,
    /// Signed 2-component mass flux accumulator, one entry per cell
    /// (x = east/west axis, y = north/south axis).
    pub flux: Vec<DVec2>,
    /// Active density boundaries; fully replaced on every rescan.
    pub boundaries: Vec<ActiveBoundary>,

    scan_counter: u32,
    listeners: Vec<Box<dyn GridListener>>,
}

impl Grid {
    pub fn new(config: GridConfig) -> Self {
        assert!(config.width > 0 && config.height > 0, "grid must be non-empty");

        let columns: Vec<Column> = (0..config.width * config.height)
            .map(|_| Column::new(config.column.clone()))
            .collect();

        let mut grid = Self {
            width: config.width,
            height: config.height,
            column_spacing_m: config.column_spacing_m,
            lateral_boundary: config.lateral_boundary,
            gradient_threshold_kg_m3: config.gradient_threshold_kg_m3,
            flux_event_threshold_kg_m2_s: config.flux_event_threshold_kg_m2_s,
            flux: vec![DVec2::ZERO; config.width * config.height],
            columns,
            boundaries: Vec::new(),
            scan_counter: 0,
            listeners: Vec::new(),
        };

        // Seed the boundary list so boundary-depth fluxes exist before the
        // first counter-driven rescan. No events fire during construction.
        let mut discarded = Vec::new();
        grid.rescan_boundaries(&mut discarded);

        grid
    }

    pub fn index(&self, x: usize, y: usize) -> usize {
        assert!(x < self.width && y < self.height, "grid coordinate out of range");
        y * self.width + x
    }

    pub fn column(&self, x: usize, y: usize) -> &Column {
        &self.columns[self.index(x, y)]
    }

    pub fn column_mut(&mut self, x: usize, y: usize) -> &mut Column {
        let index = self.index(x, y);
        &mut self.columns[index]
    }

    pub fn cell_count(&self) -> usize {
        self.columns.len()
    }

    pub fn add_listener(&mut self, listener: Box<dyn GridListener>) {
        self.listeners.push(listener);
    }

    fn east_of(&self, x: usize, y: usize) -> Option<(usize, usize)> {
        match self.lateral_boundary {
            LateralBoundary::Periodic => Some(((x + 1) % self.width, y)),
            LateralBoundary::Closed if x + 1 < self.width => Some((x + 1, y)),
            LateralBoundary::Closed => None,
        }
    }

    fn west_of(&self, x: usize, y: usize) -> Option<(usize, usize)> {
        match self.lateral_boundary {
            LateralBoundary::Periodic => Some(((x + self.width - 1) % self.width, y)),
            LateralBoundary::Closed if x > 0 => Some((x - 1, y)),
            LateralBoundary::Closed => None,
        }
    }

    fn north_of(&self, x: usize, y: usize) -> Option<(usize, usize)> {
        match self.lateral_boundary {
            LateralBoundary::Periodic => Some((x, (y + 1) % self.height)),
            LateralBoundary::Closed if y + 1 < self.height => Some((x, y + 1)),
            LateralBoundary::Closed => None,
        }
    }

    fn south_of(&self, x: usize, y: usize) -> Option<(usize, usize)> {
        match self.lateral_boundary {
            LateralBoundary::Periodic => Some((x, (y + self.height - 1) % self.height)),
            LateralBoundary::Closed if y > 0 => Some((x, y - 1)),
            LateralBoundary::Closed => None,
        }
    }

    /// Advance every column's temperature field by `dt_s`, then run one
    /// lateral coupling step. Convenience composition for drivers that do
    /// not stagger the two on different cadences.
    pub fn step(&mut self, dt_s: f64) -> Vec<GridEvent> {
        for column in &mut self.columns {
            column.update_temperatures(dt_s);
        }
        self.update_thermal_system()
    }

    /// One discrete lateral-coupling timestep.
    ///
    /// Phase 1: every column recomputes densities, buoyancy forces, and
    /// velocities from its current temperatures (no temperature step — that
    /// is driven separately). Phase 2, strictly after phase 1 settles:
    /// boundary rescan on its 10-call cadence, snapshot capture, the
    /// full-grid interface-flux pass at the column-bottom depth, and a
    /// localized flux refresh at every active boundary depth. Detected
    /// events are returned and delivered to registered listeners.
    pub fn update_thermal_system(&mut self) -> Vec<GridEvent> {
        let mut events = Vec::new();

        for column in &mut self.columns {
            column.update_densities();
            column.calculate_buoyancy_forces();
            column.calculate_velocities();
        }

        self.scan_counter += 1;
        if self.scan_counter >= BOUNDARY_SCAN_INTERVAL {
            self.scan_counter = 0;
            self.rescan_boundaries(&mut events);
        }

        let snapshots: Vec<ColumnSnapshot> =
            self.columns.iter().map(ColumnSnapshot::capture).collect();

        self.accumulate_bottom_fluxes(&snapshots, &mut events);
        self.refresh_boundary_fluxes(&snapshots, &mut events);

        for event in &events {
            for listener in &mut self.listeners {
                listener.on_event(event);
            }
        }

        events
    }

    /// Interface flux between two cells at one depth index, kg/(m²·s).
    /// Positive means mass flows a → b. Viscosity and density come from
    /// column `a` (see `darcy::interface_flux`).
    pub fn interface_flux_between(
        &self,
        a: (usize, usize),
        b: (usize, usize),
        depth_index: usize,
    ) -> f64 {
        let a_index = self.index(a.0, a.1);
        let b_index = self.index(b.0, b.1);
        let a_snapshot = ColumnSnapshot::capture(&self.columns[a_index]);
        let b_snapshot = ColumnSnapshot::capture(&self.columns[b_index]);
        interface_flux(
            &a_snapshot,
            &b_snapshot,
            depth_index,
            self.column_spacing_m,
            &self.columns[a_index].materials,
        )
    }

    /// Rebuild the active-boundary list wholesale (replace, never merge) and
    /// emit a gradient event per record found.
    fn rescan_boundaries(&mut self, events: &mut Vec<GridEvent>) {
        let mut boundaries = Vec::new();

        for y in 0..self.height {
            for x in 0..self.width {
                let column = &self.columns[y * self.width + x];
                for record in column.find_steep_density_gradients(self.gradient_threshold_kg_m3) {
                    events.push(GridEvent::SteepDensityGradient {
                        x,
                        y,
                        depth_km: column.depth_km(record.depth_index),
                        gradient_magnitude: record.density_gradient.abs(),
                        boundary_kind: record.boundary_kind,
                    });
                    boundaries.push(ActiveBoundary { x, y, record });
                }
            }
        }

        self.boundaries = boundaries;
    }

    /// Full-grid pass at the column-bottom depth. Every east and north
    /// interface contributes once as outflow and once as inflow, so the
    /// signed sums over any closed loop of cells cancel exactly.
    fn accumulate_bottom_fluxes(
        &mut self,
        snapshots: &[ColumnSnapshot],
        events: &mut Vec<GridEvent>,
    ) {
        let bottom = self.columns[0].bottom_index();

        for v in &mut self.flux {
            *v = DVec2::ZERO;
        }

        for y in 0..self.height {
            for x in 0..self.width {
                let here = y * self.width + x;

                if let Some((ex, ey)) = self.east_of(x, y) {
                    let east = ey * self.width + ex;
                    let f = interface_flux(
                        &snapshots[here],
                        &snapshots[east],
                        bottom,
                        self.column_spacing_m,
                        &self.columns[here].materials,
                    );
                    self.flux[here].x -= f;
                    self.flux[east].x += f;
                    self.check_flux_event(events, (x, y), (ex, ey), bottom, f);
                }

                if let Some((nx, ny)) = self.north_of(x, y) {
                    let north = ny * self.width + nx;
                    let f = interface_flux(
                        &snapshots[here],
                        &snapshots[north],
                        bottom,
                        self.column_spacing_m,
                        &self.columns[here].materials,
                    );
                    self.flux[here].y -= f;
                    self.flux[north].y += f;
                    self.check_flux_event(events, (x, y), (nx, ny), bottom, f);
                }
            }
        }
    }

    /// Localized refresh at every active boundary: recompute the four
    /// interfaces touching the reported cell at the boundary depth and
    /// overwrite just that cell's flux entry. Flux events fire for the east
    /// and north interfaces only, so a shared interface is reported once.
    fn refresh_boundary_fluxes(
        &mut self,
        snapshots: &[ColumnSnapshot],
        events: &mut Vec<GridEvent>,
    ) {
        let boundaries = std::mem::take(&mut self.boundaries);

        for boundary in &boundaries {
            let (x, y) = (boundary.x, boundary.y);
            let here = y * self.width + x;
            let depth = boundary.record.depth_index;
            let mut cell_flux = DVec2::ZERO;

            if let Some((ex, ey)) = self.east_of(x, y) {
                let east = ey * self.width + ex;
                let f = interface_flux(
                    &snapshots[here],
                    &snapshots[east],
                    depth,
                    self.column_spacing_m,
                    &self.columns[here].materials,
                );
                cell_flux.x -= f;
                self.check_flux_event(events, (x, y), (ex, ey), depth, f);
            }
            if let Some((wx, wy)) = self.west_of(x, y) {
                let west = wy * self.width + wx;
                let f = interface_flux(
                    &snapshots[west],
                    &snapshots[here],
                    depth,
                    self.column_spacing_m,
                    &self.columns[west].materials,
                );
                cell_flux.x += f;
            }
            if let Some((nx, ny)) = self.north_of(x, y) {
                let north = ny * self.width + nx;
                let f = interface_flux(
                    &snapshots[here],
                    &snapshots[north],
                    depth,
                    self.column_spacing_m,
                    &self.columns[here].materials,
                );
                cell_flux.y -= f;
                self.check_flux_event(events, (x, y), (nx, ny), depth, f);
            }
            if let Some((sx, sy)) = self.south_of(x, y) {
                let south = sy * self.width + sx;
                let f = interface_flux(
                    &snapshots[south],
                    &snapshots[here],
                    depth,
                    self.column_spacing_m,
                    &self.columns[south].materials,
                );
                cell_flux.y += f;
            }

            self.flux[here] = cell_flux;
        }

        self.boundaries = boundaries;
    }

    fn check_flux_event(
        &self,
        events: &mut Vec<GridEvent>,
        a: (usize, usize),
        b: (usize, usize),
        depth_index: usize,
        flux: f64,
    ) {
        if flux.abs() <= self.flux_event_threshold_kg_m2_s {
            return;
        }
        // orient so mass flows source -> target
        let (source, target) = if flux >= 0.0 { (a, b) } else { (b, a) };
        events.push(GridEvent::SignificantMaterialFlux {
            source,
            target,
            depth_km: self.columns[self.index(a.0, a.1)].depth_km(depth_index),
            flux_rate: flux.abs(),
        });
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Grid[{}x{}, {:?} edges, {} active boundaries]",
            self.width,
            self.height,
            self.lateral_boundary,
            self.boundaries.len(),
        )
    }
}
