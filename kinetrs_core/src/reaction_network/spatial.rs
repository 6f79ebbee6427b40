//! This module provides a 1D line of [`ReactionNetwork`] cells coupled by diffusion
//!
//! Every cell is expected to hold the same species. Nothing enforces that, a cell missing
//! a species its neighbour diffuses shows up as [`NetworkError::UnknownSpecies`].
//!
//! The whole-line steps read neighbour concentrations from a snapshot taken before the step,
//! so the result does not depend on the direction in which the line is traversed.
use nalgebra::DMatrix;

use crate::configuration::Integrator;
use crate::reaction_network::network::{NetworkError, ReactionNetwork};

/// An ordered line of reaction cells
#[derive(Clone, Debug, Default)]
pub struct SpatialLine {
    cells: Vec<ReactionNetwork>,
}

impl SpatialLine {
    pub fn new() -> Self {
        SpatialLine::default()
    }

    /// Add a new cell at the end of the line
    pub fn add_cell(&mut self, cell: ReactionNetwork) {
        self.cells.push(cell);
    }

    pub fn cells(&self) -> &[ReactionNetwork] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&ReactionNetwork> {
        self.cells.get(index)
    }

    pub fn cell_mut(&mut self, index: usize) -> Option<&mut ReactionNetwork> {
        self.cells.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Diffuse into `center` from its two neighbours using the 3-point discrete Laplacian
    ///
    /// ```text
    /// [s]_center += time_step * D * ([s]_left + [s]_right - 2 [s]_center) / dx^2
    /// ```
    ///
    /// Only `center` is updated. If a neighbour lacks one of the center's species an error is
    /// returned and nothing is changed.
    pub fn diffuse_laplacian(
        left: &ReactionNetwork,
        center: &mut ReactionNetwork,
        right: &ReactionNetwork,
        time_step: f64,
        diffusion_coefficient: f64,
        delta_x: f64,
    ) -> Result<(), NetworkError> {
        let mut updated = Vec::with_capacity(center.species.len());
        for (name, c) in &center.species {
            let laplacian =
                (left.concentration(name)? + right.concentration(name)? - 2. * c) / delta_x.powi(2);
            updated.push(c + time_step * diffusion_coefficient * laplacian);
        }
        for (c, new) in center.species.values_mut().zip(updated) {
            *c = new;
        }
        Ok(())
    }

    /// Exchange material between two cells at a rate proportional to their concentration
    /// difference
    ///
    /// `time_step * D * ([s]_b - [s]_a)` is added to `a` and removed from `b`, so the sum over
    /// the pair is unchanged. If `b` lacks one of `a`'s species an error is returned and
    /// nothing is changed.
    pub fn diffuse_pairwise(
        cell_a: &mut ReactionNetwork,
        cell_b: &mut ReactionNetwork,
        diffusion_coefficient: f64,
        time_step: f64,
    ) -> Result<(), NetworkError> {
        let mut changes = Vec::with_capacity(cell_a.species.len());
        for (name, a) in &cell_a.species {
            let b = cell_b.concentration(name)?;
            changes.push((name.clone(), time_step * diffusion_coefficient * (b - a)));
        }
        for (name, change) in changes {
            if let Some(a) = cell_a.species.get_mut(&name) {
                *a += change;
            }
            if let Some(b) = cell_b.species.get_mut(&name) {
                *b -= change;
            }
        }
        Ok(())
    }

    /// Advance every interior cell by one Laplacian diffusion step
    ///
    /// All updates read the concentrations from before the step. The first and last cells are
    /// left as they are; boundary handling belongs to the caller.
    pub fn step_laplacian(
        &mut self,
        time_step: f64,
        diffusion_coefficient: f64,
        delta_x: f64,
    ) -> Result<(), NetworkError> {
        let (names, snapshot) = self.snapshot()?;
        let mut next = snapshot.clone();
        let factor = time_step * diffusion_coefficient / delta_x.powi(2);
        for i in 1..self.cells.len().saturating_sub(1) {
            for j in 0..names.len() {
                next[(i, j)] += factor
                    * (snapshot[(i - 1, j)] + snapshot[(i + 1, j)] - 2. * snapshot[(i, j)]);
            }
        }
        self.write_back(&names, &next)
    }

    /// Apply pairwise exchange between every pair of neighbouring cells
    ///
    /// The exchange of each pair is computed from the concentrations before the step.
    pub fn step_pairwise(
        &mut self,
        diffusion_coefficient: f64,
        time_step: f64,
    ) -> Result<(), NetworkError> {
        let (names, snapshot) = self.snapshot()?;
        let mut next = snapshot.clone();
        for i in 0..self.cells.len().saturating_sub(1) {
            for j in 0..names.len() {
                let change =
                    time_step * diffusion_coefficient * (snapshot[(i + 1, j)] - snapshot[(i, j)]);
                next[(i, j)] += change;
                next[(i + 1, j)] -= change;
            }
        }
        self.write_back(&names, &next)
    }

    /// Advance the reactions of every cell by one step
    pub fn step_reactions(&mut self, integrator: Integrator, time_step: f64) {
        for cell in &mut self.cells {
            cell.step(integrator, time_step);
        }
    }

    /// Concentration of one species in every cell, in line order
    pub fn concentration_profile(&self, species: &str) -> Result<Vec<f64>, NetworkError> {
        self.cells
            .iter()
            .map(|cell| cell.concentration(species))
            .collect()
    }

    /// Cells x species matrix of the current concentrations, species taken from the first
    /// cell
    fn snapshot(&self) -> Result<(Vec<String>, DMatrix<f64>), NetworkError> {
        let names: Vec<String> = match self.cells.first() {
            Some(cell) => cell.species.keys().cloned().collect(),
            None => Vec::new(),
        };
        let mut snapshot = DMatrix::zeros(self.cells.len(), names.len());
        for (i, cell) in self.cells.iter().enumerate() {
            for (j, name) in names.iter().enumerate() {
                snapshot[(i, j)] = cell.concentration(name)?;
            }
        }
        Ok((names, snapshot))
    }

    fn write_back(&mut self, names: &[String], next: &DMatrix<f64>) -> Result<(), NetworkError> {
        for (i, cell) in self.cells.iter_mut().enumerate() {
            for (j, name) in names.iter().enumerate() {
                cell.set_concentration(name, next[(i, j)])?;
            }
        }
        Ok(())
    }
}
