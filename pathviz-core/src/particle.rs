/// Particle identities and the rows x cols grid that assigns them
use tracing::debug;

use crate::error::StyleError;
use crate::style::{MAX_COLS, MAX_ROWS};

/// Fixed identity of one animated primitive.
///
/// `r_init` offsets the particle around its ring, `h_init` offsets it along
/// the path. Both lie in `[0, 1)` and never change after creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub r_init: f32,
    pub h_init: f32,
}

impl Particle {
    pub fn new(r_init: f32, h_init: f32) -> Self {
        Self { r_init, h_init }
    }
}

/// Row-major grid of particles; rows spread around the ring, columns along the path
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleGrid {
    rows: usize,
    cols: usize,
    particles: Vec<Particle>,
}

impl ParticleGrid {
    pub fn generate(rows: usize, cols: usize) -> Result<Self, StyleError> {
        if rows == 0 || cols == 0 {
            return Err(StyleError::EmptyGrid { rows, cols });
        }

        let count = rows.checked_mul(cols).ok_or(StyleError::GridTooLarge {
            rows,
            cols,
            max_rows: MAX_ROWS,
            max_cols: MAX_COLS,
        })?;

        let mut particles = Vec::with_capacity(count);
        for i in 0..rows {
            for j in 0..cols {
                particles.push(Particle::new(i as f32 / rows as f32, j as f32 / cols as f32));
            }
        }
        debug!(rows, cols, "generated particle grid");

        Ok(Self {
            rows,
            cols,
            particles,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Grid coordinates `(row, col)` of the particle at `index`
    pub fn cell(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }

    /// Palette slot for the particle at `index`, cycling along grid diagonals
    pub fn color_index(&self, index: usize, palette_len: usize) -> usize {
        let (row, col) = self.cell(index);
        (row + col) % palette_len.max(1)
    }
}
