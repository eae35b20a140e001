//! Grid shape for surface nets over a sampled volume

use crate::errors::PipelineError;

/// Extent of a sampled volume in samples per axis, with x varying fastest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    pub nx: u32,
    pub ny: u32,
    pub nz: u32,
}

impl GridShape {
    /// Shape for `dimensions`, which must each be at least 2 and fit the
    /// surface-nets index type.
    pub fn new(dimensions: [usize; 3]) -> Result<Self, PipelineError> {
        let invalid = || PipelineError::InvalidSampleDimensions(dimensions);
        if dimensions.iter().any(|&d| d < 2) {
            return Err(invalid());
        }
        let total = dimensions
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
            .ok_or_else(invalid)?;
        u32::try_from(total).map_err(|_| invalid())?;

        Ok(GridShape {
            nx: dimensions[0] as u32,
            ny: dimensions[1] as u32,
            nz: dimensions[2] as u32,
        })
    }

    /// Grid indices of linear sample `i`
    #[inline]
    pub const fn coords(&self, i: usize) -> [usize; 3] {
        let (nx, ny) = (self.nx as usize, self.ny as usize);
        [i % nx, (i / nx) % ny, i / (nx * ny)]
    }
}

impl fast_surface_nets::ndshape::Shape<3> for GridShape {
    type Coord = u32;

    #[inline]
    fn as_array(&self) -> [Self::Coord; 3] {
        [self.nx, self.ny, self.nz]
    }

    fn size(&self) -> Self::Coord {
        self.nx * self.ny * self.nz
    }

    fn usize(&self) -> usize {
        (self.nx * self.ny * self.nz) as usize
    }

    fn linearize(&self, coords: [Self::Coord; 3]) -> u32 {
        let [x, y, z] = coords;
        (z * self.ny + y) * self.nx + x
    }

    fn delinearize(&self, i: u32) -> [Self::Coord; 3] {
        let x = i % self.nx;
        let yz = i / self.nx;
        let y = yz % self.ny;
        let z = yz / self.ny;
        [x, y, z]
    }
}
