use crate::domain::model::{Grid, PlacementEntry, EMPTY_CELL};
use crate::utils::error::{GenError, Result};

/// Renders placements into the fixed-size canonical grid. The placement
/// engine already guarantees bounds and character consistency, so this is
/// pure rendering; a conflict surfacing here means the engine has a defect
/// and the run is aborted as an internal error.
pub fn render(placements: &[PlacementEntry], grid_size: usize) -> Result<Grid> {
    let mut cells = vec![vec![EMPTY_CELL; grid_size]; grid_size];

    for entry in placements {
        for (row, col, ch) in entry.cells() {
            if row >= grid_size || col >= grid_size {
                return Err(GenError::InternalConsistency {
                    message: format!(
                        "placement '{}' reaches cell ({}, {}) outside a {}x{} grid",
                        entry.word, row, col, grid_size, grid_size
                    ),
                });
            }
            let existing = cells[row][col];
            if existing != EMPTY_CELL && existing != ch {
                return Err(GenError::InternalConsistency {
                    message: format!(
                        "placement '{}' writes '{}' over '{}' at ({}, {})",
                        entry.word, ch, existing, row, col
                    ),
                });
            }
            cells[row][col] = ch;
        }
    }

    Ok(Grid(cells))
}
