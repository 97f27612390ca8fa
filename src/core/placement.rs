use crate::domain::model::{Orientation, PlacementEntry};

/// Explicit grid state threaded through the search. `None` is an empty
/// cell. Kept as a value (cloned per committed placement) so each step is a
/// pure function of the previous state.
pub type Cells = Vec<Vec<Option<char>>>;

pub fn empty_cells(grid_size: usize) -> Cells {
    vec![vec![None; grid_size]; grid_size]
}

/// Greedy crossword placement. Candidates are tried in input order (the
/// provider lists thematically central words first); the first placeable
/// word anchors the grid, every later word must cross an already-placed
/// letter. Words that cannot be placed are skipped, and committed
/// placements are never revisited: at this grid size, oversupplying
/// candidates beats backtracking.
pub fn place(candidates: &[String], grid_size: usize) -> Vec<PlacementEntry> {
    let mut cells = empty_cells(grid_size);
    let mut placements: Vec<PlacementEntry> = Vec::new();

    for (index, word) in candidates.iter().enumerate() {
        // Same letters as an already-placed word adds nothing to the grid.
        if placements.iter().any(|p| p.word == *word) {
            tracing::debug!("Skipping duplicate-content candidate '{}'", word);
            continue;
        }

        if let Some(shortest) = shortest_length(&candidates[index..], &placements) {
            if !placements.is_empty() && !has_open_run(&cells, shortest) {
                tracing::debug!("Grid saturated after {} placements", placements.len());
                break;
            }
        }

        let entry = if placements.is_empty() {
            anchor_placement(word, grid_size)
        } else {
            best_crossing_placement(word, &placements, &cells, grid_size)
        };

        match entry {
            Some(entry) => {
                cells = with_entry(&cells, &entry);
                placements.push(entry);
            }
            None => tracing::debug!("No valid placement for '{}', skipping", word),
        }
    }

    placements
}

/// Returns a new grid state with the entry's letters written in.
pub fn with_entry(cells: &Cells, entry: &PlacementEntry) -> Cells {
    let mut next = cells.clone();
    for (row, col, ch) in entry.cells() {
        next[row][col] = Some(ch);
    }
    next
}

/// The first word seeds the grid Across on the center row, left-aligned.
fn anchor_placement(word: &str, grid_size: usize) -> Option<PlacementEntry> {
    if word.len() > grid_size {
        return None;
    }
    Some(PlacementEntry::new(word, grid_size / 2, 0, Orientation::Across))
}

/// Searches every matching letter of every placed word for a legal crossing
/// position. Preference order: most letter intersections, then midpoint
/// closest to the grid centroid, then first found.
fn best_crossing_placement(
    word: &str,
    placements: &[PlacementEntry],
    cells: &Cells,
    grid_size: usize,
) -> Option<PlacementEntry> {
    let mut best: Option<(PlacementEntry, usize, f64)> = None;

    for placed in placements {
        let orientation = placed.orientation.opposite();
        for (row, col, placed_ch) in placed.cells() {
            for (i, ch) in word.chars().enumerate() {
                if ch != placed_ch {
                    continue;
                }
                let Some(entry) = offset_entry(word, row, col, i, orientation, grid_size) else {
                    continue;
                };
                let Some(intersections) = count_intersections(&entry, cells) else {
                    continue;
                };
                let dist = center_distance(&entry, grid_size);

                let better = match &best {
                    None => true,
                    Some((_, best_inter, best_dist)) => {
                        intersections > *best_inter
                            || (intersections == *best_inter && dist < *best_dist)
                    }
                };
                if better {
                    best = Some((entry, intersections, dist));
                }
            }
        }
    }

    best.map(|(entry, _, _)| entry)
}

/// Positions `word` so its `letter_index`-th letter sits on (row, col).
/// None when any part of the word would leave the grid.
fn offset_entry(
    word: &str,
    row: usize,
    col: usize,
    letter_index: usize,
    orientation: Orientation,
    grid_size: usize,
) -> Option<PlacementEntry> {
    let (dr, dc) = orientation.step();
    let start_row = (row as isize) - (letter_index as isize) * (dr as isize);
    let start_col = (col as isize) - (letter_index as isize) * (dc as isize);
    if start_row < 0 || start_col < 0 {
        return None;
    }

    let end_row = start_row as usize + dr * (word.len() - 1);
    let end_col = start_col as usize + dc * (word.len() - 1);
    if end_row >= grid_size || end_col >= grid_size {
        return None;
    }

    Some(PlacementEntry::new(
        word,
        start_row as usize,
        start_col as usize,
        orientation,
    ))
}

/// Counts cells the entry shares with existing letters. None when any
/// shared cell disagrees: character consistency is a hard invariant.
fn count_intersections(entry: &PlacementEntry, cells: &Cells) -> Option<usize> {
    let mut intersections = 0;
    for (row, col, ch) in entry.cells() {
        match cells[row][col] {
            Some(existing) if existing == ch => intersections += 1,
            Some(_) => return None,
            None => {}
        }
    }
    Some(intersections)
}

/// Squared distance from the word's midpoint to the grid centroid.
fn center_distance(entry: &PlacementEntry, grid_size: usize) -> f64 {
    let (dr, dc) = entry.orientation.step();
    let half = (entry.word.len() - 1) as f64 / 2.0;
    let mid_row = entry.row as f64 + dr as f64 * half;
    let mid_col = entry.col as f64 + dc as f64 * half;
    let centroid = (grid_size - 1) as f64 / 2.0;
    (mid_row - centroid).powi(2) + (mid_col - centroid).powi(2)
}

/// Shortest length among candidates that are not already on the grid.
fn shortest_length(remaining: &[String], placements: &[PlacementEntry]) -> Option<usize> {
    remaining
        .iter()
        .filter(|word| !placements.iter().any(|p| p.word == **word))
        .map(|word| word.len())
        .min()
}

/// A word of length `len` can still go somewhere if some straight run of
/// `len` cells holds at least one letter to cross and one empty cell to
/// fill. Without such a run the grid is saturated for that length.
fn has_open_run(cells: &Cells, len: usize) -> bool {
    let size = cells.len();
    if len > size {
        return false;
    }

    for fixed in 0..size {
        for start in 0..=(size - len) {
            let row_run = (start..start + len).map(|c| cells[fixed][c]);
            let col_run = (start..start + len).map(|r| cells[r][fixed]);
            if run_is_open(row_run) || run_is_open(col_run) {
                return true;
            }
        }
    }
    false
}

fn run_is_open(run: impl Iterator<Item = Option<char>>) -> bool {
    let mut has_letter = false;
    let mut has_empty = false;
    for cell in run {
        match cell {
            Some(_) => has_letter = true,
            None => has_empty = true,
        }
    }
    has_letter && has_empty
}
