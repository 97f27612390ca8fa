use crate::domain::model::{ClueMap, Grid, Orientation, PlacementEntry};

/// A clue aligned to its crossword number. Derived from grid geometry on
/// demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedClue {
    pub number: usize,
    pub text: String,
}

/// Assigns crossword numbering from cell geometry and produces the ordered
/// across/down clue lists. Standard convention: cells are scanned in
/// row-major order and numbered when they start an Across word, a Down
/// word, or both (one shared number). A word whose clue list is empty is
/// left out of the ordered lists but keeps its entry in the clue map.
pub fn index(
    placements: &[PlacementEntry],
    grid: &Grid,
    clues: &ClueMap,
) -> (Vec<String>, Vec<String>) {
    let numbers = assign_numbers(grid);

    let across = numbered_clues(placements, clues, &numbers, Orientation::Across);
    let down = numbered_clues(placements, clues, &numbers, Orientation::Down);

    (
        across.into_iter().map(|c| c.text).collect(),
        down.into_iter().map(|c| c.text).collect(),
    )
}

/// Row-major scan assigning sequential numbers to word-start cells.
pub fn assign_numbers(grid: &Grid) -> Vec<((usize, usize), usize)> {
    let size = grid.size();
    let mut numbers = Vec::new();
    let mut next = 1;

    for row in 0..size {
        for col in 0..size {
            if !grid.has_letter(row, col) {
                continue;
            }
            if starts_across(grid, row, col) || starts_down(grid, row, col) {
                numbers.push(((row, col), next));
                next += 1;
            }
        }
    }

    numbers
}

fn starts_across(grid: &Grid, row: usize, col: usize) -> bool {
    let no_left = col == 0 || !grid.has_letter(row, col - 1);
    let letter_right = col + 1 < grid.size() && grid.has_letter(row, col + 1);
    no_left && letter_right
}

fn starts_down(grid: &Grid, row: usize, col: usize) -> bool {
    let no_above = row == 0 || !grid.has_letter(row - 1, col);
    let letter_below = row + 1 < grid.size() && grid.has_letter(row + 1, col);
    no_above && letter_below
}

fn numbered_clues(
    placements: &[PlacementEntry],
    clues: &ClueMap,
    numbers: &[((usize, usize), usize)],
    orientation: Orientation,
) -> Vec<NumberedClue> {
    let mut entries: Vec<NumberedClue> = placements
        .iter()
        .filter(|p| p.orientation == orientation)
        .filter_map(|p| {
            let number = numbers
                .iter()
                .find(|((row, col), _)| *row == p.row && *col == p.col)
                .map(|(_, n)| *n)?;
            let text = clues.get(&p.word)?.first()?.clone();
            Some(NumberedClue { number, text })
        })
        .collect();

    entries.sort_by_key(|c| c.number);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::render;

    fn clue_map(pairs: &[(&str, &[&str])]) -> ClueMap {
        pairs
            .iter()
            .map(|(word, clues)| {
                (
                    word.to_string(),
                    clues.iter().map(|c| c.to_string()).collect(),
                )
            })
            .collect()
    }

    fn sample_placements() -> Vec<PlacementEntry> {
        vec![
            PlacementEntry::new("APP", 2, 0, Orientation::Across),
            PlacementEntry::new("DATA", 1, 0, Orientation::Down),
        ]
    }

    #[test]
    fn test_numbers_increase_in_row_major_order() {
        let placements = sample_placements();
        let grid = render(&placements, 5).unwrap();
        let numbers = assign_numbers(&grid);

        // DATA starts above APP, so its cell is scanned first.
        assert_eq!(numbers, vec![((1, 0), 1), ((2, 0), 2)]);
    }

    #[test]
    fn test_numbering_is_stable() {
        let placements = sample_placements();
        let grid = render(&placements, 5).unwrap();
        assert_eq!(assign_numbers(&grid), assign_numbers(&grid));
    }

    #[test]
    fn test_clue_lists_follow_number_order() {
        let placements = sample_placements();
        let grid = render(&placements, 5).unwrap();
        let clues = clue_map(&[("APP", &["Phone program"]), ("DATA", &["Spreadsheet fill"])]);

        let (across, down) = index(&placements, &grid, &clues);
        assert_eq!(across, vec!["Phone program"]);
        assert_eq!(down, vec!["Spreadsheet fill"]);
    }

    #[test]
    fn test_shared_start_cell_gets_one_number_in_each_list() {
        // ART across and APE down both start at (0, 0).
        let placements = vec![
            PlacementEntry::new("ART", 0, 0, Orientation::Across),
            PlacementEntry::new("APE", 0, 0, Orientation::Down),
        ];
        let grid = render(&placements, 5).unwrap();
        let numbers = assign_numbers(&grid);
        assert_eq!(numbers[0], ((0, 0), 1));

        let clues = clue_map(&[("ART", &["Gallery display"]), ("APE", &["Gorilla, e.g."])]);
        let (across, down) = index(&placements, &grid, &clues);
        assert_eq!(across, vec!["Gallery display"]);
        assert_eq!(down, vec!["Gorilla, e.g."]);
    }

    #[test]
    fn test_word_without_clues_is_omitted_from_ordered_lists() {
        let placements = sample_placements();
        let grid = render(&placements, 5).unwrap();
        let clues = clue_map(&[("APP", &["Phone program"]), ("DATA", &[])]);

        let (across, down) = index(&placements, &grid, &clues);
        assert_eq!(across, vec!["Phone program"]);
        assert!(down.is_empty());
        // The word stays in the map even with no clue text.
        assert!(clues.contains_key("DATA"));
    }

    #[test]
    fn test_only_first_clue_per_word_is_used() {
        let placements = sample_placements();
        let grid = render(&placements, 5).unwrap();
        let clues = clue_map(&[
            ("APP", &["Phone program", "Store download"]),
            ("DATA", &["Spreadsheet fill"]),
        ]);

        let (across, _) = index(&placements, &grid, &clues);
        assert_eq!(across, vec!["Phone program"]);
    }
}
