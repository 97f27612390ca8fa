use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Puzzles are always 5x5; smaller placements are padded out by the renderer.
pub const GRID_SIZE: usize = 5;

/// Marker for a cell with no letter, matching the stored artifact format.
pub const EMPTY_CELL: char = '-';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Across,
    Down,
}

impl Orientation {
    pub fn is_across(self) -> bool {
        matches!(self, Orientation::Across)
    }

    pub fn opposite(self) -> Self {
        match self {
            Orientation::Across => Orientation::Down,
            Orientation::Down => Orientation::Across,
        }
    }

    /// (row, col) step between consecutive letters of a word.
    pub fn step(self) -> (usize, usize) {
        match self {
            Orientation::Across => (0, 1),
            Orientation::Down => (1, 0),
        }
    }
}

/// A committed word position on the grid. Serializes as the 4-element tuple
/// `[word, row, col, is_across]` used by the stored puzzle artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPlacement", into = "RawPlacement")]
pub struct PlacementEntry {
    pub word: String,
    pub row: usize,
    pub col: usize,
    pub orientation: Orientation,
}

type RawPlacement = (String, usize, usize, bool);

impl From<RawPlacement> for PlacementEntry {
    fn from((word, row, col, is_across): RawPlacement) -> Self {
        Self {
            word,
            row,
            col,
            orientation: if is_across {
                Orientation::Across
            } else {
                Orientation::Down
            },
        }
    }
}

impl From<PlacementEntry> for RawPlacement {
    fn from(entry: PlacementEntry) -> Self {
        (
            entry.word,
            entry.row,
            entry.col,
            entry.orientation.is_across(),
        )
    }
}

impl PlacementEntry {
    pub fn new(word: impl Into<String>, row: usize, col: usize, orientation: Orientation) -> Self {
        Self {
            word: word.into(),
            row,
            col,
            orientation,
        }
    }

    /// Iterates the (row, col, letter) triples this word occupies.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, char)> + '_ {
        let (dr, dc) = self.orientation.step();
        self.word
            .chars()
            .enumerate()
            .map(move |(i, ch)| (self.row + i * dr, self.col + i * dc, ch))
    }
}

/// The rendered character grid: `GRID_SIZE` rows of `GRID_SIZE` cells, each
/// an uppercase letter or `EMPTY_CELL`. Serializes as an array of arrays of
/// one-character strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid(pub Vec<Vec<char>>);

impl Grid {
    pub fn cell(&self, row: usize, col: usize) -> char {
        self.0[row][col]
    }

    pub fn has_letter(&self, row: usize, col: usize) -> bool {
        self.0[row][col] != EMPTY_CELL
    }

    pub fn size(&self) -> usize {
        self.0.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub cols: usize,
    pub rows: usize,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            cols: GRID_SIZE,
            rows: GRID_SIZE,
        }
    }
}

/// Word -> clue texts. A placed word always has a key here; the list may be
/// empty when the clue provider had nothing usable for it.
pub type ClueMap = BTreeMap<String, Vec<String>>;

/// The two independent daily puzzles. The mode never changes pipeline
/// behavior; it only selects which artifact a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Solo,
    Battle,
}

impl Mode {
    pub fn artifact_name(self) -> &'static str {
        match self {
            Mode::Solo => "solo_play.json",
            Mode::Battle => "battle_play.json",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Solo => "solo",
            Mode::Battle => "battle",
        }
    }
}

/// The finished daily puzzle artifact. Immutable once assembled; storage and
/// overwrite semantics belong to the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    pub theme: String,
    pub words_sent: Vec<String>,
    pub dimensions: Dimensions,
    pub placed_words: Vec<PlacementEntry>,
    pub grid: Grid,
    pub clues: ClueMap,
    pub clues_across: Vec<String>,
    pub clues_down: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_entry_serializes_as_tuple() {
        let entry = PlacementEntry::new("APP", 2, 0, Orientation::Across);
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"["APP",2,0,true]"#);

        let back: PlacementEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_down_placement_round_trips() {
        let entry = PlacementEntry::new("DATA", 1, 0, Orientation::Down);
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"["DATA",1,0,false]"#);

        let back: PlacementEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.orientation, Orientation::Down);
    }

    #[test]
    fn test_placement_cells() {
        let across = PlacementEntry::new("NET", 0, 2, Orientation::Across);
        let cells: Vec<_> = across.cells().collect();
        assert_eq!(cells, vec![(0, 2, 'N'), (0, 3, 'E'), (0, 4, 'T')]);

        let down = PlacementEntry::new("NET", 1, 3, Orientation::Down);
        let cells: Vec<_> = down.cells().collect();
        assert_eq!(cells, vec![(1, 3, 'N'), (2, 3, 'E'), (3, 3, 'T')]);
    }

    #[test]
    fn test_grid_serializes_as_single_char_strings() {
        let grid = Grid(vec![vec!['A', '-'], vec!['-', 'B']]);
        let json = serde_json::to_value(&grid).unwrap();
        assert_eq!(json, serde_json::json!([["A", "-"], ["-", "B"]]));
    }
}
