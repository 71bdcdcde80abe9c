//! Game and search configuration.
//!
//! Configs are plain serde structs loaded from TOML. Loading never falls back
//! to defaults silently: a file that cannot be read, parsed or validated is
//! reported as a [`ConfigError`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::board::{Board, Piece, Pos, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::error::{ConfigError, EngineError, Result};
use crate::rules::check_win_length;

/// Display symbols for the two pieces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceSymbols {
    pub first: String,
    pub second: String,
}

impl PieceSymbols {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }

    /// Both symbols non-empty, distinct, and not clashing with the empty-cell markers.
    pub fn validate(&self) -> Result<()> {
        let usable = |s: &str| !s.trim().is_empty() && !s.contains(['.', '_', '/', '\n']);
        if !usable(&self.first) || !usable(&self.second) || self.first == self.second {
            return Err(EngineError::InvalidSymbols);
        }
        Ok(())
    }

    #[inline]
    pub fn symbol(&self, piece: Piece) -> &str {
        match piece {
            Piece::First => &self.first,
            Piece::Second => &self.second,
        }
    }

    /// Parse a board from text.
    ///
    /// Rows are separated by `/` or newlines; `.` and `_` mark empty cells and
    /// whitespace inside a row is ignored. Example with `X`/`O`: `"XX./.O./..."`.
    pub fn parse_board(&self, text: &str) -> Result<Board> {
        let rows = text
            .split(['/', '\n'])
            .map(str::trim)
            .filter(|row| !row.is_empty())
            .enumerate()
            .map(|(r, row)| self.parse_row(r, row))
            .collect::<Result<Vec<_>>>()?;

        if rows.is_empty() {
            return Err(EngineError::MalformedBoard("no rows".to_string()));
        }
        Board::from_rows(&rows)
    }

    fn parse_row(&self, r: usize, row: &str) -> Result<Vec<Option<Piece>>> {
        // Longer symbol first so a prefix never shadows it
        let mut symbols = [(self.first.as_str(), Piece::First), (self.second.as_str(), Piece::Second)];
        symbols.sort_by_key(|(s, _)| std::cmp::Reverse(s.len()));

        let mut cells = Vec::new();
        let mut rest = row;
        while let Some(ch) = rest.chars().next() {
            if ch.is_whitespace() {
                rest = &rest[ch.len_utf8()..];
                continue;
            }
            if ch == '.' || ch == '_' {
                cells.push(None);
                rest = &rest[1..];
                continue;
            }
            match symbols.iter().find(|(s, _)| rest.starts_with(s)) {
                Some(&(s, piece)) => {
                    cells.push(Some(piece));
                    rest = &rest[s.len()..];
                }
                None => {
                    return Err(EngineError::MalformedBoard(format!(
                        "unknown symbol {:?} in row {}",
                        ch, r
                    )));
                }
            }
        }
        Ok(cells)
    }

    /// Render a board as newline-separated rows, `.` for empty cells.
    pub fn format_board(&self, board: &Board) -> String {
        board
            .rows()
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map_or(".", |piece| self.symbol(piece)))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Search knobs. The default is an exhaustive, single-threaded search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Depth limit in plies; `None` searches to the end of the game
    pub max_depth: Option<u8>,
    /// Wall-clock budget per `best_move` call
    pub time_limit_ms: Option<u64>,
    /// Split the root across rayon workers
    pub parallel: bool,
    pub transposition: bool,
    pub tt_size_mb: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            time_limit_ms: None,
            parallel: false,
            transposition: true,
            tt_size_mb: 1,
        }
    }
}

impl SearchConfig {
    /// Depth-limited search for boards too large to solve.
    pub fn depth_limited(max_depth: u8) -> Self {
        Self {
            max_depth: Some(max_depth),
            ..Self::default()
        }
    }

    pub fn is_exhaustive(&self) -> bool {
        self.max_depth.is_none()
    }
}

/// Complete description of one game variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub name: String,
    pub board_size: usize,
    pub win_length: usize,
    pub pieces: PieceSymbols,
    #[serde(default)]
    pub search: SearchConfig,
}

impl GameConfig {
    /// Classic 3x3 tic-tac-toe, solved exhaustively.
    pub fn tic_tac_toe() -> Self {
        Self {
            name: "tic-tac-toe".to_string(),
            board_size: 3,
            win_length: 3,
            pieces: PieceSymbols::new("X", "O"),
            search: SearchConfig::default(),
        }
    }

    /// 19x19 five-in-a-row with a shallow heuristic search.
    pub fn gobang() -> Self {
        Self {
            name: "gobang".to_string(),
            board_size: MAX_BOARD_SIZE,
            win_length: 5,
            pieces: PieceSymbols::new("⚫", "⚪"),
            search: SearchConfig::depth_limited(2),
        }
    }

    /// Look up a built-in preset by name.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "tic-tac-toe" | "tictactoe" => Some(Self::tic_tac_toe()),
            "gobang" => Some(Self::gobang()),
            _ => None,
        }
    }

    /// Check board size, win length and symbols.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(EngineError::InvalidBoardSize {
                size: self.board_size,
                min: MIN_BOARD_SIZE,
                max: MAX_BOARD_SIZE,
            });
        }
        check_win_length(self.win_length, self.board_size)?;
        if self.search.max_depth == Some(0) {
            return Err(EngineError::InvalidSearchDepth);
        }
        self.pieces.validate()
    }

    /// Empty board of the configured size.
    pub fn new_board(&self) -> Result<Board> {
        Board::new(self.board_size)
    }

    /// Board must match the configured dimensions.
    pub fn check_board(&self, board: &Board) -> Result<()> {
        if board.size() != self.board_size {
            return Err(EngineError::DimensionMismatch {
                expected: self.board_size,
                actual: board.size(),
            });
        }
        Ok(())
    }

    /// Parse a board in this game's notation and check its dimensions.
    pub fn parse_board(&self, text: &str) -> Result<Board> {
        let board = self.pieces.parse_board(text)?;
        self.check_board(&board)?;
        Ok(board)
    }

    /// Parse "row,col" into an in-bounds position.
    pub fn parse_pos(&self, text: &str) -> Result<Pos> {
        let malformed = || EngineError::MalformedBoard(format!("expected \"row,col\", got {:?}", text));
        let (r, c) = text.split_once(',').ok_or_else(malformed)?;
        let row: usize = r.trim().parse().map_err(|_| malformed())?;
        let col: usize = c.trim().parse().map_err(|_| malformed())?;
        if row >= self.board_size || col >= self.board_size {
            return Err(EngineError::OutOfBounds {
                row,
                col,
                size: self.board_size,
            });
        }
        Ok(Pos::new(row as u8, col as u8))
    }

    pub fn from_toml_str(content: &str) -> std::result::Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        debug!(name = %config.name, board_size = config.board_size, win_length = config.win_length, "config parsed");
        Ok(config)
    }

    /// Load and validate a config file.
    pub fn load_from_path(path: &Path) -> std::result::Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Loading config from {}", path.display());
        Self::from_toml_str(&content)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::tic_tac_toe()
    }
}
