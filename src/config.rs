//! Board geometry, timing and palette.
//!
//! All lengths are in canvas pixels. The playable grid is `width / cell` columns
//! by `height / cell` rows, and every segment / fruit coordinate is a multiple of
//! `cell`.

use thiserror::Error;

/// Length of the snake when a game starts or restarts.
pub const INITIAL_LENGTH: usize = 3;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cell size must be positive")]
    ZeroCell,
    #[error("board {width}x{height} is not a whole number of {cell}px cells")]
    Misaligned { width: i32, height: i32, cell: i32 },
    #[error("board needs at least {needed} cells, got {cells}")]
    TooSmall { cells: usize, needed: usize },
    #[error("tick period must be positive")]
    ZeroTick,
    #[error("board {width}x{height} with {cell}px cells has too many cells")]
    Oversized { width: i32, height: i32, cell: i32 },
    #[error("snake body must not be empty")]
    EmptySnake,
    #[error("no entropy source for fruit placement: {0}")]
    Entropy(#[from] rand::Error),
    #[cfg(feature = "serde_json")]
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    pub cell: i32,
    /// Simulation period; redraw runs every animation frame independently.
    pub tick_ms: i32,
    pub fruit_reward: u32,
    pub fruit_color: String,
    pub body_color: String,
    /// Used for even-indexed segments (head included).
    pub body_alt_color: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            cell: 25,
            tick_ms: 175,
            fruit_reward: 100,
            fruit_color: "red".to_string(),
            body_color: "white".to_string(),
            body_alt_color: "#ddf0cdff".to_string(),
        }
    }
}

impl GameConfig {
    pub fn columns(&self) -> i32 {
        self.width / self.cell
    }

    pub fn rows(&self) -> i32 {
        self.height / self.cell
    }

    /// `None` when the grid holds more than `u32::MAX` cells.
    pub fn cell_count(&self) -> Option<usize> {
        let cols = u32::try_from(self.columns().max(0)).ok()?;
        let rows = u32::try_from(self.rows().max(0)).ok()?;
        cols.checked_mul(rows).map(|n| n as usize)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell <= 0 {
            return Err(ConfigError::ZeroCell);
        }
        if self.width % self.cell != 0 || self.height % self.cell != 0 {
            return Err(ConfigError::Misaligned {
                width: self.width,
                height: self.height,
                cell: self.cell,
            });
        }
        if self.tick_ms <= 0 {
            return Err(ConfigError::ZeroTick);
        }
        let Some(cells) = self.cell_count() else {
            return Err(ConfigError::Oversized {
                width: self.width,
                height: self.height,
                cell: self.cell,
            });
        };
        // Room for the snake plus one free cell for the fruit.
        let needed = INITIAL_LENGTH + 1;
        if self.width <= 0 || self.height <= 0 || cells < needed {
            return Err(ConfigError::TooSmall { cells, needed });
        }
        Ok(())
    }

    /// Parse a (possibly partial) JSON object; absent keys keep their defaults.
    #[cfg(feature = "serde_json")]
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let cfg: GameConfig = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_board_is_twenty_by_twenty() {
        let cfg = GameConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.columns(), 20);
        assert_eq!(cfg.rows(), 20);
        assert_eq!(cfg.cell_count(), Some(400));
    }

    #[test]
    fn rejects_zero_cell() {
        let cfg = GameConfig { cell: 0, ..GameConfig::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::ZeroCell)));
    }

    #[test]
    fn rejects_misaligned_board() {
        let cfg = GameConfig { width: 510, ..GameConfig::default() };
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Misaligned { width: 510, .. }));
        assert!(err.to_string().contains("510x500"));
    }

    #[test]
    fn rejects_board_without_room_for_fruit() {
        let cfg = GameConfig { width: 25, height: 75, ..GameConfig::default() };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::TooSmall { cells: 3, needed: 4 })
        ));
    }

    #[test]
    fn rejects_board_with_more_cells_than_u32() {
        let cfg = GameConfig { width: 100_000, height: 100_000, cell: 1, ..GameConfig::default() };
        assert_eq!(cfg.cell_count(), None);
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Oversized { width: 100_000, height: 100_000, cell: 1 })
        ));
    }

    #[test]
    fn missing_entropy_surfaces_as_error() {
        let err: ConfigError = rand::Error::new("crypto unavailable").into();
        assert!(matches!(err, ConfigError::Entropy(_)));
        assert!(err.to_string().contains("crypto unavailable"));
    }

    #[test]
    fn rejects_zero_tick() {
        let cfg = GameConfig { tick_ms: 0, ..GameConfig::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::ZeroTick)));
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = GameConfig::from_json(r#"{"width": 300, "tick_ms": 120}"#).unwrap();
        assert_eq!(cfg.width, 300);
        assert_eq!(cfg.tick_ms, 120);
        assert_eq!(cfg.height, 500);
        assert_eq!(cfg.fruit_reward, 100);
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn bad_json_is_reported() {
        assert!(matches!(
            GameConfig::from_json("{not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
