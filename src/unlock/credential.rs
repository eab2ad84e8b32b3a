//! Unlock credential: pattern cells or PIN/password text

use super::error::{UnlockError, UnlockResult};
use super::grid::pattern_cell_count;
use std::fmt;

pub const MIN_CREDENTIAL_LEN: usize = 4;

/// Secret used for one unlock run. Either form can drive any modality:
/// keypads and password fields use the element text, patterns use the
/// numeric value of each element.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// 1-based, row-major pattern cells
    Cells(Vec<u32>),
    /// PIN digits or password characters
    Text(String),
}

impl Credential {
    pub fn text(text: impl Into<String>) -> Self {
        Credential::Text(text.into())
    }

    pub fn cells(cells: impl Into<Vec<u32>>) -> Self {
        Credential::Cells(cells.into())
    }

    /// Parse `1,5,9,6` (any grid size) or `1596` (single digit cells).
    pub fn parse_pattern(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        let cells: Option<Vec<u32>> = if raw.contains(',') {
            raw.split(',').map(|c| c.trim().parse().ok()).collect()
        } else {
            raw.chars().map(|c| c.to_digit(10)).collect()
        };
        cells.map(Credential::Cells)
    }

    pub fn len(&self) -> usize {
        match self {
            Credential::Cells(cells) => cells.len(),
            Credential::Text(text) => text.chars().count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn validate(&self) -> UnlockResult<()> {
        let len = self.len();
        if len < MIN_CREDENTIAL_LEN {
            return Err(UnlockError::InvalidCredential { len });
        }
        Ok(())
    }

    /// Each element as the label printed on its keypad button.
    pub fn keys(&self) -> Vec<String> {
        match self {
            Credential::Cells(cells) => cells.iter().map(u32::to_string).collect(),
            Credential::Text(text) => text.chars().map(String::from).collect(),
        }
    }

    /// All elements joined, as typed into a password field.
    pub fn joined(&self) -> String {
        match self {
            Credential::Cells(cells) => cells.iter().map(u32::to_string).collect(),
            Credential::Text(text) => text.clone(),
        }
    }

    /// Pattern cell indices, each checked against `1..=grid_size²`.
    pub fn pattern_cells(&self, grid_size: u32) -> UnlockResult<Vec<u32>> {
        let max = pattern_cell_count(grid_size)?;
        let out_of_range = |cell: String| UnlockError::InvalidPatternCell { cell, grid_size };
        match self {
            Credential::Cells(cells) => cells
                .iter()
                .map(|&cell| {
                    if (1..=max).contains(&cell) {
                        Ok(cell)
                    } else {
                        Err(out_of_range(cell.to_string()))
                    }
                })
                .collect(),
            Credential::Text(text) => text
                .chars()
                .map(|c| match c.to_digit(10) {
                    Some(cell) if (1..=max).contains(&cell) => Ok(cell),
                    _ => Err(out_of_range(c.to_string())),
                })
                .collect(),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Credential::Cells(_) => "Cells",
            Credential::Text(_) => "Text",
        };
        write!(f, "Credential::{kind}(<{} redacted>)", self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_credentials_rejected() {
        for short in [Credential::text("12"), Credential::cells(vec![1, 5, 9]), Credential::text("")] {
            let err = short.validate().unwrap_err();
            assert!(matches!(err, UnlockError::InvalidCredential { len } if len == short.len()));
        }
        assert!(Credential::text("1234").validate().is_ok());
        // length counts characters, not bytes
        assert!(Credential::text("密码").validate().is_err());
    }

    #[test]
    fn test_keys_and_joined() {
        let cells = Credential::cells(vec![1, 12, 3, 4]);
        assert_eq!(cells.keys(), vec!["1", "12", "3", "4"]);
        assert_eq!(cells.joined(), "11234");
        assert_eq!(Credential::text("ab1!").keys(), vec!["a", "b", "1", "!"]);
    }

    #[test]
    fn test_pattern_cells_range_checked() {
        assert_eq!(
            Credential::text("1596").pattern_cells(3).unwrap(),
            vec![1, 5, 9, 6]
        );
        assert_eq!(
            Credential::cells(vec![1, 16, 6, 11]).pattern_cells(4).unwrap(),
            vec![1, 16, 6, 11]
        );
        assert!(matches!(
            Credential::cells(vec![1, 10, 5, 9]).pattern_cells(3),
            Err(UnlockError::InvalidPatternCell { grid_size: 3, .. })
        ));
        assert!(Credential::text("0123").pattern_cells(3).is_err());
        assert!(Credential::text("12a4").pattern_cells(3).is_err());
    }

    #[test]
    fn test_pattern_cells_reject_bad_grid_size() {
        for size in [0, 65_536, u32::MAX] {
            assert!(matches!(
                Credential::text("1234").pattern_cells(size),
                Err(UnlockError::InvalidPatternSize { grid_size }) if grid_size == size
            ));
        }
    }

    #[test]
    fn test_parse_pattern_forms() {
        assert_eq!(
            Credential::parse_pattern("1,5,9,6"),
            Some(Credential::cells(vec![1, 5, 9, 6]))
        );
        assert_eq!(
            Credential::parse_pattern("1596"),
            Some(Credential::cells(vec![1, 5, 9, 6]))
        );
        assert_eq!(Credential::parse_pattern("1,x,3"), None);
        assert_eq!(Credential::parse_pattern(""), None);
    }

    #[test]
    fn test_debug_is_redacted() {
        let rendered = format!("{:?}", Credential::text("hunter22"));
        assert_eq!(rendered, "Credential::Text(<8 redacted>)");
        assert!(!rendered.contains("hunter"));
    }
}
