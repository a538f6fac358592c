//! A1 coordinate grammar for the fixed 8-column table
//!
//! All reads and writes are addressed as
//! `<sheetName>!<colLetter><row>:<colLetter><row>`; columns A-H map 1:1 to
//! the record fields in declared order.

use std::fmt;

/// The eight fixed columns of the backing table, in declared order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Column {
    /// Column A
    EmployeeId,
    /// Column B
    Name,
    /// Column C
    Department,
    /// Column D
    Position,
    /// Column E
    Status,
    /// Column F
    LoginTime,
    /// Column G
    BreakTime,
    /// Column H
    LastActivity,
}

impl Column {
    /// Number of columns in the table layout
    pub const COUNT: usize = 8;

    /// First column of the layout
    pub const FIRST: Column = Column::EmployeeId;

    /// Last column of the layout
    pub const LAST: Column = Column::LastActivity;

    /// The A1 column letter
    pub fn letter(self) -> char {
        match self {
            Column::EmployeeId => 'A',
            Column::Name => 'B',
            Column::Department => 'C',
            Column::Position => 'D',
            Column::Status => 'E',
            Column::LoginTime => 'F',
            Column::BreakTime => 'G',
            Column::LastActivity => 'H',
        }
    }
}

/// A rectangular cell address on one sheet
///
/// Row numbers are 1-based sheet rows; row 1 is the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRange {
    sheet: String,
    span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Span {
    /// The whole used range of the sheet
    Sheet,
    /// A single cell
    Cell { col: Column, row: u32 },
    /// A horizontal run of columns within one row
    Cols {
        start: Column,
        end: Column,
        row: u32,
    },
}

impl CellRange {
    /// The whole used range of a sheet (full-table reads)
    pub fn sheet(sheet: impl Into<String>) -> Self {
        Self {
            sheet: sheet.into(),
            span: Span::Sheet,
        }
    }

    /// A single cell
    pub fn cell(sheet: impl Into<String>, col: Column, row: u32) -> Self {
        Self {
            sheet: sheet.into(),
            span: Span::Cell { col, row },
        }
    }

    /// A run of columns within one row (inclusive on both ends)
    pub fn columns(sheet: impl Into<String>, start: Column, end: Column, row: u32) -> Self {
        Self {
            sheet: sheet.into(),
            span: Span::Cols { start, end, row },
        }
    }

    /// All eight columns of one row (`A{row}:H{row}`)
    pub fn row(sheet: impl Into<String>, row: u32) -> Self {
        Self::columns(sheet, Column::FIRST, Column::LAST, row)
    }

    /// The header row (`A1:H1`)
    pub fn header(sheet: impl Into<String>) -> Self {
        Self::row(sheet, 1)
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.span {
            Span::Sheet => write!(f, "{}", self.sheet),
            Span::Cell { col, row } => write!(f, "{}!{}{}", self.sheet, col.letter(), row),
            Span::Cols { start, end, row } => write!(
                f,
                "{}!{}{}:{}{}",
                self.sheet,
                start.letter(),
                row,
                end.letter(),
                row
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letters() {
        assert_eq!(Column::EmployeeId.letter(), 'A');
        assert_eq!(Column::Status.letter(), 'E');
        assert_eq!(Column::LastActivity.letter(), 'H');
        assert_eq!(Column::COUNT, 8);
    }

    #[test]
    fn test_whole_sheet_range() {
        assert_eq!(CellRange::sheet("Sheet1").to_string(), "Sheet1");
    }

    #[test]
    fn test_single_cell() {
        let range = CellRange::cell("Sheet1", Column::Status, 3);
        assert_eq!(range.to_string(), "Sheet1!E3");
    }

    #[test]
    fn test_full_row() {
        let range = CellRange::row("Sheet1", 2);
        assert_eq!(range.to_string(), "Sheet1!A2:H2");
    }

    #[test]
    fn test_header_row() {
        assert_eq!(CellRange::header("Sheet1").to_string(), "Sheet1!A1:H1");
    }

    #[test]
    fn test_column_span() {
        let range = CellRange::columns("Attendance", Column::Status, Column::LastActivity, 7);
        assert_eq!(range.to_string(), "Attendance!E7:H7");
    }
}
