use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use tracing::info;

use crate::error::SeatingError;
use crate::seating::{Room, Student};

/// One cell of a tabular input file, after format-specific decoding.
#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

/// One data row of a tabular input file, with enough context to point at
/// the offending cell when a field is missing or malformed.
#[derive(Debug)]
struct RawRecord {
    file: String,
    row: usize,
    cells: Vec<Cell>,
}

impl RawRecord {
    fn cell(&self, column: usize) -> &Cell {
        self.cells.get(column).unwrap_or(&Cell::Empty)
    }

    /// String field. Numeric identifier cells (roll numbers, room numbers
    /// typed as numbers in the sheet) are rendered as integer text, so
    /// `42.0` reads back as `"42"`.
    fn text(&self, column: usize, field: &'static str) -> Result<String, SeatingError> {
        match self.cell(column) {
            Cell::Text(value) if !value.is_empty() => Ok(value.clone()),
            Cell::Number(value) => Ok((*value as i64).to_string()),
            _ => Err(self.bad_cell(column, field)),
        }
    }

    /// Non-negative integer field.
    fn count(&self, column: usize, field: &'static str) -> Result<usize, SeatingError> {
        match self.cell(column) {
            Cell::Number(value) if *value >= 0.0 => Ok(*value as usize),
            Cell::Text(value) => value
                .parse()
                .map_err(|_| self.bad_cell(column, field)),
            _ => Err(self.bad_cell(column, field)),
        }
    }

    fn bad_cell(&self, column: usize, field: &'static str) -> SeatingError {
        SeatingError::BadCell {
            file: self.file.clone(),
            row: self.row,
            column,
            field,
        }
    }
}

/// Reads the student roster: roll number, name, class, in that column
/// order, header row skipped.
pub fn read_students(path: &Path) -> Result<Vec<Student>, SeatingError> {
    let records = read_table(path)?;
    let mut students = Vec::with_capacity(records.len());
    for record in &records {
        students.push(Student {
            roll_number: record.text(0, "roll number")?,
            name: record.text(1, "name")?,
            class_name: record.text(2, "class")?,
        });
    }
    info!("Loaded {} students from {}", students.len(), path.display());
    Ok(students)
}

/// Reads the room matrix: room number, rows, columns, total capacity,
/// students per seat, in that column order, header row skipped.
pub fn read_rooms(path: &Path) -> Result<Vec<Room>, SeatingError> {
    let records = read_table(path)?;
    let mut rooms = Vec::with_capacity(records.len());
    for record in &records {
        rooms.push(Room {
            room_number: record.text(0, "room number")?,
            rows: record.count(1, "rows")?,
            columns: record.count(2, "columns")?,
            total_capacity: record.count(3, "total capacity")?,
            students_per_seat: record.count(4, "students per seat")?,
        });
    }
    info!("Loaded {} rooms from {}", rooms.len(), path.display());
    Ok(rooms)
}

fn read_table(path: &Path) -> Result<Vec<RawRecord>, SeatingError> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        read_csv_table(path)
    } else {
        read_workbook_table(path)
    }
}

/// First worksheet of an `.xlsx`/`.xls` workbook, data rows only.
fn read_workbook_table(path: &Path) -> Result<Vec<RawRecord>, SeatingError> {
    let file = path.display().to_string();
    let mut workbook = open_workbook_auto(path).map_err(|source| SeatingError::Spreadsheet {
        file: file.clone(),
        source,
    })?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SeatingError::EmptyWorkbook { file: file.clone() })?
        .map_err(|source| SeatingError::Spreadsheet {
            file: file.clone(),
            source,
        })?;

    let mut records = Vec::new();
    for (row, cells) in range.rows().enumerate().skip(1) {
        records.push(RawRecord {
            file: file.clone(),
            row,
            cells: cells.iter().map(decode_workbook_cell).collect(),
        });
    }
    Ok(records)
}

fn decode_workbook_cell(cell: &Data) -> Cell {
    match cell {
        Data::String(value) => Cell::Text(value.trim().to_string()),
        Data::Float(value) => Cell::Number(*value),
        Data::Int(value) => Cell::Number(*value as f64),
        Data::Bool(value) => Cell::Text(value.to_string()),
        _ => Cell::Empty,
    }
}

/// CSV fallback for local files; every field arrives as text.
fn read_csv_table(path: &Path) -> Result<Vec<RawRecord>, SeatingError> {
    let file = path.display().to_string();
    let mut reader = csv::Reader::from_path(path).map_err(|source| SeatingError::Csv {
        file: file.clone(),
        source,
    })?;

    let mut records = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result.map_err(|source| SeatingError::Csv {
            file: file.clone(),
            source,
        })?;
        let cells = record
            .iter()
            .map(|field| {
                let field = field.trim();
                if field.is_empty() {
                    Cell::Empty
                } else {
                    Cell::Text(field.to_string())
                }
            })
            .collect();
        records.push(RawRecord {
            file: file.clone(),
            // The consumed header row is row 0, like the workbook path.
            row: index + 1,
            cells,
        });
    }
    Ok(records)
}
