use super::types::{DisplayMode, Student};

/// Seat identifier for a column slot, 1-based. Consecutive slots that share
/// one physical seat (`students_per_seat > 1`) map to the same identifier.
pub fn seat_label(row: usize, column_slot: usize, students_per_seat: usize) -> String {
    format!("SeatR{}C{}", row + 1, column_slot / students_per_seat + 1)
}

/// Full cell text for one seated student: the seat identifier, a line
/// break, then the detail line selected by the display mode.
pub fn seat_content(
    row: usize,
    column_slot: usize,
    students_per_seat: usize,
    student: &Student,
    mode: DisplayMode,
) -> String {
    let label = seat_label(row, column_slot, students_per_seat);
    match mode {
        DisplayMode::RollNumber => format!("{}\nRoll No: {}", label, student.roll_number),
        DisplayMode::Name => format!("{}\nName: {}", label, student.name),
    }
}
