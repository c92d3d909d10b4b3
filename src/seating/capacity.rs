use tracing::warn;

use super::types::Room;

/// Usable student slots across a set of rooms.
pub fn total_slots(rooms: &[Room]) -> usize {
    rooms.iter().map(Room::total_seats).sum()
}

/// Surfaces a capacity shortfall as a warning. Non-fatal: the partial plan
/// is still returned, and callers decide whether it is acceptable.
pub fn report_shortfall(unseated: usize) {
    if unseated > 0 {
        warn!("Not enough room capacity for {} students", unseated);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(rows: usize, columns: usize, students_per_seat: usize) -> Room {
        Room {
            room_number: "101".to_string(),
            rows,
            columns,
            students_per_seat,
            total_capacity: 0,
        }
    }

    #[test]
    fn total_slots_sums_usable_seats() {
        let rooms = vec![room(2, 3, 1), room(1, 4, 2), room(0, 5, 1)];
        assert_eq!(total_slots(&rooms), 6 + 8);
        assert_eq!(total_slots(&[]), 0);
    }

    #[test]
    fn report_shortfall_accepts_zero() {
        // No-op at zero; just must not panic either way.
        report_shortfall(0);
        report_shortfall(3);
    }
}
