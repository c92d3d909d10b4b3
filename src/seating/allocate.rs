use super::capacity::report_shortfall;
use super::label::seat_content;
use super::types::{
    Arrangement, DisplayMode, OrderingPolicy, Room, RoomPlan, SeatingPlan, Student,
};

/// Seats students under the given arrangement type.
pub fn allocate(students: &[Student], rooms: &[Room], arrangement: Arrangement) -> SeatingPlan {
    allocate_seats(
        students,
        rooms,
        arrangement.ordering_policy(),
        arrangement.display_mode(),
    )
}

/// Fills rooms in input order, row-major, from a single cursor over the
/// roster, until every student is seated or capacity runs out.
///
/// The caller's slices are never mutated: ordering is applied to an
/// internal view of the roster. Once the cursor exhausts the roster the
/// loop stops, so rooms after that point do not appear in the plan at all.
pub fn allocate_seats(
    students: &[Student],
    rooms: &[Room],
    policy: OrderingPolicy,
    mode: DisplayMode,
) -> SeatingPlan {
    let mut roster: Vec<&Student> = students.iter().collect();
    if policy == OrderingPolicy::ByName {
        // Stable: students with equal names keep their roster order.
        roster.sort_by(|a, b| a.name.cmp(&b.name));
    }

    let mut plan_rooms = Vec::new();
    let mut cursor = 0;

    for room in rooms {
        let slots_per_row = room.columns * room.students_per_seat;
        let mut grid = Vec::with_capacity(room.rows);

        for row_index in 0..room.rows {
            let mut row = Vec::new();
            let mut slot = 0;
            while slot < slots_per_row && cursor < roster.len() {
                row.push(seat_content(
                    row_index,
                    slot,
                    room.students_per_seat,
                    roster[cursor],
                    mode,
                ));
                cursor += 1;
                slot += 1;
            }
            grid.push(row);
        }

        plan_rooms.push(RoomPlan {
            room_number: room.room_number.clone(),
            rows: grid,
        });

        if cursor >= roster.len() {
            break;
        }
    }

    let unseated = roster.len() - cursor;
    report_shortfall(unseated);

    SeatingPlan {
        rooms: plan_rooms,
        unseated,
    }
}
