use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SeatingError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub roll_number: String,
    pub name: String,
    /// Carried through from the roster; not used when seating.
    pub class_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub room_number: String,
    pub rows: usize,
    pub columns: usize,
    pub students_per_seat: usize,
    /// Declared capacity from the room sheet. Informational only; usable
    /// slots always derive from the grid dimensions, and the two are never
    /// cross-checked.
    pub total_capacity: usize,
}

impl Room {
    /// Usable student slots: grid seats times occupants per seat.
    pub fn total_seats(&self) -> usize {
        self.rows * self.columns * self.students_per_seat
    }
}

/// Student ordering applied before seating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderingPolicy {
    /// Seat students in the order they were read from the roster.
    AsGiven,
    /// Stable ascending sort on the student name.
    ByName,
}

/// Which student field each seat cell shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    RollNumber,
    Name,
}

/// The two arrangement types accepted at the service boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrangement {
    Alphabetical,
    RollNumber,
}

impl Arrangement {
    /// The roll-number arrangement keeps the roster in upload order: it
    /// never sorts by roll number value, it only changes the seat label
    /// text.
    pub fn ordering_policy(self) -> OrderingPolicy {
        match self {
            Arrangement::Alphabetical => OrderingPolicy::ByName,
            Arrangement::RollNumber => OrderingPolicy::AsGiven,
        }
    }

    pub fn display_mode(self) -> DisplayMode {
        match self {
            Arrangement::Alphabetical => DisplayMode::Name,
            Arrangement::RollNumber => DisplayMode::RollNumber,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Arrangement::Alphabetical => "alphabetical",
            Arrangement::RollNumber => "rollnumber",
        }
    }

    /// Document title for the generated chart.
    pub fn title(self) -> &'static str {
        match self {
            Arrangement::Alphabetical => "Alphabetical Seating Arrangement",
            Arrangement::RollNumber => "Roll Number Seating Arrangement",
        }
    }
}

impl FromStr for Arrangement {
    type Err = SeatingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "alphabetical" => Ok(Arrangement::Alphabetical),
            "rollnumber" => Ok(Arrangement::RollNumber),
            _ => Err(SeatingError::InvalidArrangement(value.to_string())),
        }
    }
}

/// One room's grid of seat-content strings, in row-major order. Rows can be
/// shorter than the room's slot count when students ran out mid-row; they
/// are never padded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomPlan {
    pub room_number: String,
    pub rows: Vec<Vec<String>>,
}

impl RoomPlan {
    pub fn seated(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
}

/// The full allocation: rooms in input order (rooms the cursor never
/// reached are absent), plus the count of students left without a seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatingPlan {
    pub rooms: Vec<RoomPlan>,
    pub unseated: usize,
}

impl SeatingPlan {
    pub fn seated(&self) -> usize {
        self.rooms.iter().map(RoomPlan::seated).sum()
    }

    pub fn room(&self, room_number: &str) -> Option<&RoomPlan> {
        self.rooms.iter().find(|r| r.room_number == room_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrangement_parses_both_selectors() {
        assert_eq!(
            "alphabetical".parse::<Arrangement>().unwrap(),
            Arrangement::Alphabetical
        );
        assert_eq!(
            "rollnumber".parse::<Arrangement>().unwrap(),
            Arrangement::RollNumber
        );
        // The original lower-cases the selector before dispatching.
        assert_eq!(
            "RollNumber".parse::<Arrangement>().unwrap(),
            Arrangement::RollNumber
        );
    }

    #[test]
    fn arrangement_rejects_anything_else() {
        let err = "byheight".parse::<Arrangement>().unwrap_err();
        assert!(matches!(
            err,
            SeatingError::InvalidArrangement(ref v) if v == "byheight"
        ));
        assert!("".parse::<Arrangement>().is_err());
    }

    #[test]
    fn roll_number_arrangement_does_not_sort() {
        assert_eq!(
            Arrangement::RollNumber.ordering_policy(),
            OrderingPolicy::AsGiven
        );
        assert_eq!(
            Arrangement::Alphabetical.ordering_policy(),
            OrderingPolicy::ByName
        );
    }

    #[test]
    fn total_seats_derives_from_grid_not_declared_capacity() {
        let room = Room {
            room_number: "101".to_string(),
            rows: 3,
            columns: 4,
            students_per_seat: 2,
            total_capacity: 999,
        };
        assert_eq!(room.total_seats(), 24);
    }
}
