pub mod allocate;
pub mod capacity;
pub mod label;
pub mod types;

pub use allocate::{allocate, allocate_seats};
pub use capacity::{report_shortfall, total_slots};
pub use label::{seat_content, seat_label};
pub use types::{
    Arrangement, DisplayMode, OrderingPolicy, Room, RoomPlan, SeatingPlan, Student,
};
