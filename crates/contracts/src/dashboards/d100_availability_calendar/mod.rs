//! D100: month-view availability calendar
//!
//! Derives, for every (room, day) of a month, whether the room is past,
//! available or occupied. Everything here is pure; snapshots of room types
//! and bookings are fetched by the caller.

pub mod context;
pub mod dto;
pub mod grid;
pub mod month_view;
pub mod room_directory;
pub mod summary;

pub use context::CalendarContext;
pub use dto::{AvailabilityRequest, AvailabilityResponse};
pub use grid::{build_grid, AvailabilityGrid, CalendarCell, CellStatus, DayColumn, GridRow};
pub use month_view::MonthView;
pub use room_directory::{collect_room_numbers, rooms_from_room_types, RoomNumber, RoomNumberEntry};
pub use summary::OccupancySummary;
