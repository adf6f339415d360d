pub mod a001_room_type;
pub mod a002_booking;
