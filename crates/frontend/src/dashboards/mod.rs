pub mod d100_availability_calendar;
