//! Types shared by the RoomDesk backend and dashboard
//!
//! - `domain`: stored aggregates (room types, bookings)
//! - `dashboards`: derived views, including the availability calendar
//! - `system`: auth and user accounts
//! - `shared`: small wire helpers

pub mod dashboards;
pub mod domain;
pub mod shared;
pub mod system;
