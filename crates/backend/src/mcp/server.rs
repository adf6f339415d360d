//! MCP tools over the room and booking services
//!
//! Tool names match the guest-facing operations of the REST surface so an
//! assistant can browse rooms, book, look up and cancel on a guest's behalf.

use contracts::dashboards::d100_availability_calendar::AvailabilityRequest;
use contracts::domain::a002_booking::aggregate::{BookingRequest, BookingResponse, MessageResponse};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use serde::{Deserialize, Serialize};

use crate::dashboards::d100_availability_calendar::service as availability_service;
use crate::domain::a001_room_type::error::RoomTypeError;
use crate::domain::a001_room_type::service as room_type_service;
use crate::domain::a002_booking::error::BookingError;
use crate::domain::a002_booking::service as booking_service;

// Parameters for book_room tool
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct BookRoomParams {
    /// Room type id as listed by get_all_rooms
    pub room_id: i64,
    /// Check-in date, YYYY-MM-DD
    pub check_in_date: String,
    /// Check-out date, YYYY-MM-DD
    pub check_out_date: String,
    /// Guest full name
    pub user_name: String,
    /// Guest email
    pub email: String,
    /// Preferred physical room number (optional, first free room otherwise)
    #[serde(default)]
    pub room_no: Option<i64>,
}

impl BookRoomParams {
    pub fn into_request(self) -> (i64, BookingRequest) {
        (
            self.room_id,
            BookingRequest {
                check_in_date: self.check_in_date,
                check_out_date: self.check_out_date,
                user_name: self.user_name,
                email: self.email,
                room_no: self.room_no,
            },
        )
    }
}

// Parameters for get_booking_by_id and cancel_booking tools
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct BookingIdParams {
    /// Booking id
    pub booking_id: i64,
}

// Parameters for get_availability tool
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct AvailabilityParams {
    /// Calendar year, e.g. 2024
    pub year: i32,
    /// Month 1-12
    pub month: u32,
}

/// Tool result carrying `value` as pretty JSON text
fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Failed to encode result: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// Rule violations go back to the caller as a readable tool error; anything else is internal
fn tool_error(err: anyhow::Error) -> Result<CallToolResult, McpError> {
    let message = if let Some(e) = err.downcast_ref::<BookingError>() {
        e.to_string()
    } else if let Some(e) = err.downcast_ref::<RoomTypeError>() {
        e.to_string()
    } else {
        tracing::error!("MCP tool failed: {:#}", err);
        return Err(McpError::internal_error("Internal error", None));
    };
    Ok(CallToolResult::error(vec![Content::text(message)]))
}

fn outcome<T: Serialize>(result: anyhow::Result<T>) -> Result<CallToolResult, McpError> {
    match result {
        Ok(value) => json_result(&value),
        Err(e) => tool_error(e),
    }
}

/// RoomDesk MCP server handler
#[derive(Clone)]
pub struct RoomdeskMcp {
    tool_router: ToolRouter<Self>,
}

impl RoomdeskMcp {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }
}

impl Default for RoomdeskMcp {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl RoomdeskMcp {
    #[tool(
        description = "Display all available rooms along with their full details such as name, guest capacity, amenities, pricing, availability, refund policy and room numbers, so the user can compare rooms and choose a suitable one."
    )]
    async fn get_all_rooms(&self) -> Result<CallToolResult, McpError> {
        outcome(room_type_service::list_available().await)
    }

    #[tool(
        description = "Book one room of a room type for a guest between check-in and check-out dates (YYYY-MM-DD, both inclusive)."
    )]
    async fn book_room(
        &self,
        Parameters(params): Parameters<BookRoomParams>,
    ) -> Result<CallToolResult, McpError> {
        let (room_id, request) = params.into_request();
        tracing::info!("MCP book_room for room type {}", room_id);
        outcome(
            booking_service::book_room(room_id, request)
                .await
                .map(BookingResponse::booked),
        )
    }

    #[tool(description = "List all bookings with guest, room, dates, price and status.")]
    async fn get_all_bookings(&self) -> Result<CallToolResult, McpError> {
        outcome(booking_service::list_all().await)
    }

    #[tool(description = "Retrieve a single booking by its id.")]
    async fn get_booking_by_id(
        &self,
        Parameters(params): Parameters<BookingIdParams>,
    ) -> Result<CallToolResult, McpError> {
        outcome(booking_service::get_by_id(params.booking_id).await)
    }

    #[tool(description = "Cancel a booking by its id and return its room to availability.")]
    async fn cancel_booking(
        &self,
        Parameters(params): Parameters<BookingIdParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("MCP cancel_booking {}", params.booking_id);
        outcome(
            booking_service::cancel(params.booking_id)
                .await
                .map(|_| MessageResponse::cancelled()),
        )
    }

    #[tool(
        description = "Month availability grid: every physical room by every day of the month, marked past, occupied or available, with an occupancy summary."
    )]
    async fn get_availability(
        &self,
        Parameters(params): Parameters<AvailabilityParams>,
    ) -> Result<CallToolResult, McpError> {
        let request = AvailabilityRequest {
            year: params.year,
            month: params.month,
        };
        let Some(view) = availability_service::month_view_from_request(&request) else {
            return Err(McpError::invalid_params(
                format!("Invalid month: {}-{}", params.year, params.month),
                None,
            ));
        };
        outcome(availability_service::get_availability(view).await)
    }
}

#[tool_handler]
impl ServerHandler for RoomdeskMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "RoomDesk hotel booking server. Use 'get_all_rooms' to browse room types, \
                 'book_room' to reserve one, 'get_booking_by_id' or 'get_all_bookings' to look \
                 bookings up, 'cancel_booking' to cancel and 'get_availability' for a month view."
                    .to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_info() {
        let info = RoomdeskMcp::new().get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.unwrap().contains("book_room"));
    }

    #[test]
    fn test_tool_names() {
        let mut names: Vec<String> = RoomdeskMcp::tool_router()
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "book_room",
                "cancel_booking",
                "get_all_bookings",
                "get_all_rooms",
                "get_availability",
                "get_booking_by_id",
            ]
        );
    }

    #[test]
    fn test_book_room_params() {
        let params: BookRoomParams = serde_json::from_str(
            r#"{"room_id": 2, "check_in_date": "2024-03-10", "check_out_date": "2024-03-12",
                "user_name": "Asha Rao", "email": "asha@example.com"}"#,
        )
        .unwrap();
        let (room_id, request) = params.into_request();
        assert_eq!(room_id, 2);
        assert_eq!(request.room_no, None);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_rule_violation_is_tool_error() {
        let err: anyhow::Error = BookingError::Conflict("Already cancelled".into()).into();
        let result = tool_error(err).unwrap();
        assert_eq!(result.is_error, Some(true));

        let err: anyhow::Error = RoomTypeError::NotFound.into();
        assert_eq!(tool_error(err).unwrap().is_error, Some(true));
    }

    #[test]
    fn test_unexpected_failure_is_internal() {
        assert!(tool_error(anyhow::anyhow!("disk full")).is_err());
    }

    #[test]
    fn test_success_is_json_text() {
        let result = json_result(&MessageResponse::cancelled()).unwrap();
        assert_ne!(result.is_error, Some(true));
        let wire = serde_json::to_string(&result).unwrap();
        assert!(wire.contains("Booking cancelled successfully!"));
    }
}
