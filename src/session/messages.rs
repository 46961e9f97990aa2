//! Session Message Types
//!
//! JSON messages exchanged over a dashboard session's WebSocket.

use serde::{Deserialize, Serialize};

use crate::chart::Figure;
use crate::dashboard::DashboardLayout;
use crate::filter::{FilterResult, PayloadRange, SelectionEvent, SelectionState, SiteFilter};

/// Messages sent from the page to the server
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Dropdown changed
    SelectSite {
        /// "ALL" or a launch site identifier
        site: SiteFilter,
    },
    /// Range slider moved
    SelectPayload {
        low: f64,
        high: f64,
    },
    /// Ping for keepalive
    Ping,
}

impl ClientMessage {
    /// Convert a selection message into an event
    ///
    /// Returns `Ok(None)` for messages that do not change the selection.
    pub fn into_event(self) -> FilterResult<Option<SelectionEvent>> {
        match self {
            ClientMessage::SelectSite { site } => Ok(Some(SelectionEvent::SiteChanged(site))),
            ClientMessage::SelectPayload { low, high } => Ok(Some(
                SelectionEvent::PayloadChanged(PayloadRange::new(low, high)?),
            )),
            ClientMessage::Ping => Ok(None),
        }
    }
}

/// Messages sent from the server to the page
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Session established
    Connected {
        /// Unique session identifier
        session_id: String,
        /// Widget description for the page
        layout: DashboardLayout,
    },
    /// Freshly computed charts
    Charts {
        /// Increments with every update of this session
        sequence: u64,
        /// Selection the charts were computed for
        selection: SelectionState,
        pie: Figure,
        scatter: Figure,
    },
    /// Pong response to ping
    Pong,
    /// Error message; the session stays open
    Error {
        message: String,
    },
}
