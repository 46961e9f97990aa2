//! Dashboard Sessions
//!
//! Every browser tab holds one WebSocket session with its own selection.
//!
//! ## Architecture
//!
//! - **SessionHub**: open sessions and their `SelectionState`
//! - **Handler**: WebSocket upgrade, message loop, chart pushes
//! - **Messages**: client and server message formats
//!
//! ## Example
//!
//! ```javascript
//! const ws = new WebSocket('ws://localhost:8050/ws');
//!
//! ws.onmessage = (event) => {
//!   const msg = JSON.parse(event.data);
//!   if (msg.type === 'charts') {
//!     Plotly.react('pie', msg.pie.data, msg.pie.layout);
//!   }
//! };
//!
//! ws.send(JSON.stringify({type: 'select_site', site: 'KSC LC-39A'}));
//! ws.send(JSON.stringify({type: 'select_payload', low: 2000, high: 8000}));
//! ```

mod handler;
mod hub;
mod messages;

pub use handler::websocket_handler;
pub use hub::{HubConfig, HubError, SessionHandle, SessionHub, SessionId};
pub use messages::{ClientMessage, ServerMessage};
