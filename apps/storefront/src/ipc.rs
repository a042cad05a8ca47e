//! # IPC Bridge
//!
//! Line-delimited JSON bridge between the frontend and the commands.
//!
//! ## Wire Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdin  (one request per line)                                          │
//! │  {"id":1,"cmd":"add_to_cart","args":{"itemId":"lesson-1"}}              │
//! │  {"id":2,"cmd":"navigate","args":{"path":"/Checkout"}}                  │
//! │                                                                         │
//! │  stdout (events first, then the response, per request)                  │
//! │  {"event":"cart-changed","payload":{"event":{...},"cart":{...}}}        │
//! │  {"id":1,"ok":{"lines":[{"itemId":"lesson-1","quantity":1}],...}}       │
//! │  {"id":2,"ok":{"path":"/Checkout","name":"checkout",...}}               │
//! │                                                                         │
//! │  failures                                                               │
//! │  {"id":3,"error":{"code":"VALIDATION_ERROR","message":"..."}}           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Requests are handled strictly one after another. Cart observers run
//! inside each command, and the events they produce are written before the
//! command's response, so the frontend never sees a response ahead of the
//! change it caused.

use lesson_core::ItemId;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, warn};

use crate::commands;
use crate::error::ApiError;
use crate::state::{CartNotification, CartState, ConfigState, NavigationState};

/// Event name for cart notifications.
pub const CART_CHANGED_EVENT: &str = "cart-changed";

// =============================================================================
// Messages
// =============================================================================

/// One request from the frontend.
#[derive(Debug, Clone, Deserialize)]
pub struct InvokeRequest {
    /// Echoed back in the response so the caller can match them up.
    #[serde(default)]
    pub id: Option<Value>,

    /// Command name, e.g. `add_to_cart`.
    pub cmd: String,

    /// Command arguments (an object, or absent).
    #[serde(default)]
    pub args: Value,
}

/// Result of one request.
#[derive(Debug, Clone, Serialize)]
pub struct InvokeResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    #[serde(flatten)]
    pub outcome: Outcome,
}

/// `{"ok": ...}` or `{"error": {...}}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    Ok(Value),
    Error(ApiError),
}

/// A pushed event, not tied to any request.
#[derive(Debug, Clone, Serialize)]
pub struct EventMessage<'a, T> {
    pub event: &'a str,
    pub payload: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ItemArgs {
    item_id: ItemId,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PathArgs {
    path: String,
}

// =============================================================================
// Handler
// =============================================================================

/// Routes invokes to commands, injecting the state each one needs.
#[derive(Debug)]
pub struct Handler {
    cart: CartState,
    navigation: NavigationState,
    config: ConfigState,
}

impl Handler {
    /// Creates a handler over the session's managed state.
    pub fn new(cart: CartState, navigation: NavigationState, config: ConfigState) -> Self {
        Handler {
            cart,
            navigation,
            config,
        }
    }

    /// The managed cart state.
    pub fn cart(&self) -> &CartState {
        &self.cart
    }

    /// Handles one raw request line.
    pub fn handle_line(&self, line: &str) -> InvokeResponse {
        match serde_json::from_str::<InvokeRequest>(line) {
            Ok(request) => self.invoke(request),
            Err(e) => {
                warn!(error = %e, "Rejected malformed request");
                InvokeResponse {
                    id: None,
                    outcome: Outcome::Error(ApiError::bad_request(format!(
                        "Invalid request: {}",
                        e
                    ))),
                }
            }
        }
    }

    /// Handles one decoded request.
    pub fn invoke(&self, request: InvokeRequest) -> InvokeResponse {
        let outcome = match self.dispatch(&request.cmd, request.args) {
            Ok(value) => Outcome::Ok(value),
            Err(err) => {
                debug!(cmd = %request.cmd, code = ?err.code, message = %err.message, "Command failed");
                Outcome::Error(err)
            }
        };

        InvokeResponse {
            id: request.id,
            outcome,
        }
    }

    fn dispatch(&self, cmd: &str, args: Value) -> Result<Value, ApiError> {
        match cmd {
            // Cart commands
            "get_cart" => to_value(commands::cart::get_cart(&self.cart)),
            "cart_quantity" => {
                let ItemArgs { item_id } = parse_args(args)?;
                to_value(commands::cart::cart_quantity(&self.cart, item_id))
            }
            "add_to_cart" => {
                let ItemArgs { item_id } = parse_args(args)?;
                to_value(commands::cart::add_to_cart(&self.cart, item_id))
            }
            "remove_from_cart" => {
                let ItemArgs { item_id } = parse_args(args)?;
                to_value(commands::cart::remove_from_cart(&self.cart, item_id))
            }
            "clear_cart" => to_value(commands::cart::clear_cart(&self.cart)),
            // Navigation commands
            "list_routes" => to_value(commands::navigation::list_routes(&self.navigation)),
            "navigate" => {
                let PathArgs { path } = parse_args(args)?;
                to_value(commands::navigation::navigate(&self.navigation, path)?)
            }
            "current_route" => to_value(commands::navigation::current_route(&self.navigation)),
            // Config commands
            "get_config" => to_value(commands::config::get_config(&self.config)),
            other => Err(ApiError::unknown_command(other)),
        }
    }
}

/// Decodes command arguments. Missing args count as an empty object.
fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, ApiError> {
    let args = match args {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(args).map_err(|e| ApiError::validation(e.to_string()))
}

fn to_value<T: Serialize>(value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::internal(e.to_string()))
}

// =============================================================================
// Serve Loop
// =============================================================================

/// Reads requests from `reader` until EOF, writing events and responses to
/// `writer`.
///
/// Blank lines are skipped. A malformed line gets an error response; it
/// never ends the session.
pub async fn serve<R, W>(handler: &Handler, reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut events = handler
        .config
        .emit_cart_events
        .then(|| handler.cart.subscribe());

    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = handler.handle_line(line);

        if let Some(rx) = events.as_mut() {
            drain_events(rx, &mut writer).await?;
        }
        write_message(&mut writer, &response).await?;
        writer.flush().await?;
    }

    debug!("Input closed");
    Ok(())
}

async fn drain_events<W>(
    rx: &mut broadcast::Receiver<CartNotification>,
    writer: &mut W,
) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    loop {
        match rx.try_recv() {
            Ok(notification) => {
                let message = EventMessage {
                    event: CART_CHANGED_EVENT,
                    payload: notification,
                };
                write_message(writer, &message).await?;
            }
            Err(TryRecvError::Lagged(skipped)) => {
                warn!(skipped, "Cart events dropped, frontend should refetch the cart");
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return Ok(()),
        }
    }
}

async fn write_message<W, T>(writer: &mut W, message: &T) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let mut text = serde_json::to_string(message)?;
    text.push('\n');
    writer.write_all(text.as_bytes()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::Navigator;
    use lesson_core::RouteTable;
    use serde_json::json;

    fn handler_with(config: ConfigState) -> Handler {
        let navigator = Navigator::new(
            RouteTable::storefront(),
            config.base_path.clone(),
            config.routes_case_sensitive,
        );
        Handler::new(CartState::new(), NavigationState::new(navigator), config)
    }

    fn handler() -> Handler {
        handler_with(ConfigState::default())
    }

    fn call(handler: &Handler, request: Value) -> Value {
        serde_json::to_value(handler.handle_line(&request.to_string())).unwrap()
    }

    async fn run_session(handler: &Handler, input: &str) -> Vec<Value> {
        let mut output = Vec::new();
        serve(handler, input.as_bytes(), &mut output).await.unwrap();
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_add_and_query_quantity() {
        let h = handler();
        let resp = call(&h, json!({"id": 1, "cmd": "add_to_cart", "args": {"itemId": "lesson-1"}}));
        assert_eq!(resp["id"], 1);
        assert_eq!(resp["ok"]["lines"][0]["itemId"], "lesson-1");
        assert_eq!(resp["ok"]["lines"][0]["quantity"], 1);

        let resp = call(&h, json!({"id": 2, "cmd": "cart_quantity", "args": {"itemId": "lesson-1"}}));
        assert_eq!(resp["ok"]["quantity"], 1);

        let resp = call(&h, json!({"cmd": "cart_quantity", "args": {"itemId": "never-added"}}));
        assert_eq!(resp["ok"]["quantity"], 0);
        assert!(resp.get("id").is_none());
    }

    #[test]
    fn test_numeric_item_ids_accepted() {
        let h = handler();
        call(&h, json!({"cmd": "add_to_cart", "args": {"itemId": 5}}));
        let resp = call(&h, json!({"cmd": "cart_quantity", "args": {"itemId": "5"}}));
        assert_eq!(resp["ok"]["quantity"], 1);
        assert_eq!(resp["ok"]["itemId"], "5");
    }

    #[test]
    fn test_malformed_item_ids_rejected() {
        let h = handler();
        for bad in [json!(null), json!(""), json!(true), json!(-3), json!({"x": 1})] {
            let resp = call(&h, json!({"cmd": "add_to_cart", "args": {"itemId": bad}}));
            assert_eq!(resp["error"]["code"], "VALIDATION_ERROR", "itemId {bad}");
        }

        let resp = call(&h, json!({"cmd": "add_to_cart"}));
        assert_eq!(resp["error"]["code"], "VALIDATION_ERROR");

        // Nothing reached the cart.
        assert_eq!(h.cart().with_cart(|c| c.sequence()), 0);
    }

    #[test]
    fn test_unknown_command_and_bad_json() {
        let h = handler();
        let resp = call(&h, json!({"id": "a", "cmd": "checkout_now"}));
        assert_eq!(resp["id"], "a");
        assert_eq!(resp["error"]["code"], "UNKNOWN_COMMAND");

        let resp = serde_json::to_value(h.handle_line("{not json")).unwrap();
        assert_eq!(resp["error"]["code"], "BAD_REQUEST");
    }

    #[test]
    fn test_navigation_commands() {
        let h = handler();
        let resp = call(&h, json!({"cmd": "navigate", "args": {"path": "/Checkout"}}));
        assert_eq!(resp["ok"]["page"], "checkout");
        assert_eq!(resp["ok"]["component"], "Checkout");

        let resp = call(&h, json!({"cmd": "navigate", "args": {"path": "/classes"}}));
        assert_eq!(resp["ok"]["page"], "classes");

        let resp = call(&h, json!({"cmd": "navigate", "args": {"path": "/admin"}}));
        assert_eq!(resp["error"]["code"], "NOT_FOUND");

        let resp = call(&h, json!({"cmd": "current_route"}));
        assert_eq!(resp["ok"]["name"], "classes");

        let resp = call(&h, json!({"cmd": "list_routes"}));
        assert_eq!(resp["ok"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_get_config() {
        let h = handler();
        let resp = call(&h, json!({"cmd": "get_config"}));
        assert_eq!(resp["ok"]["storeName"], "Lesson Store");
    }

    #[tokio::test]
    async fn test_session_writes_events_before_responses() {
        let h = handler();
        let input = concat!(
            "{\"id\":1,\"cmd\":\"add_to_cart\",\"args\":{\"itemId\":\"lesson-1\"}}\n",
            "\n",
            "{\"id\":2,\"cmd\":\"remove_from_cart\",\"args\":{\"itemId\":\"lesson-9\"}}\n",
            "{\"id\":3,\"cmd\":\"clear_cart\"}\n",
        );

        let out = run_session(&h, input).await;
        assert_eq!(out.len(), 5);

        assert_eq!(out[0]["event"], CART_CHANGED_EVENT);
        assert_eq!(out[0]["payload"]["event"]["sequence"], 1);
        assert_eq!(out[0]["payload"]["cart"]["totalQuantity"], 1);
        assert_eq!(out[1]["id"], 1);

        // Removing an absent item changes nothing, so no event precedes it.
        assert_eq!(out[2]["id"], 2);
        assert_eq!(out[2]["ok"]["totalQuantity"], 1);

        assert_eq!(out[3]["payload"]["event"]["change"]["kind"], "cleared");
        assert_eq!(out[4]["id"], 3);
        assert_eq!(out[4]["ok"]["distinctItems"], 0);
    }

    #[tokio::test]
    async fn test_session_without_events() {
        let h = handler_with(ConfigState {
            emit_cart_events: false,
            ..ConfigState::default()
        });
        let input = "{\"id\":1,\"cmd\":\"add_to_cart\",\"args\":{\"itemId\":\"lesson-1\"}}\n";

        let out = run_session(&h, input).await;
        assert_eq!(out.len(), 1);
        assert_eq!(out[0]["id"], 1);
    }

    #[tokio::test]
    async fn test_session_survives_bad_lines() {
        let h = handler();
        let input = "garbage\n{\"id\":2,\"cmd\":\"get_cart\"}\n";

        let out = run_session(&h, input).await;
        assert_eq!(out.len(), 2);
        assert_eq!(out[0]["error"]["code"], "BAD_REQUEST");
        assert_eq!(out[1]["id"], 2);
    }
}
