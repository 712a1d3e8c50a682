//! The utility service: echo, arithmetic, string concatenation and a
//! per-connection shopping cart, served over the same framing and loop as
//! hangman.

use crate::error::UtilityError;
use crate::network::{Reply, Service};
use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use shared::envelope::{as_i64, request_type, require_array, require_i64, require_str};
use shared::{Envelope, ProtocolError, Response};
use std::collections::BTreeMap;

/// Item name to quantity held. Quantities are always positive.
pub type Cart = BTreeMap<String, u64>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub item: String,
    pub quantity: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartView {
    pub action: String,
    #[serde(rename = "itemCount", default, skip_serializing_if = "Option::is_none")]
    pub item_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<CartItem>>,
}

/// Utility response bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UtilityPayload {
    Echo { echo: String },
    Number { result: i64 },
    Text { result: String },
    Cart(CartView),
    Empty {},
}

impl Default for UtilityPayload {
    fn default() -> Self {
        UtilityPayload::Empty {}
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CartAction {
    Add,
    Remove,
    List,
    Clear,
}

impl CartAction {
    fn parse(action: &str) -> Result<Self, UtilityError> {
        match action {
            "add" => Ok(CartAction::Add),
            "remove" => Ok(CartAction::Remove),
            "list" => Ok(CartAction::List),
            "clear" => Ok(CartAction::Clear),
            other => Err(UtilityError::UnknownAction(other.to_string())),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            CartAction::Add => "add",
            CartAction::Remove => "remove",
            CartAction::List => "list",
            CartAction::Clear => "clear",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum UtilityRequest {
    Echo { data: String },
    Add { num1: i64, num2: i64 },
    AddMany { nums: Vec<i64> },
    Concat { string1: String, string2: String },
    Cart { action: CartAction, item: Option<(String, u64)> },
    Quit,
}

impl UtilityRequest {
    fn from_envelope(envelope: &Envelope) -> Result<Self, UtilityError> {
        let kind = request_type(envelope)?;

        let request = match kind.to_ascii_lowercase().as_str() {
            "echo" => UtilityRequest::Echo {
                data: require_str(envelope, "data")?.to_string(),
            },
            "add" => UtilityRequest::Add {
                num1: require_i64(envelope, "num1")?,
                num2: require_i64(envelope, "num2")?,
            },
            "addmany" => {
                let values = require_array(envelope, "nums")?;
                if values.is_empty() {
                    return Err(UtilityError::EmptyNums);
                }
                let nums = values
                    .iter()
                    .map(as_i64)
                    .collect::<Option<Vec<_>>>()
                    .ok_or(UtilityError::NonIntegerNums)?;
                UtilityRequest::AddMany { nums }
            }
            "stringconcatenation" => UtilityRequest::Concat {
                string1: require_str(envelope, "string1")?.to_string(),
                string2: require_str(envelope, "string2")?.to_string(),
            },
            "cart" => {
                let action = CartAction::parse(require_str(envelope, "action")?)?;
                let item = match action {
                    CartAction::Add | CartAction::Remove => {
                        let item = require_str(envelope, "item")?.to_string();
                        let quantity = require_i64(envelope, "quantity")?;
                        if quantity <= 0 {
                            return Err(UtilityError::NonPositiveQuantity);
                        }
                        Some((item, quantity as u64))
                    }
                    CartAction::List | CartAction::Clear => None,
                };
                UtilityRequest::Cart { action, item }
            }
            "quit" => UtilityRequest::Quit,
            _ => return Err(ProtocolError::UnsupportedType(kind.to_string()).into()),
        };

        Ok(request)
    }
}

type UtilityResult = Result<Response<UtilityPayload>, UtilityError>;

#[derive(Debug, Default, Clone, Copy)]
pub struct UtilityService;

impl UtilityService {
    pub fn new() -> Self {
        Self
    }
}

fn handle_request(cart: &mut Cart, request: UtilityRequest) -> UtilityResult {
    match request {
        UtilityRequest::Echo { data } => Ok(Response::success(
            "echo",
            "Echo complete",
            UtilityPayload::Echo {
                echo: format!("Here is your echo: {}", data),
            },
        )),
        UtilityRequest::Add { num1, num2 } => {
            let result = num1.checked_add(num2).ok_or(UtilityError::Overflow)?;
            Ok(Response::success("add", "Sum computed", UtilityPayload::Number { result }))
        }
        UtilityRequest::AddMany { nums } => {
            let result = nums
                .iter()
                .try_fold(0i64, |sum, n| sum.checked_add(*n))
                .ok_or(UtilityError::Overflow)?;
            Ok(Response::success("addmany", "Sum computed", UtilityPayload::Number { result }))
        }
        UtilityRequest::Concat { string1, string2 } => Ok(Response::success(
            "stringconcatenation",
            "Strings joined",
            UtilityPayload::Text {
                result: string1 + &string2,
            },
        )),
        UtilityRequest::Cart { action, item } => handle_cart(cart, action, item),
        UtilityRequest::Quit => Ok(Response::success("quit", "Goodbye!", UtilityPayload::default())),
    }
}

/// Sum of all quantities. Adds are rejected before this can overflow.
fn item_count(cart: &Cart) -> Result<u64, UtilityError> {
    cart.values()
        .try_fold(0u64, |sum, quantity| sum.checked_add(*quantity))
        .ok_or(UtilityError::Overflow)
}

fn handle_cart(cart: &mut Cart, action: CartAction, item: Option<(String, u64)>) -> UtilityResult {
    let mut view = CartView {
        action: action.as_str().to_string(),
        item_count: None,
        items: None,
    };

    let message = match (action, item) {
        (CartAction::Add, Some((item, quantity))) => {
            let total = item_count(cart)?
                .checked_add(quantity)
                .ok_or(UtilityError::Overflow)?;
            let held = cart.get(&item).copied().unwrap_or(0);
            let updated = held.checked_add(quantity).ok_or(UtilityError::Overflow)?;
            cart.insert(item.clone(), updated);
            view.item_count = Some(total);
            format!("Added {} {}(s) to cart", quantity, item)
        }
        (CartAction::Remove, Some((item, quantity))) => {
            let held = *cart
                .get(&item)
                .ok_or_else(|| UtilityError::ItemNotFound(item.clone()))?;
            if quantity > held {
                return Err(UtilityError::NotEnoughItems {
                    item,
                    requested: quantity,
                    held,
                });
            }
            if quantity == held {
                cart.remove(&item);
            } else {
                cart.insert(item.clone(), held - quantity);
            }
            view.item_count = Some(item_count(cart)?);
            format!("Removed {} {}(s) from cart", quantity, item)
        }
        (CartAction::List, _) => {
            let items = cart
                .iter()
                .map(|(item, quantity)| CartItem {
                    item: item.clone(),
                    quantity: *quantity,
                })
                .collect();
            view.items = Some(items);
            view.item_count = Some(item_count(cart)?);
            format!("Cart holds {} item(s)", item_count(cart)?)
        }
        (CartAction::Clear, _) => {
            cart.clear();
            "Cart cleared".to_string()
        }
        // add and remove always carry an item once decoded
        (_, None) => return Err(UtilityError::UnknownAction(action.as_str().to_string())),
    };

    Ok(Response::success("cart", message, UtilityPayload::Cart(view)))
}

#[async_trait]
impl Service for UtilityService {
    type Session = Cart;
    type Payload = UtilityPayload;

    fn name(&self) -> &'static str {
        "utility"
    }

    async fn handle(&self, cart: &mut Self::Session, envelope: Envelope) -> Reply<Self::Payload> {
        let request = match UtilityRequest::from_envelope(&envelope) {
            Ok(request) => request,
            Err(e) => {
                debug!("Rejected utility request: {}", e);
                return Reply::respond(Response::error(e.to_string()));
            }
        };

        let quit = request == UtilityRequest::Quit;
        let response = handle_request(cart, request).unwrap_or_else(|e| {
            debug!("Utility request failed: {}", e);
            Response::error(e.to_string())
        });

        if quit {
            Reply::close(response)
        } else {
            Reply::respond(response)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    async fn ask(cart: &mut Cart, request: Value) -> Value {
        let envelope = match request {
            Value::Object(map) => map,
            other => panic!("not an object: {}", other),
        };
        let reply = UtilityService::new().handle(cart, envelope).await;
        serde_json::to_value(&reply.response).unwrap()
    }

    #[tokio::test]
    async fn test_echo() {
        let response = ask(&mut Cart::new(), json!({"type": "echo", "data": "hi"})).await;
        assert_eq!(response["ok"], true);
        assert_eq!(response["type"], "echo");
        assert_eq!(response["echo"], "Here is your echo: hi");

        let response = ask(&mut Cart::new(), json!({"type": "echo", "data": 3})).await;
        assert_eq!(response["message"], "Field 'data' needs to be of type: String");
    }

    #[tokio::test]
    async fn test_add_coerces_numeric_strings() {
        let response = ask(&mut Cart::new(), json!({"type": "add", "num1": "4", "num2": 5})).await;
        assert_eq!(response["result"], 9);

        let response = ask(&mut Cart::new(), json!({"type": "add", "num1": "four", "num2": 5})).await;
        assert_eq!(response["message"], "Field 'num1' needs to be of type: int");

        let response = ask(&mut Cart::new(), json!({"type": "add", "num1": 1})).await;
        assert_eq!(response["message"], "Field 'num2' does not exist in request");
    }

    #[tokio::test]
    async fn test_add_overflow_is_an_error() {
        let response = ask(&mut Cart::new(), json!({"type": "add", "num1": i64::MAX, "num2": 1})).await;
        assert_eq!(response["ok"], false);
    }

    #[tokio::test]
    async fn test_addmany() {
        let response = ask(&mut Cart::new(), json!({"type": "addmany", "nums": [1, 2, "3"]})).await;
        assert_eq!(response["result"], 6);

        let response = ask(&mut Cart::new(), json!({"type": "addmany", "nums": []})).await;
        assert_eq!(response["message"], "Array 'nums' cannot be empty");

        let response = ask(&mut Cart::new(), json!({"type": "addmany", "nums": [1, true]})).await;
        assert_eq!(response["message"], "Values in array need to be ints");

        let response = ask(&mut Cart::new(), json!({"type": "addmany", "nums": 4})).await;
        assert_eq!(response["message"], "Field 'nums' needs to be of type: Array");
    }

    #[tokio::test]
    async fn test_string_concatenation() {
        let response = ask(
            &mut Cart::new(),
            json!({"type": "stringconcatenation", "string1": "foo", "string2": "bar"}),
        )
        .await;
        assert_eq!(response["result"], "foobar");
    }

    #[tokio::test]
    async fn test_cart_lifecycle() {
        let mut cart = Cart::new();

        let response = ask(&mut cart, json!({"type": "cart", "action": "add", "item": "apple", "quantity": 3})).await;
        assert_eq!(response["message"], "Added 3 apple(s) to cart");
        assert_eq!(response["itemCount"], 3);

        ask(&mut cart, json!({"type": "cart", "action": "add", "item": "pear", "quantity": "2"})).await;
        let response = ask(&mut cart, json!({"type": "cart", "action": "remove", "item": "apple", "quantity": 1})).await;
        assert_eq!(response["message"], "Removed 1 apple(s) from cart");
        assert_eq!(response["itemCount"], 4);

        let response = ask(&mut cart, json!({"type": "cart", "action": "list"})).await;
        assert_eq!(
            response["items"],
            json!([{"item": "apple", "quantity": 2}, {"item": "pear", "quantity": 2}])
        );
        assert_eq!(response["action"], "list");

        let response = ask(&mut cart, json!({"type": "cart", "action": "clear"})).await;
        assert_eq!(response["message"], "Cart cleared");
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_cart_errors() {
        let mut cart = Cart::new();
        ask(&mut cart, json!({"type": "cart", "action": "add", "item": "apple", "quantity": 1})).await;

        let response = ask(&mut cart, json!({"type": "cart", "action": "remove", "item": "kiwi", "quantity": 1})).await;
        assert_eq!(response["message"], "Item 'kiwi' not found in cart");

        let response = ask(&mut cart, json!({"type": "cart", "action": "remove", "item": "apple", "quantity": 5})).await;
        assert_eq!(response["message"], "Cannot remove 5 apple(s), only 1 in cart");
        assert_eq!(cart.get("apple"), Some(&1));

        let response = ask(&mut cart, json!({"type": "cart", "action": "add", "item": "apple", "quantity": 0})).await;
        assert_eq!(response["message"], "Field 'quantity' must be a positive integer");

        let response = ask(&mut cart, json!({"type": "cart", "action": "buy"})).await;
        assert_eq!(response["message"], "Action 'buy' is not supported for type 'cart'.");
    }

    #[tokio::test]
    async fn test_cart_overflow_is_rejected() {
        let mut cart = Cart::new();
        let add = json!({"type": "cart", "action": "add", "item": "x", "quantity": i64::MAX});

        ask(&mut cart, add.clone()).await;
        let response = ask(&mut cart, add.clone()).await;
        assert_eq!(response["itemCount"], json!(u64::MAX - 1));

        let response = ask(&mut cart, add).await;
        assert_eq!(response["ok"], false);
        assert_eq!(response["message"], "Result does not fit in a 64-bit integer");
        assert_eq!(cart.get("x"), Some(&(u64::MAX - 1)));

        // A different item still counts toward the same total
        let response = ask(&mut cart, json!({"type": "cart", "action": "add", "item": "y", "quantity": 2})).await;
        assert_eq!(response["ok"], false);
        assert!(!cart.contains_key("y"));

        let response = ask(&mut cart, json!({"type": "cart", "action": "list"})).await;
        assert_eq!(response["ok"], true);
    }

    #[tokio::test]
    async fn test_removing_everything_drops_item() {
        let mut cart = Cart::new();
        ask(&mut cart, json!({"type": "cart", "action": "add", "item": "apple", "quantity": 2})).await;
        ask(&mut cart, json!({"type": "cart", "action": "remove", "item": "apple", "quantity": 2})).await;
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_type_and_quit() {
        let response = ask(&mut Cart::new(), json!({"type": "stats"})).await;
        assert_eq!(response["message"], "Type 'stats' is not supported");

        let envelope = match json!({"type": "quit"}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        let reply = UtilityService::new().handle(&mut Cart::new(), envelope).await;
        assert!(reply.close);
    }
}
