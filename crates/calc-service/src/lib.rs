//! Request layer for the calculator.
//!
//! Two endpoints, both stateless:
//!
//! - **action**: `{action, expression, current_value}` answered with
//!   `{success, result, display}` for `calculate`, `percentage`,
//!   `toggle_sign` and `clear`.
//! - **evaluate**: `{expression}` answered with `{success, result}`.
//!
//! The `*_json` entry points take and return raw JSON bodies.

pub mod actions;
pub mod api;

pub use actions::{percentage, toggle_sign};
pub use api::{
    Action, ActionRequest, ActionResponse, Calculator, EvaluateRequest, EvaluateResponse,
    INVALID_ACTION, INVALID_REQUEST,
};

/// Action endpoint over a raw JSON body, with default limits.
pub fn handle_action_json(body: &str) -> String {
    Calculator::default().handle_action_json(body)
}

/// Evaluate endpoint over a raw JSON body, with default limits.
pub fn handle_evaluate_json(body: &str) -> String {
    Calculator::default().handle_evaluate_json(body)
}
