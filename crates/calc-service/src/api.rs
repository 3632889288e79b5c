//! Request and response types for the two calculator endpoints, and the
//! dispatcher that serves them.

use crate::actions;
use calc_eval::calculate_expression_with_limits;
use calc_types::{Limits, DIVISION_BY_ZERO_DISPLAY, ERROR_DISPLAY, SYNTAX_ERROR_DISPLAY};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Result text for an unrecognized action.
pub const INVALID_ACTION: &str = "Invalid action";
/// Result text for a body that is not a well-formed request.
pub const INVALID_REQUEST: &str = "Invalid request";

// ── Requests ─────────────────────────────────────────────────────────────

/// Body of the action endpoint. Missing fields default to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionRequest {
    pub action: Option<String>,
    #[serde(deserialize_with = "scalar_text")]
    pub expression: String,
    /// Value currently shown on the display. Numbers are accepted as well as
    /// strings.
    #[serde(deserialize_with = "scalar_text")]
    pub current_value: String,
}

/// Body of the direct-evaluation endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluateRequest {
    #[serde(deserialize_with = "scalar_text")]
    pub expression: String,
}

/// Accepts a string, a number (rendered as text) or null (empty).
fn scalar_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(text) => Ok(text),
        serde_json::Value::Number(number) => Ok(number.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number, got {other}"
        ))),
    }
}

// ── Responses ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    pub result: String,
    pub display: String,
}

impl ActionResponse {
    fn shown(result: String) -> Self {
        Self {
            success: true,
            display: result.clone(),
            result,
        }
    }

    fn failed(result: &str) -> Self {
        Self {
            success: false,
            result: result.to_string(),
            display: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluateResponse {
    pub success: bool,
    pub result: String,
}

impl EvaluateResponse {
    /// `success` is false exactly for the three generic failure displays.
    pub fn from_result(result: String) -> Self {
        let failed = [ERROR_DISPLAY, SYNTAX_ERROR_DISPLAY, DIVISION_BY_ZERO_DISPLAY]
            .contains(&result.as_str());
        Self {
            success: !failed,
            result,
        }
    }
}

// ── Actions ──────────────────────────────────────────────────────────────

/// A recognized keypad action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Calculate,
    Percentage,
    ToggleSign,
    Clear,
}

impl Action {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "calculate" => Some(Self::Calculate),
            "percentage" => Some(Self::Percentage),
            "toggle_sign" => Some(Self::ToggleSign),
            "clear" => Some(Self::Clear),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Calculate => write!(f, "calculate"),
            Self::Percentage => write!(f, "percentage"),
            Self::ToggleSign => write!(f, "toggle_sign"),
            Self::Clear => write!(f, "clear"),
        }
    }
}

// ── Dispatcher ───────────────────────────────────────────────────────────

/// Serves calculator requests under a fixed set of evaluation limits.
///
/// Stateless between calls: every request is answered from its own body.
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    limits: Limits,
}

impl Calculator {
    pub fn new(limits: Limits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Evaluates an expression to its display string.
    pub fn calculate(&self, expression: &str) -> String {
        calculate_expression_with_limits(expression, &self.limits)
    }

    /// Answers the action endpoint. Evaluation failures are still
    /// successful responses; only an unknown action fails.
    pub fn handle_action(&self, request: &ActionRequest) -> ActionResponse {
        let Some(action) = request.action.as_deref().and_then(Action::from_name) else {
            log::warn!("invalid action {:?}", request.action);
            return ActionResponse::failed(INVALID_ACTION);
        };
        log::debug!("dispatching {action}");
        let result = match action {
            Action::Calculate => self.calculate(&request.expression),
            Action::Percentage => actions::percentage(&request.current_value),
            Action::ToggleSign => actions::toggle_sign(&request.current_value),
            Action::Clear => "0".to_string(),
        };
        ActionResponse::shown(result)
    }

    /// Answers the direct-evaluation endpoint.
    pub fn handle_evaluate(&self, request: &EvaluateRequest) -> EvaluateResponse {
        log::debug!("evaluating {:?}", request.expression);
        EvaluateResponse::from_result(self.calculate(&request.expression))
    }

    /// Action endpoint over a raw JSON body.
    pub fn handle_action_json(&self, body: &str) -> String {
        let response = match serde_json::from_str::<ActionRequest>(body) {
            Ok(request) => self.handle_action(&request),
            Err(err) => {
                log::warn!("rejected action request: {err}");
                ActionResponse::failed(INVALID_REQUEST)
            }
        };
        to_json(&response)
    }

    /// Evaluate endpoint over a raw JSON body.
    pub fn handle_evaluate_json(&self, body: &str) -> String {
        let response = match serde_json::from_str::<EvaluateRequest>(body) {
            Ok(request) => self.handle_evaluate(&request),
            Err(err) => {
                log::warn!("rejected evaluate request: {err}");
                EvaluateResponse {
                    success: false,
                    result: INVALID_REQUEST.to_string(),
                }
            }
        };
        to_json(&response)
    }
}

fn to_json<T: Serialize>(response: &T) -> String {
    serde_json::to_string(response).unwrap_or_else(|e| {
        format!(
            r#"{{"success":false,"result":"Serialization error: {}"}}"#,
            e
        )
    })
}
