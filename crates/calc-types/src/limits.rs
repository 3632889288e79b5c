use serde::{Deserialize, Serialize};

/// Resource limits applied to a single evaluation.
///
/// Every limit is checked before the corresponding work happens, so a
/// pathological expression is rejected instead of exhausting stack or CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum expression length in characters (after normalization).
    pub max_input_len: usize,
    /// Maximum nesting depth: parentheses, unary chains and exponent chains.
    pub max_depth: u32,
    /// Largest integer (in bits) an intermediate result may reach.
    pub max_int_bits: u64,
    /// Evaluation steps allowed per expression.
    pub gas_limit: u64,
}

impl Limits {
    pub const DEFAULT_MAX_INPUT_LEN: usize = 1000;
    pub const DEFAULT_MAX_DEPTH: u32 = 64;
    pub const DEFAULT_MAX_INT_BITS: u64 = 1 << 20;
    pub const DEFAULT_GAS_LIMIT: u64 = 10_000;
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_input_len: Self::DEFAULT_MAX_INPUT_LEN,
            max_depth: Self::DEFAULT_MAX_DEPTH,
            max_int_bits: Self::DEFAULT_MAX_INT_BITS,
            gas_limit: Self::DEFAULT_GAS_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let limits: Limits = serde_json::from_str(r#"{"max_depth": 8}"#).unwrap();
        assert_eq!(limits.max_depth, 8);
        assert_eq!(limits.max_input_len, Limits::DEFAULT_MAX_INPUT_LEN);
        assert_eq!(limits.gas_limit, Limits::DEFAULT_GAS_LIMIT);
    }
}
