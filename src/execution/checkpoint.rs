//! Checkpoint Snapshot
//!
//! A checkpoint is the pair (step id, context values) sufficient to resume
//! a run. The engine only holds it in memory; persisting it across process
//! boundaries is the host's job. The type derives serde traits so a host
//! can round-trip it through `serde_json` (or any serde format) unchanged.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A resumable execution snapshot.
///
/// Typically captured after a failed or paused run: the failing step's id
/// together with the context values the earlier steps produced. Feeding it
/// back through [`Machine::restore`](crate::Machine::restore) primes the
/// machine to continue from that step.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Checkpoint {
    /// Id of the step the next run should begin at.
    pub step_id: String,

    /// Context snapshot covering everything the skipped steps produced.
    pub values: HashMap<String, Value>,
}

impl Checkpoint {
    /// Creates a checkpoint from a step id and a context snapshot.
    pub fn new(step_id: impl Into<String>, values: HashMap<String, Value>) -> Self {
        Self {
            step_id: step_id.into(),
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_checkpoint_creation() {
        let mut values = HashMap::new();
        values.insert("result".to_string(), json!(4));

        let checkpoint = Checkpoint::new("validate", values);
        assert_eq!(checkpoint.step_id, "validate");
        assert_eq!(checkpoint.values.get("result"), Some(&json!(4)));
    }

    #[test]
    fn test_checkpoint_serialization_roundtrip() {
        let mut values = HashMap::new();
        values.insert("result".to_string(), json!(4));
        values.insert("verified".to_string(), json!(false));

        let checkpoint = Checkpoint::new("persist", values);

        let encoded = serde_json::to_string_pretty(&checkpoint).unwrap();
        let decoded: Checkpoint = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded, checkpoint);
    }

    #[test]
    fn test_checkpoint_empty_values() {
        let checkpoint = Checkpoint::new("start", HashMap::new());

        let encoded = serde_json::to_string(&checkpoint).unwrap();
        let decoded: Checkpoint = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded.step_id, "start");
        assert!(decoded.values.is_empty());
    }
}
