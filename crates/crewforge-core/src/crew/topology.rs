use crate::constants::process;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionTopology {
    /// Tasks run strictly in declared order.
    #[default]
    Sequential,
    /// A manager coordinates the crew and owns the final answer.
    Hierarchical,
}

impl ExecutionTopology {
    /// Map a plan's `process` field. Only a case-insensitive
    /// `"hierarchical"` selects [`Hierarchical`](Self::Hierarchical).
    pub fn select(process_field: Option<&str>) -> Self {
        match process_field {
            Some(p) if p.eq_ignore_ascii_case(process::HIERARCHICAL) => Self::Hierarchical,
            _ => Self::Sequential,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sequential => process::SEQUENTIAL,
            Self::Hierarchical => process::HIERARCHICAL,
        }
    }
}

impl fmt::Display for ExecutionTopology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
