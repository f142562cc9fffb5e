//! Decides whether a program may be sent on for execution.

use serde::{Deserialize, Serialize};

use precheck_engine::Report;

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum GatePolicy {
    /// Only errors block; warnings are shown but the program still runs.
    #[default]
    ErrorsOnly,
    /// Any diagnostic at all blocks.
    AnyDiagnostic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow {
        warnings: usize,
    },
    Block {
        /// The first aggregated message, shown in place of running the code.
        first_feedback: String,
        errors: usize,
        warnings: usize,
    },
}

impl GateDecision {
    pub fn is_blocked(&self) -> bool {
        matches!(self, GateDecision::Block { .. })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Gate {
    policy: GatePolicy,
}

impl Gate {
    pub fn new(policy: GatePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> GatePolicy {
        self.policy
    }

    pub fn decide(&self, report: &Report) -> GateDecision {
        let errors = report.error_count();
        let warnings = report.warning_count();

        let blocked = match self.policy {
            GatePolicy::ErrorsOnly => errors > 0,
            GatePolicy::AnyDiagnostic => !report.is_clean(),
        };

        if !blocked {
            return GateDecision::Allow { warnings };
        }

        let first_feedback = report.messages().into_iter().next().unwrap_or_default();
        log::debug!("Submission blocked ({errors} error(s), {warnings} warning(s))");
        GateDecision::Block {
            first_feedback,
            errors,
            warnings,
        }
    }
}
