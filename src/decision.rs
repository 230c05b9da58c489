use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

const FALLBACK_REASON: &str = "blocked by hook";

/// The verdict written back to the host. Only deny is ever emitted;
/// staying silent means allow.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Deny,
}

/// Output JSON for a PreToolUse hook that blocks the pending tool call
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Decision {
    pub decision: Verdict,
    pub reason: String,
}

impl Decision {
    /// Deny with the given reason. A blank reason is replaced, the host
    /// always gets something to show.
    pub fn deny(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        let reason = if reason.trim().is_empty() {
            FALLBACK_REASON.to_string()
        } else {
            reason
        };
        Self {
            decision: Verdict::Deny,
            reason,
        }
    }

    /// Write as a single JSON line.
    pub fn write_line<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        let line = serde_json::to_string(self).context("serialize decision")?;
        writeln!(out, "{}", line).context("write decision")?;
        out.flush().context("flush decision")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deny_serializes_in_order() {
        let mut out = Vec::new();
        Decision::deny("destructive tool")
            .write_line(&mut out)
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"decision\":\"deny\",\"reason\":\"destructive tool\"}\n"
        );
    }

    #[test]
    fn test_blank_reason_replaced() {
        assert_eq!(Decision::deny("").reason, FALLBACK_REASON);
        assert_eq!(Decision::deny("   ").reason, FALLBACK_REASON);
    }

    #[test]
    fn test_reason_is_json_escaped() {
        let mut out = Vec::new();
        Decision::deny(r#"refusing "rm -rf /""#)
            .write_line(&mut out)
            .unwrap();
        let line = String::from_utf8(out).unwrap();
        assert_eq!(line.lines().count(), 1);
        let value: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(value["decision"], "deny");
        assert_eq!(value["reason"], r#"refusing "rm -rf /""#);
    }
}
