use crate::config::{Rule, When};
use std::collections::HashMap;
use std::sync::LazyLock;

fn rule(name: &str, tool_name: &str, input_contains: Option<&str>, reason: &str) -> Rule {
    Rule {
        name: name.to_string(),
        when: When {
            tool_name: tool_name.to_string(),
            input_field: None,
            input_contains: input_contains.map(String::from),
        },
        reason: Some(reason.to_string()),
    }
}

/// Like `rule`, but only searches one string field of tool_input
fn field_rule(name: &str, tool_name: &str, field: &str, needle: &str, reason: &str) -> Rule {
    let mut rule = rule(name, tool_name, Some(needle), reason);
    rule.when.input_field = Some(field.to_string());
    rule
}

/// Built-in presets that can be referenced in hook-rules.yaml via `presets: ["name"]`
pub static PRESETS: LazyLock<HashMap<&'static str, Vec<Rule>>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    m.insert(
        "destructive",
        vec![
            rule(
                "destructive-delete-tools",
                "*delete*",
                None,
                "Deleting through tools is disabled by the destructive preset",
            ),
            rule(
                "destructive-remove-tools",
                "*remove*",
                None,
                "Removing through tools is disabled by the destructive preset",
            ),
            rule(
                "destructive-rm-rf",
                "Bash",
                Some("rm -rf"),
                "Recursive force delete is disabled by the destructive preset",
            ),
            rule(
                "destructive-force-push",
                "Bash",
                Some("push --force"),
                "Force pushing is disabled by the destructive preset",
            ),
        ],
    );

    m.insert(
        "secrets",
        vec![
            // `.env` only as a path segment: os.environ or process.env stay allowed
            field_rule(
                "secrets-dotenv-file",
                "*",
                "file_path",
                "/.env",
                "Touching .env files is disabled by the secrets preset",
            ),
            field_rule(
                "secrets-dotenv-shell",
                "Bash",
                "command",
                " .env",
                "Touching .env files is disabled by the secrets preset",
            ),
            field_rule(
                "secrets-dotenv-shell-path",
                "Bash",
                "command",
                "/.env",
                "Touching .env files is disabled by the secrets preset",
            ),
            rule(
                "secrets-ssh-keys",
                "*",
                Some(".ssh/id_"),
                "Touching SSH private keys is disabled by the secrets preset",
            ),
        ],
    );

    m
});
