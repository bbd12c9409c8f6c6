use crate::hierarchy::Actor;

/// Build the audit-log reason attached to every moderation request.
///
/// A blank reason is treated as absent.
pub fn format_reason(actor: &Actor, reason: Option<&str>) -> String {
    match reason.map(str::trim).filter(|value| !value.is_empty()) {
        Some(reason) => format!(
            "Action done by {} (ID {}): {}",
            actor.display_name, actor.id, reason
        ),
        None => format!("Action done by {} (ID {})", actor.display_name, actor.id),
    }
}

/// Render permission names as a code block, one name per line.
///
/// An empty list renders as nothing rather than an empty block.
pub fn permissions_codeblock(names: &[String]) -> String {
    if names.is_empty() {
        return String::new();
    }
    format!("```{}```", names.join("\n"))
}

/// Prefix a command's usage line for a reply.
pub fn usage_message(usage: &str) -> String {
    format!("Usage: `{usage}`")
}
