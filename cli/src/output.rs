//! Console formatting for questions.

use colored::Colorize;
use queue_domain::Question;

/// One-line rendering: id, priority, status, content, and the response
/// indented underneath when present.
pub fn format_question(question: &Question) -> String {
    let status = if question.is_answered() {
        "answered".green()
    } else {
        "open".yellow()
    };
    let mut line = format!(
        "{}  p{:<3} {:<8} {}",
        question.id.to_string().dimmed(),
        question.priority,
        status,
        question.content
    );
    if let Some(response) = &question.response {
        line.push_str(&format!("\n      {} {}", "->".dimmed(), response));
    }
    line
}
