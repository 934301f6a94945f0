//! Formats retrieved chunks into a system message for the chat model.

use crate::document::RetrievalResult;
use crate::message::ChatMessage;

/// Instruction block placed ahead of the numbered snippets. Tells the
/// model to use the snippets only when relevant, to say so when they are
/// not, and not to fabricate citations.
const KNOWLEDGE_PREAMBLE: &str =
    "Use the following retrieved knowledge when answering. If irrelevant, say so. \
     Cite snippets implicitly by content.";

/// Build the knowledge system message from retrieval results.
///
/// Returns `None` for an empty result list so no message is injected.
/// Snippets keep their input ordering (already sorted by score) and are
/// enumerated `【1】`, `【2】`, … separated by blank lines.
pub fn assemble_context(results: &[RetrievalResult]) -> Option<ChatMessage> {
    if results.is_empty() {
        return None;
    }

    let snippets = results
        .iter()
        .enumerate()
        .map(|(idx, result)| format!("【{}】 {}", idx + 1, result.text))
        .collect::<Vec<_>>()
        .join("\n\n");

    Some(ChatMessage::system(format!("{KNOWLEDGE_PREAMBLE}\n\n{snippets}")))
}

/// Prepend a knowledge message to an existing message list.
///
/// Existing system/persona messages are kept as-is behind the context
/// message, never replaced.
pub fn prepend_context(context: ChatMessage, messages: Vec<ChatMessage>) -> Vec<ChatMessage> {
    let mut augmented = Vec::with_capacity(messages.len() + 1);
    augmented.push(context);
    augmented.extend(messages);
    augmented
}
