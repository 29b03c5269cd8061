//! Prompt templates for Socratic interview generation.
//!
//! Both builders are pure: the same input always yields byte-identical
//! messages, and field contents are interpolated verbatim.

use crate::llm::Message;

use super::catalog::Scenario;

/// System prompt establishing the Socratic interviewer persona.
pub const SINGLE_TURN_SYSTEM_PROMPT: &str = r#"You are a Senior Technical Interviewer who uses the Socratic method.

Your role:
- NEVER give direct answers or solutions
- Ask guiding questions that help candidates discover the answer themselves
- Be encouraging and professional
- Keep responses concise (2-3 sentences max)
- Reference their specific situation or misconception

Example Socratic Responses:
- "That's an interesting point. What do you think happens when you need to update multiple components at once?"
- "Let me ask you this: what would happen if React modified the DOM directly on every state change?"
- "Good question. Can you think of a scenario where that approach might cause problems?"

DO NOT:
- Give definitions or explanations directly
- Use phrases like "The answer is..." or "Here's what you need to know..."
- Be condescending or overly simplistic"#;

/// System prompt for simulating a whole interview dialogue.
pub const MULTI_TURN_SYSTEM_PROMPT: &str = r#"You are a Senior Technical Interviewer using the Socratic method.

Generate a realistic multi-turn interview conversation where:
1. Candidate starts with a question or misconception
2. You ask guiding questions (never give direct answers)
3. Candidate responds with partial understanding
4. You ask follow-up questions to deepen understanding
5. Conversation ends with candidate having an "aha" moment

Keep each turn concise. Focus on discovery through questioning."#;

/// A system instruction plus the derived user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

impl PromptPair {
    /// Converts into the message list sent to the model, system first.
    pub fn into_messages(self) -> Vec<Message> {
        vec![Message::system(self.system), Message::user(self.user)]
    }
}

/// Builds the prompt asking for one Socratic reply to a scenario.
pub fn build_single_turn_prompt(scenario: &Scenario) -> PromptPair {
    let user = format!(
        r#"Topic: {topic}
Context: {context}

The candidate says: "{stimulus}"

Generate a Socratic response that helps them discover the correct understanding WITHOUT telling them the answer directly."#,
        topic = scenario.topic,
        context = scenario.context,
        stimulus = scenario.stimulus.text(),
    );

    PromptPair {
        system: SINGLE_TURN_SYSTEM_PROMPT.to_string(),
        user,
    }
}

/// Builds the prompt asking for a whole `turns`-turn dialogue about `topic`.
pub fn build_multi_turn_prompt(topic: &str, turns: u32) -> PromptPair {
    let user = format!(
        r#"Generate a {turns}-turn Socratic interview conversation about: {topic}

Format as a realistic dialogue where the interviewer guides the candidate to understanding through questions.

Output as JSON with this structure:
{{
  "conversations": [
    {{"from": "human", "value": "..."}},
    {{"from": "gpt", "value": "..."}},
    {{"from": "human", "value": "..."}},
    {{"from": "gpt", "value": "..."}}
  ]
}}

IMPORTANT: Output ONLY the JSON, no markdown or explanations."#
    );

    PromptPair {
        system: MULTI_TURN_SYSTEM_PROMPT.to_string(),
        user,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::socratic::catalog::{scenarios, DEFAULT_MULTI_TURN_TURNS};

    #[test]
    fn test_single_turn_prompt_interpolates_fields() {
        let scenario = Scenario::misconception(
            "Hoisting",
            "Variables are created when the code runs.",
            "Var hoisting behavior",
        );
        let prompt = build_single_turn_prompt(&scenario);

        assert_eq!(prompt.system, SINGLE_TURN_SYSTEM_PROMPT);
        assert!(prompt.user.starts_with("Topic: Hoisting\nContext: Var hoisting behavior\n"));
        assert!(prompt
            .user
            .contains("The candidate says: \"Variables are created when the code runs.\""));
        assert!(prompt.user.ends_with("WITHOUT telling them the answer directly."));
    }

    #[test]
    fn test_single_turn_prompt_is_deterministic() {
        for scenario in scenarios() {
            assert_eq!(
                build_single_turn_prompt(&scenario),
                build_single_turn_prompt(&scenario)
            );
        }
    }

    #[test]
    fn test_fields_are_not_reinterpolated() {
        let scenario = Scenario::question("{context} topic", "What is {context}?", "ctx");
        let prompt = build_single_turn_prompt(&scenario);
        assert!(prompt.user.starts_with("Topic: {context} topic\nContext: ctx\n"));
        assert!(prompt.user.contains("\"What is {context}?\""));
    }

    #[test]
    fn test_multi_turn_topic_with_braces_is_verbatim() {
        let prompt = build_multi_turn_prompt("Parsing {turns} in {{templates}}", 4);
        let first_line = prompt.user.lines().next().unwrap_or_default();
        assert_eq!(
            first_line,
            "Generate a 4-turn Socratic interview conversation about: Parsing {turns} in {{templates}}"
        );
        assert!(prompt
            .user
            .contains("Output as JSON with this structure:\n{\n  \"conversations\": ["));
    }

    #[test]
    fn test_multi_turn_prompt() {
        let prompt =
            build_multi_turn_prompt("Optimizing a slow SQL query", DEFAULT_MULTI_TURN_TURNS);

        assert_eq!(prompt.system, MULTI_TURN_SYSTEM_PROMPT);
        assert!(prompt.user.starts_with(
            "Generate a 3-turn Socratic interview conversation about: Optimizing a slow SQL query"
        ));
        assert!(prompt.user.contains("\"conversations\""));
        assert!(prompt.user.contains("{\"from\": \"human\", \"value\": \"...\"}"));
        assert!(prompt.user.ends_with("no markdown or explanations."));
        assert_eq!(prompt, build_multi_turn_prompt("Optimizing a slow SQL query", 3));
    }

    #[test]
    fn test_into_messages_order() {
        let messages = build_multi_turn_prompt("Writing testable code", 5).into_messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
        assert!(messages[1].content.contains("5-turn"));
    }
}
