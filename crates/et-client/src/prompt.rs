//! Prompt builders for the two annotation strategies.
//!
//! Both strategies share one task description; they differ in what the
//! model is asked to return. The full-rewrite prompts ask for the whole
//! annotated document back. The edit-list prompts ask for ONLY a JSON
//! array of anchored edit operations that the local applier can replay.

/// Builds the prompt pair (system + user) for each strategy.
pub struct PromptBuilder {
    task: String,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new("add helpful section headings to the document")
    }
}

impl PromptBuilder {
    /// Builder for a custom task description.
    #[must_use]
    pub fn new(task: impl Into<String>) -> Self {
        Self { task: task.into() }
    }

    /// Task description this builder was created with.
    pub fn task(&self) -> &str {
        &self.task
    }

    /// System prompt for the full-rewrite strategy.
    pub fn full_rewrite_system(&self) -> String {
        format!(
            r#"You are an expert editor. Your task: {task}.

Analyze the text and insert appropriate section headings where logical sections begin.
Headings are concise (3-6 words) and reflect the content that follows.
Format each heading on its own line with markdown H2 style: ## Heading Text
Do not modify the original text except to add these headings.

Return the COMPLETE modified document and nothing else."#,
            task = self.task,
        )
    }

    /// User prompt for the full-rewrite strategy.
    pub fn full_rewrite_prompt(&self, text: &str) -> String {
        format!(
            "Please add appropriate section headings to this document:\n\n{text}"
        )
    }

    /// System prompt for the edit-list strategy.
    ///
    /// The contract here is what `et-core::parse` expects: a bare JSON
    /// array of edit records, no commentary.
    pub fn edit_list_system(&self) -> String {
        // The template quotes heading examples like "## Heading Text\n",
        // so the delimiter needs three hashes to survive the "##" runs.
        format!(
            r###"You are an expert editor. Your task: {task}.

Instead of rewriting the document, output a compact list of edit operations.

Return ONLY a JSON array. Each element is an object with exactly these fields:

- "anchor": 40-60 characters of verbatim text from the document that occurs
  exactly once and marks where the edit applies
- "kind": one of "insert_before", "insert_after", "replace"
- "text": the text to insert (use "insert_before" with a heading line such
  as "## Heading Text\n" to title the section that starts at the anchor)

RULES:
1. Anchors must be copied verbatim from the document, unique, never invented
2. Edits must not overlap one another
3. Use "## " for all headings (markdown H2 style)
4. No explanation or commentary - ONLY the JSON array"###,
            task = self.task,
        )
    }

    /// User prompt for the edit-list strategy.
    pub fn edit_list_prompt(&self, text: &str) -> String {
        format!(
            "Analyze this document and identify where headings should be added. \
             Return only the JSON array of edit operations:\n\n{text}"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompts_embed_the_document() {
        let builder = PromptBuilder::default();
        let doc = "Intro\nBody\nConclusion";
        assert!(builder.full_rewrite_prompt(doc).contains(doc));
        assert!(builder.edit_list_prompt(doc).contains(doc));
    }

    #[test]
    fn edit_system_states_the_record_contract() {
        let system = PromptBuilder::default().edit_list_system();
        assert!(system.contains("JSON array"));
        assert!(system.contains("\"anchor\""));
        assert!(system.contains("insert_before"));
        assert!(system.contains("insert_after"));
        assert!(system.contains("replace"));
        // The quoted heading examples must come through verbatim.
        assert!(system.contains("\"## Heading Text\\n\""));
        assert!(system.contains("Use \"## \" for all headings"));
        assert!(system.contains("ONLY the JSON array"));
        // No sed syntax, no code fences requested.
        assert!(!system.contains("s/"));
        assert!(!system.contains("```"));
    }

    #[test]
    fn custom_task_flows_into_both_systems() {
        let builder = PromptBuilder::new("translate headings to French");
        assert!(builder.full_rewrite_system().contains("translate headings"));
        assert!(builder.edit_list_system().contains("translate headings"));
    }
}
