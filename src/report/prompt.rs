//! Skill-analysis prompt synthesis.
//!
//! Embeds a rendered checkpoint verbatim into an instructional template
//! asking a downstream agent to mine it for reusable workflow patterns.
//! Producing the text is the whole job; persisting it is the caller's.

/// Skills that already exist, referenced so the analyzing agent can
/// flag matches instead of proposing duplicates.
pub const KNOWN_SKILLS: &[&str] = &[
    "startproject",
    "team-implement",
    "team-review",
    "plan",
    "tdd",
    "simplify",
    "codex-system",
    "gemini-system",
    "design-tracker",
    "checkpointing",
    "research-lib",
    "update-design",
    "update-lib-docs",
    "init",
];

/// Build the analysis prompt around a rendered checkpoint.
pub fn build_analysis_prompt(checkpoint: &str) -> String {
    format!(
        r#"Analyze the following checkpoint and identify reusable work patterns that could become skills.

A "skill" is a repeatable workflow pattern that can be triggered by specific phrases and executed consistently.

## Checkpoint Content

{checkpoint}

## Analysis Instructions

1. **Identify Patterns** in:
   - Sequences of commits forming logical workflows
   - File change patterns (e.g., test + implementation together)
   - CLI consultation sequences (research -> design -> implement)
   - Agent Teams coordination patterns (team composition, task sizing, communication)
   - Multi-step operations that could be templated

2. **For each potential skill, provide**:
   - **Name**: Short, descriptive (e.g., "tdd-feature", "research-implement")
   - **Description**: What this skill accomplishes
   - **Trigger phrases**: Example phrases that should invoke it
   - **Workflow steps**: Ordered list of actions
   - **Confidence**: 0.0-1.0 (only suggest >= 0.6)
   - **Evidence**: What in the checkpoint suggests this pattern

3. **Check against existing skills**:
   - {known_skills}
   - If a pattern matches an existing skill, note it but still report

4. **Quality criteria**:
   - Skip trivial patterns (single file edits, simple commits)
   - Focus on multi-step workflows that save time when repeated
   - Agent Teams patterns are especially valuable (team composition, task sizing)

Provide your analysis:"#,
        checkpoint = checkpoint,
        known_skills = KNOWN_SKILLS.join(", "),
    )
}
