use crate::model::{ChatMessage, DatasetRow};

const SYSTEM_PROMPT: &str = "\
You are a YouTube transcript summarizer and insights analyzer.

Rules:
- Output EXACTLY 2 lines, in this exact format:
  S: <one-line insight-dense summary of the transcript>
  V: <one-line incremental value analysis: what the full video adds beyond S>
- Total output must be <= 3000 characters.

S line requirements (insight-dense summary):
- Compress the core ideas into a high-density summary (facts, methods, claims, caveats, outcomes).
- Include concrete specifics when present (numbers, steps, named tools/techniques, cause→effect).
- No preamble like “this video…”, “the speaker…”, “in this transcript…”.

V line requirements (incremental value analysis):
- Do NOT restate S but instead, state what additional, specific information a viewer gets by watching.
- Prefer concrete increments, separated by \" | \" to stay single-line.
- Valid increments include (only when supported by the transcript/evidence):
  - Visuals/demos shown e.g. on-screen UI, diagrams, charts, code, live walkthroughs, comparisons.
  - Step-by-step execution detail, edge cases, troubleshooting, nuances, and rationale.
  - Additional examples, counterexamples, exercises, or extended explanations.
- Mention information density of the video to indicate if there's relatively a lot of info within the context of duration.
- Avoid generic filler like “more details”, “watch to learn more”, or “the rest of the video”.

General:
- Avoid LLM-ish contrasts like “it’s not X, it’s Y”.
- Do NOT mention being an AI/model.";

pub(crate) fn build_user_prompt(row: &DatasetRow) -> String {
    let minutes = row.duration_seconds as f64 / 60.0;

    format!(
        "Video:\n\
         - Title: {title}\n\
         - Channel: {channel}\n\
         - Duration: {duration}s (~{minutes:.1}m)\n\
         - URL: {url}\n\n\
         Transcript (evidence; do not invent details not supported here):\n\
         {evidence}\n\n\
         Now produce the EXACT 2-line output with S: and V: (single-line each).",
        title = row.title,
        channel = row.channel,
        duration = row.duration_seconds,
        url = row.url,
        evidence = row.evidence_text,
    )
}

pub(crate) fn build_chat_prompt(row: &DatasetRow) -> Vec<ChatMessage> {
    vec![
        ChatMessage {
            role: "system".to_string(),
            content: SYSTEM_PROMPT.to_string(),
        },
        ChatMessage {
            role: "user".to_string(),
            content: build_user_prompt(row),
        },
    ]
}
