//! Prompt templates. All of them demand bare JSON with fixed keys; the
//! orchestrators tolerate anything else coming back.

use storepulse_core::Store;

pub const ANALYST_SYSTEM: &str = "You are an analyst specialized in customer experience and \
     store review analysis for physical sporting-goods retail. Always answer with valid JSON.";

pub const PRAISE_SYSTEM: &str = "You are an analyst specialized in spotting positive patterns \
     in customer feedback. Return only valid JSON.";

pub const COMPLAINT_SYSTEM: &str = "You are an analyst specialized in spotting recurring \
     problems in customer feedback. Return only valid JSON.";

fn numbered(comments: &[String]) -> String {
    comments
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}. \"{c}\"", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Network/region/state/team level analysis.
pub fn macro_prompt(comments: &[String], scope_label: &str) -> String {
    format!(
        "Analyze the following customer comments about retail stores in {scope_label}.\n\
         \n\
         Customer comments:\n{}\n\
         \n\
         Produce a structured analysis with:\n\
         1. Strengths (up to 5 items): main positive aspects mentioned\n\
         2. Weaknesses (up to 5 items): main recurring problems or complaints\n\
         3. Trends (up to 3 items): satisfaction or dissatisfaction patterns\n\
         4. Opportunities (up to 4 items): practical improvement suggestions\n\
         \n\
         Answer ONLY with valid JSON, no markdown, in exactly this shape:\n\
         {{\n\
           \"strengths\": [\"item1\", \"item2\"],\n\
           \"weaknesses\": [\"item1\", \"item2\"],\n\
           \"trends\": [\"item1\", \"item2\"],\n\
           \"opportunities\": [\"item1\", \"item2\"]\n\
         }}",
        numbered(comments)
    )
}

/// Single-store analysis.
pub fn micro_prompt(comments: &[String], store: &Store) -> String {
    let location = match (&store.city, &store.state) {
        (Some(city), state) => format!("{city}, {state}"),
        (None, state) => state.clone(),
    };
    format!(
        "Analyze the customer comments about the store \"{}\" ({location}).\n\
         \n\
         Customer comments:\n{}\n\
         \n\
         Produce a detailed, actionable analysis with:\n\
         1. Summary (one paragraph): overall customer perception of this store\n\
         2. Strengths (up to 5 items): positive highlights specific to this store\n\
         3. Weaknesses (up to 5 items): specific problems mentioned\n\
         4. Frequent complaints (up to 5 items): complaints appearing multiple times\n\
         5. Positive highlights (up to 3 items): unique aspects customers value\n\
         6. Action plan (up to 4 items): practical, specific improvement actions\n\
         \n\
         Answer ONLY with valid JSON, no markdown, in exactly this shape:\n\
         {{\n\
           \"summary\": \"summary text\",\n\
           \"strengths\": [\"item1\", \"item2\"],\n\
           \"weaknesses\": [\"item1\", \"item2\"],\n\
           \"frequentComplaints\": [\"item1\", \"item2\"],\n\
           \"positiveHighlights\": [\"item1\", \"item2\"],\n\
           \"actionPlan\": [\"item1\", \"item2\"]\n\
         }}",
        store.name,
        numbered(comments)
    )
}

/// Group positive comments into the top praised reasons.
pub fn praise_prompt(comments: &[String]) -> String {
    format!(
        "Analyze ALL of the following POSITIVE customer comments about a sporting-goods store.\n\
         Group comments mentioning the same positive aspect, count the mentions, and describe \
         each reason clearly.\n\
         \n\
         Positive comments:\n{}\n\
         \n\
         Return ONLY valid JSON (no markdown) in this shape, at most 5 entries ordered by \
         mentions descending, where \"mentions\" is the real number of comments mentioning \
         the reason:\n\
         {{\n\
           \"praises\": [\n\
             {{\"text\": \"Friendly and efficient service\", \"mentions\": 15}}\n\
           ]\n\
         }}",
        numbered(comments)
    )
}

/// Group negative comments into the top complaint reasons.
pub fn complaint_prompt(comments: &[String]) -> String {
    format!(
        "Analyze ALL of the following NEGATIVE customer comments about a sporting-goods store.\n\
         Group comments mentioning the same problem, count the mentions, and describe each \
         reason clearly.\n\
         \n\
         Negative comments:\n{}\n\
         \n\
         Return ONLY valid JSON (no markdown) in this shape, at most 5 entries ordered by \
         mentions descending, where \"mentions\" is the real number of comments mentioning \
         the problem:\n\
         {{\n\
           \"complaints\": [\n\
             {{\"text\": \"Long checkout lines\", \"mentions\": 12}}\n\
           ]\n\
         }}",
        numbered(comments)
    )
}
