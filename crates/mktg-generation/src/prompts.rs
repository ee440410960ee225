//! Prompt text for every model call.
//!
//! All functions are pure: the same inputs render the same prompt. Each prompt
//! ends with a literal JSON template of the expected reply. Empty pain-point or
//! need lists render as empty strings.

use mktg_core::{BlogTemplate, NewsItem, NicheProfile};

/// Reference material passed to blog prompts is cut to this many characters.
pub const BLOG_REFERENCE_CHARS: usize = 2000;

/// Context shared by the three social post prompts.
#[derive(Debug, Clone, Copy)]
pub struct PostContext<'a> {
    pub title: &'a str,
    pub niche: &'a NicheProfile,
    pub audience: &'a str,
    pub tone: &'a str,
    pub related_news: &'a [NewsItem],
    pub reference: &'a str,
}

/// Full pain-point detail, one challenge per `"\n- "`-separated entry:
/// `challenge [Cause: c, Explanation: e, Indicators: i1; i2 | ...]`.
#[must_use]
pub fn format_pain_points(niche: &NicheProfile) -> String {
    niche
        .customer_pain_points
        .iter()
        .map(|p| {
            let causes = p
                .why
                .iter()
                .map(|w| {
                    format!(
                        "Cause: {}, Explanation: {}, Indicators: {}",
                        w.cause,
                        w.explanation,
                        w.indicators.join("; ")
                    )
                })
                .collect::<Vec<_>>()
                .join(" | ");
            format!("{} [{causes}]", p.challenge)
        })
        .collect::<Vec<_>>()
        .join("\n- ")
}

/// Comma-separated challenge strings only.
#[must_use]
pub fn challenge_list(niche: &NicheProfile) -> String {
    niche.challenges().collect::<Vec<_>>().join(", ")
}

#[must_use]
pub fn needs_list(niche: &NicheProfile) -> String {
    niche.needs().collect::<Vec<_>>().join(", ")
}

fn niche_json(niche: &NicheProfile) -> String {
    serde_json::to_string_pretty(niche).unwrap_or_default()
}

fn news_json(news: &[NewsItem]) -> String {
    serde_json::to_string_pretty(news).unwrap_or_else(|_| "[]".to_string())
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// One long-form blog topic derived from the niche.
#[must_use]
pub fn topic_prompt(niche: &NicheProfile) -> String {
    format!(
        r#"You are a B2B marketing strategist who shapes thought-leadership agendas.

Niche / ICP profile:
{niche}

Propose ONE long-form blog topic about a structural shift, a go-to-market
inflection point, or a systemic inefficiency visible in this profile.

Rules:
1. Sound like an analyst publication: specific, authoritative, original.
2. No generic "Top trends" or "The future of X" titles; name a cause or a realignment.
3. Lead with an action word that signals insight (Rewiring, Deconstructing, Reframing, Operationalizing).
4. At most 15 words.
5. Anchor it in a real pain point or need from the profile.

Reply with JSON only:
{{
  "topic": "Generated topic title"
}}"#,
        niche = niche_json(niche),
    )
}

/// `count` distinct topic titles, steering away from `avoid`.
#[must_use]
pub fn topic_list_prompt(niche: &NicheProfile, count: usize, avoid: &[String]) -> String {
    let avoid = if avoid.is_empty() {
        "(none)".to_string()
    } else {
        avoid
            .iter()
            .map(|t| format!("- {t}"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    format!(
        r#"You are a B2B content strategist planning an editorial calendar.

Industry: {industry}
Pain points: {pain_points}
Needs: {needs}

Titles already used (do not repeat or paraphrase them):
{avoid}

Propose {count} distinct content topics for LinkedIn, X and YouTube. Each must
target one pain point or need above, stay under 15 words, and differ clearly
from the others.

Reply with JSON only:
{{
  "topics": ["Topic 1", "Topic 2"]
}}"#,
        industry = niche.industry,
        pain_points = challenge_list(niche),
        needs = needs_list(niche),
    )
}

/// Long-form blog prompt in the configured template.
#[must_use]
pub fn blog_prompt(
    template: BlogTemplate,
    topic: &str,
    niche: &NicheProfile,
    news: &[NewsItem],
    reference: &str,
) -> String {
    let reference = truncate_chars(reference, BLOG_REFERENCE_CHARS);
    let (role, brief) = match template {
        BlogTemplate::Standard => (
            "You are a B2B content writer producing clear, practical long-form articles.",
            r"Write a 700-1000 word article that:
1. Opens with the problem and who feels it.
2. Explains the main causes in plain language.
3. Offers concrete steps the reader can take.
4. Closes with a short summary.
Keep paragraphs short and avoid sales language.",
        ),
        BlogTemplate::ThoughtLeadership => (
            "You are an industry analyst writing long-form strategy essays for operators, executives and investors.",
            r"Write a 700-1000 word analytical essay that:
1. Introduction: frame the challenge and why it matters now.
2. Core analysis: expose root causes, system dynamics and hidden friction.
3. Strategic insight: present frameworks or pivots that create advantage.
4. Conclusion: what the shift means for leaders in this market.
Tie macro trends to operating realities and state cause and effect explicitly.
Analytical and confident tone. No bullet lists, no markdown, no promotion.",
        ),
    };

    format!(
        r#"{role}

Topic: "{topic}"

Industry: {industry}
Key pain points: {pain_points}
Customer needs: {needs}
Relevant news:
{news}
Reference material:
{reference}

{brief}

Reply with JSON only:
{{
  "title": "{topic}",
  "outline": ["Introduction", "Insight 1", "Insight 2", "Conclusion"],
  "blog": "Full text here..."
}}"#,
        industry = niche.industry,
        pain_points = challenge_list(niche),
        needs = needs_list(niche),
        news = news_json(news),
    )
}

#[must_use]
pub fn linkedin_prompt(ctx: &PostContext<'_>) -> String {
    format!(
        r##"You write high-impact LinkedIn posts for executive audiences.

Topic: "{title}"

Industry: {industry}
Pain points (causes, explanations, indicators):
- {pain_points}
Needs: {needs}
Audience: {audience}
Tone: {tone}
Related news:
{news}
Reference material:
{reference}

Requirements:
1. An insight-led caption of at most 200 words.
2. Surface a pain point, emerging need or opportunity with a storytelling hook.
3. Executive voice: no fluff, no overselling.
4. 5-7 relevant hashtags.

Reply with JSON only:
{{
  "linkedin": {{
    "caption": "...",
    "hashtags": ["#", "#", "#"]
  }}
}}"##,
        title = ctx.title,
        industry = ctx.niche.industry,
        pain_points = format_pain_points(ctx.niche),
        needs = needs_list(ctx.niche),
        audience = ctx.audience,
        tone = ctx.tone,
        news = news_json(ctx.related_news),
        reference = ctx.reference,
    )
}

#[must_use]
pub fn twitter_prompt(ctx: &PostContext<'_>) -> String {
    format!(
        r##"You write sharp posts for X (Twitter) aimed at industry leaders.

Topic: "{title}"

Industry: {industry}
Pain points: {pain_points}
Needs: {needs}
Audience: {audience}
Tone: {tone}
Related news:
{news}
Reference material:
{reference}

Requirements:
1. At most 280 characters.
2. One sharp insight, challenge or opportunity; no filler.
3. 2-3 relevant hashtags.

Reply with JSON only:
{{
  "twitter": {{
    "tweet": "...",
    "hashtags": ["#", "#"]
  }}
}}"##,
        title = ctx.title,
        industry = ctx.niche.industry,
        pain_points = challenge_list(ctx.niche),
        needs = needs_list(ctx.niche),
        audience = ctx.audience,
        tone = ctx.tone,
        news = news_json(ctx.related_news),
        reference = ctx.reference,
    )
}

#[must_use]
pub fn youtube_prompt(ctx: &PostContext<'_>) -> String {
    format!(
        r#"You write YouTube script intros and descriptions for a thought-leadership channel.

Topic: "{title}"

Industry: {industry}
Pain points (causes, explanations, indicators):
- {pain_points}
Needs: {needs}
Audience: {audience}
Tone: {tone}
Related news:
{news}
Reference material:
{reference}

Requirements:
1. Script intro (30-45 seconds): a curiosity hook, why the pain matters now,
   what the viewer will get, and a reason to keep watching.
2. Description (2-3 sentences): search-friendly summary of the value.
3. 5-7 niche-specific SEO tags.

Reply with JSON only:
{{
  "youtube": {{
    "script_intro": "...",
    "description": "...",
    "tags": ["tag1", "tag2", "tag3"]
  }}
}}"#,
        title = ctx.title,
        industry = ctx.niche.industry,
        pain_points = format_pain_points(ctx.niche),
        needs = needs_list(ctx.niche),
        audience = ctx.audience,
        tone = ctx.tone,
        news = news_json(ctx.related_news),
        reference = ctx.reference,
    )
}

/// Short web-search queries for trend discovery.
#[must_use]
pub fn search_query_prompt(niche: &NicheProfile) -> String {
    format!(
        r#"Write short web-search queries (2-4 words each) about {industry} trends,
strategy or customer challenges.

Each query must relate to the industry ({industry}), a pain point ({pain_points})
or a need ({needs}). Rephrase instead of copying input phrases. No commas and
no filler words such as "insights", "overview" or "update". Each query should
take a specific angle.

Reply with a JSON array only, for example:
["B2B SaaS GTM trends", "SaaS churn issues", "AI in SaaS"]"#,
        industry = niche.industry,
        pain_points = challenge_list(niche),
        needs = needs_list(niche),
    )
}

/// Free-form question answered from the knowledge base.
#[must_use]
pub fn ask_prompt(context: &str, question: &str) -> String {
    format!(
        r"You are a business analyst specialising in market positioning.

Read the context about the company's niche and ideal customer profile, identify
the insights and differentiators that matter, and answer the question directly.
Be concise and specific, favour strategic relevance (growth, positioning,
opportunities), and only claim what the context supports.

Context:
{context}

Question:
{question}"
    )
}

/// Narrated analysis of one platform's performance records.
///
/// `records` is the JSON of the platform's records, best first.
#[must_use]
pub fn platform_insight_prompt(platform: &str, avg_engagement: f64, records: &str) -> String {
    format!(
        r#"You are a content performance analyst.

Platform: {platform}
Average engagement rate: {avg_engagement}
Records (sorted by engagement rate, best first):
{records}

Explain why the strongest posts outperformed the weakest (topics, framing,
hashtags) and recommend what to publish next on this platform.

Reply with JSON only:
{{
  "insights": "...",
  "recommendations": "..."
}}"#
    )
}

/// Cross-platform summary built from the per-platform narratives.
#[must_use]
pub fn global_insight_prompt(platform_summaries: &str) -> String {
    format!(
        r#"You are a content performance analyst.

Per-platform findings:
{platform_summaries}

Summarise the patterns that hold across platforms and the single most
important change to the content strategy.

Reply with JSON only:
{{
  "global_insights": "..."
}}"#
    )
}
