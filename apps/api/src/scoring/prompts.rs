// Prompt constants for resume scoring.

pub const SCORING_SYSTEM: &str =
    "You are a senior recruiter who evaluates resumes consistently and strictly.";

/// Replace `{resume_text}` before sending.
pub const DOMAIN_PROMPT_TEMPLATE: &str = r#"Analyze the following resume and determine the primary professional domain
(e.g., Software Engineering, Data Science, Marketing, etc.):

{resume_text}

Return only the domain name, nothing else."#;

/// Replace `{domain}` and `{resume_text}` before sending.
pub const SCORE_PROMPT_TEMPLATE: &str = r#"Analyze this {domain} resume and score each component:

Resume Text:
{resume_text}

Score these components (0-20 points each):
1. Professional Experience (relevance, clarity, achievements)
2. Skills & Technologies (relevance to {domain}, breadth, depth)
3. Education & Certifications
4. Resume Format & Organization
5. Overall Impact & Effectiveness

Return only a JSON object with exactly these keys and numeric scores, without quotes around the numbers or any other text:
{
  "Professional Experience": score,
  "Skills & Technologies": score,
  "Education & Certifications": score,
  "Resume Format": score,
  "Overall Impact": score
}"#;

/// Replace `{domain}`, `{resume_text}`, `{component_scores}`, `{weak_components}`
/// and `{threshold}` before sending.
pub const ADVICE_PROMPT_TEMPLATE: &str = r#"Analyze this {domain} resume and provide specific improvement recommendations.

Resume Text:
{resume_text}

Component Scores (out of 20 each):
{component_scores}

Based on a thorough analysis of both the resume content and scores:
1. Identify key missing elements or weak areas
2. Provide 4-5 specific, actionable recommendations
3. Include domain-specific advice for {domain} professionals
4. Focus especially on components that scored below {threshold} points: {weak_components}

Return only a bullet-point list of recommendations, no other text."#;
