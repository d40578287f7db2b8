// Shared prompt constants and prompt-building utilities.
// Each pipeline that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// The exact JobMatch field contract. Every job-search prompt embeds this so the
/// parser's schema and the model's instructions never drift apart.
pub const JOB_MATCH_FIELDS: &str = "\
    - job_title (string, required): The title of the position
    - required_experience (string, optional): Years of experience required
    - technologies (array of strings, optional): Key technologies and tools required
    - work_type (string, required): Whether remote, hybrid, or onsite
    - location (string, required): Job location
    - company (string, required): Name of the hiring company
    - required_qualifications (array of strings, required, may be empty): Required skills and qualifications
    - application_link (string, optional): Link to apply
    - job_description (string, optional): Brief description of the role
    - salary_range (string, optional): Salary information";

/// Unavailable optional data is expressed by omission, never by a sentinel string.
pub const OMIT_UNAVAILABLE_INSTRUCTION: &str = "\
    If an optional field is not available, OMIT the key entirely. \
    Do NOT write placeholders such as \"NA\", \"N/A\" or \"Not specified\".";

/// Shape of the top-level answer expected from every job-search call.
pub const JOB_MATCHES_SHAPE: &str = r#"{
  "matches": [ { ...job match fields... } ],
  "search_summary": "Brief overview of the results"
}"#;
