// Prompt constants for profile analysis and job search.
// The JobMatch field contract comes from llm_client::prompts so every search variant
// asks for exactly the fields the parser accepts.

use crate::llm_client::prompts::{
    JOB_MATCHES_SHAPE, JOB_MATCH_FIELDS, OMIT_UNAVAILABLE_INSTRUCTION,
};

pub const PROFILE_ANALYSIS_SYSTEM: &str =
    "You are an experienced technical recruiter. You read resumes carefully and \
    describe candidates accurately, without inventing experience they do not have.";

/// Profile analysis prompt. Replace `{resume_text}` before sending.
pub const PROFILE_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the following resume and extract key information including:
1. Professional summary
2. Key skills and technologies
3. Years of experience
4. Current/most recent role
5. Industry focus

Resume content:
{resume_text}"#;

/// System instruction for the résumé-driven search session.
pub fn resume_search_system() -> String {
    format!(
        "You are an expert job search assistant. Your task is to search for relevant job \
        opportunities based on the candidate's resume analysis that will be provided. Use the \
        search tool to find current job openings that match the candidate's profile. Focus on \
        the candidate's actual skills, experience, and qualifications when searching. Do not \
        create or assume sample resume content.\n\n\
        Your response must be a JSON object of this shape:\n{JOB_MATCHES_SHAPE}\n\n\
        Each job match has these fields:\n{JOB_MATCH_FIELDS}\n\n\
        {OMIT_UNAVAILABLE_INSTRUCTION}"
    )
}

/// System instruction for the filter-driven search session.
pub fn filter_search_system() -> String {
    format!(
        "You are an expert job search assistant. Your task is to search for relevant job \
        opportunities based on the provided search criteria and filters. Use the search tool \
        to find current job openings that match the specified requirements.\n\n\
        Your response must be a JSON object of this shape:\n{JOB_MATCHES_SHAPE}\n\n\
        Each job match has these fields:\n{JOB_MATCH_FIELDS}\n\n\
        {OMIT_UNAVAILABLE_INSTRUCTION}\n\n\
        Focus on finding current and relevant job postings that closely match the provided filters."
    )
}

/// Replace `{resume_analysis}` and `{min_matches}` before sending.
pub const RESUME_SEARCH_PROMPT_TEMPLATE: &str = r#"Here is the detailed analysis of the candidate's resume:

{resume_analysis}

Based on this analysis, please search for current job openings that match this candidate's profile.
Find at least {min_matches} relevant positions and format the response as a JSON object with 'matches' and 'search_summary' fields.
Each job match must use exactly the fields described in the system message."#;

/// Replace `{criteria}` and `{min_matches}` before sending.
pub const FILTER_SEARCH_PROMPT_TEMPLATE: &str = r#"Please search for job opportunities matching the following criteria:

{criteria}

Find at least {min_matches} relevant positions that best match these requirements. Format the response as a JSON object with 'matches'
and 'search_summary' fields. Each job match must use exactly the fields described in the system message."#;
