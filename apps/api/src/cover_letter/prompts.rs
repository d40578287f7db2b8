// Prompt constants for cover letter generation.

pub const COVER_LETTER_SYSTEM: &str =
    "You are a professional career writer. You write cover letters grounded strictly \
    in the candidate's resume, never inventing experience.";

/// Replace `{resume_text}` and `{job_description}` before sending.
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Generate a professional cover letter based on the following resume and job description.
The cover letter should highlight relevant skills and experiences that match the job requirements.

Resume:
{resume_text}

Job Description:
{job_description}

Create a compelling cover letter that:
1. Opens with a strong introduction
2. Highlights relevant experience and skills
3. Shows enthusiasm for the role and company
4. Concludes professionally"#;
