// Extraction prompts. The vision call must return the document text only.

pub const IMAGE_EXTRACTION_SYSTEM: &str = "You are a precise document transcription assistant. \
    You read images of documents such as resumes and job descriptions and transcribe them. \
    Return only the transcribed text. Do NOT summarize, translate, or add commentary.";

pub const IMAGE_EXTRACTION_PROMPT: &str = "Extract all text from this image. \
    Preserve the structure and formatting of the document: keep headings, \
    section order, bullet points and line breaks as they appear.";
