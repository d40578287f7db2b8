use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SavedJobRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub job_title: String,
    pub required_experience: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub work_type: String,
    pub location: String,
    pub company: String,
    pub required_qualifications: Vec<String>,
    pub application_link: Option<String>,
    pub job_description: Option<String>,
    pub salary_range: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SavedCoverLetterRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub resume_text: String,
    pub job_description: String,
    pub cover_letter: String,
    pub created_at: DateTime<Utc>,
}
