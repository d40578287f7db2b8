//! Saved jobs and cover letters: save, list by owner, get by id, delete.

pub mod handlers;

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::cover_letter::CoverLetterArtifact;
use crate::matching::models::JobMatch;
use crate::models::saved::{SavedCoverLetterRow, SavedJobRow};

pub async fn save_job(
    pool: &PgPool,
    owner_id: Uuid,
    job: &JobMatch,
) -> Result<SavedJobRow, sqlx::Error> {
    let row = sqlx::query_as::<_, SavedJobRow>(
        r#"
        INSERT INTO saved_jobs
            (owner_id, job_title, required_experience, technologies, work_type, location,
             company, required_qualifications, application_link, job_description, salary_range)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
        "#,
    )
    .bind(owner_id)
    .bind(&job.job_title)
    .bind(&job.required_experience)
    .bind(&job.technologies)
    .bind(&job.work_type)
    .bind(&job.location)
    .bind(&job.company)
    .bind(&job.required_qualifications)
    .bind(&job.application_link)
    .bind(&job.job_description)
    .bind(&job.salary_range)
    .fetch_one(pool)
    .await?;

    info!("Saved job {} for owner {owner_id}", row.id);
    Ok(row)
}

pub async fn list_jobs(pool: &PgPool, owner_id: Uuid) -> Result<Vec<SavedJobRow>, sqlx::Error> {
    sqlx::query_as::<_, SavedJobRow>(
        "SELECT * FROM saved_jobs WHERE owner_id = $1 ORDER BY created_at DESC",
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await
}

pub async fn get_job(pool: &PgPool, id: Uuid) -> Result<Option<SavedJobRow>, sqlx::Error> {
    sqlx::query_as::<_, SavedJobRow>("SELECT * FROM saved_jobs WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Returns false if no such job existed.
pub async fn delete_job(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM saved_jobs WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn save_cover_letter(
    pool: &PgPool,
    owner_id: Uuid,
    artifact: &CoverLetterArtifact,
) -> Result<SavedCoverLetterRow, sqlx::Error> {
    let row = sqlx::query_as::<_, SavedCoverLetterRow>(
        r#"
        INSERT INTO saved_cover_letters (owner_id, resume_text, job_description, cover_letter)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(owner_id)
    .bind(&artifact.resume_text)
    .bind(&artifact.job_description)
    .bind(&artifact.cover_letter)
    .fetch_one(pool)
    .await?;

    info!("Saved cover letter {} for owner {owner_id}", row.id);
    Ok(row)
}

pub async fn list_cover_letters(
    pool: &PgPool,
    owner_id: Uuid,
) -> Result<Vec<SavedCoverLetterRow>, sqlx::Error> {
    sqlx::query_as::<_, SavedCoverLetterRow>(
        "SELECT * FROM saved_cover_letters WHERE owner_id = $1 ORDER BY created_at DESC",
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await
}

pub async fn get_cover_letter(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<SavedCoverLetterRow>, sqlx::Error> {
    sqlx::query_as::<_, SavedCoverLetterRow>("SELECT * FROM saved_cover_letters WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Returns false if no such cover letter existed.
pub async fn delete_cover_letter(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM saved_cover_letters WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
