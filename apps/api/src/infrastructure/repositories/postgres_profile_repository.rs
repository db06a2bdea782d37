use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::profile::{
    Availability, Certification, Education, Experience, Language, Profile, ProfileStats, Skill,
    SocialLink,
};
use crate::domain::repositories::ProfileRepository;
use crate::domain::user::Email;

/// PostgreSQL implementation of ProfileRepository
///
/// Collections are stored as JSONB documents on the single profile row.
pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ProfileRow {
    id: Uuid,
    full_name: String,
    title: String,
    bio: String,
    short_bio: String,
    email: String,
    phone: Option<String>,
    location: String,
    profile_image: Option<String>,
    resume_url: Option<String>,
    skills: Json<Vec<Skill>>,
    social_links: Json<Vec<SocialLink>>,
    experience: Json<Vec<Experience>>,
    education: Json<Vec<Education>>,
    languages: Json<Vec<Language>>,
    certifications: Json<Vec<Certification>>,
    availability: Json<Availability>,
    stats: Json<ProfileStats>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = DomainError;

    fn try_from(r: ProfileRow) -> Result<Self, Self::Error> {
        Ok(Profile {
            id: r.id,
            full_name: r.full_name,
            title: r.title,
            bio: r.bio,
            short_bio: r.short_bio,
            email: Email::new(r.email)
                .map_err(|e| DomainError::Storage(format!("Invalid email from database: {}", e)))?,
            phone: r.phone,
            location: r.location,
            profile_image: r.profile_image,
            resume_url: r.resume_url,
            skills: r.skills.0,
            social_links: r.social_links.0,
            experience: r.experience.0,
            education: r.education.0,
            languages: r.languages.0,
            certifications: r.certifications.0,
            availability: r.availability.0,
            stats: r.stats.0,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn get(&self) -> DomainResult<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT
                id, full_name, title, bio, short_bio, email, phone, location,
                profile_image, resume_url, skills, social_links, experience,
                education, languages, certifications, availability, stats,
                created_at, updated_at
            FROM profiles
            ORDER BY created_at
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        row.map(Profile::try_from).transpose()
    }

    async fn save(&self, profile: &Profile) -> DomainResult<()> {
        sqlx::query(
            r#"
            INSERT INTO profiles (
                id, full_name, title, bio, short_bio, email, phone, location,
                profile_image, resume_url, skills, social_links, experience,
                education, languages, certifications, availability, stats,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                    $16, $17, $18, $19, $20)
            ON CONFLICT (id) DO UPDATE SET
                full_name = EXCLUDED.full_name,
                title = EXCLUDED.title,
                bio = EXCLUDED.bio,
                short_bio = EXCLUDED.short_bio,
                email = EXCLUDED.email,
                phone = EXCLUDED.phone,
                location = EXCLUDED.location,
                profile_image = EXCLUDED.profile_image,
                resume_url = EXCLUDED.resume_url,
                skills = EXCLUDED.skills,
                social_links = EXCLUDED.social_links,
                experience = EXCLUDED.experience,
                education = EXCLUDED.education,
                languages = EXCLUDED.languages,
                certifications = EXCLUDED.certifications,
                availability = EXCLUDED.availability,
                stats = EXCLUDED.stats,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(profile.id)
        .bind(&profile.full_name)
        .bind(&profile.title)
        .bind(&profile.bio)
        .bind(&profile.short_bio)
        .bind(profile.email.as_str())
        .bind(&profile.phone)
        .bind(&profile.location)
        .bind(&profile.profile_image)
        .bind(&profile.resume_url)
        .bind(Json(&profile.skills))
        .bind(Json(&profile.social_links))
        .bind(Json(&profile.experience))
        .bind(Json(&profile.education))
        .bind(Json(&profile.languages))
        .bind(Json(&profile.certifications))
        .bind(Json(&profile.availability))
        .bind(Json(&profile.stats))
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
