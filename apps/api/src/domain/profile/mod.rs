// Profile domain module
// The single biography record behind the about, skills and resume pages

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::value_objects::Email;
use crate::domain::validation::{trim_optional, Validator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Frontend,
    Backend,
    Database,
    Devops,
    Mobile,
    Design,
    Other,
}

impl SkillCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillCategory::Frontend => "frontend",
            SkillCategory::Backend => "backend",
            SkillCategory::Database => "database",
            SkillCategory::Devops => "devops",
            SkillCategory::Mobile => "mobile",
            SkillCategory::Design => "design",
            SkillCategory::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl SkillLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
            SkillLevel::Expert => "expert",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub name: String,
    pub category: SkillCategory,
    pub level: SkillLevel,
    pub years_of_experience: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub is_current_job: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub location: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub gpa: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub is_current_study: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Proficiency {
    Native,
    Fluent,
    Conversational,
    Basic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    pub name: String,
    pub proficiency: Proficiency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub issue_date: NaiveDate,
    pub expiry_date: Option<NaiveDate>,
    pub credential_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AvailabilityStatus {
    #[default]
    Available,
    Busy,
    NotAvailable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Availability {
    pub is_available: bool,
    pub status: AvailabilityStatus,
    pub message: Option<String>,
}

impl Default for Availability {
    fn default() -> Self {
        Self {
            is_available: true,
            status: AvailabilityStatus::Available,
            message: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileStats {
    pub projects_completed: i64,
    pub years_of_experience: i64,
    pub clients_satisfied: i64,
    pub lines_of_code: i64,
}

/// The portfolio owner's profile (one per deployment)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    pub full_name: String,
    pub title: String,
    pub bio: String,
    pub short_bio: String,
    pub email: Email,
    pub phone: Option<String>,
    pub location: String,
    pub profile_image: Option<String>,
    pub resume_url: Option<String>,
    pub skills: Vec<Skill>,
    pub social_links: Vec<SocialLink>,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub languages: Vec<Language>,
    pub certifications: Vec<Certification>,
    pub availability: Availability,
    pub stats: ProfileStats,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Skills grouped by category
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillsView {
    pub skills_by_category: BTreeMap<String, Vec<Skill>>,
    pub total_skills: usize,
}

/// Stored counters plus figures derived from the profile
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsView {
    #[serde(flatten)]
    pub stats: ProfileStats,
    pub total_skills: usize,
    pub skills_by_level: BTreeMap<String, usize>,
    pub total_experience: usize,
    pub current_jobs: usize,
}

impl Profile {
    pub fn skills_view(&self) -> SkillsView {
        let mut skills_by_category: BTreeMap<String, Vec<Skill>> = BTreeMap::new();
        for skill in &self.skills {
            skills_by_category
                .entry(skill.category.as_str().to_string())
                .or_default()
                .push(skill.clone());
        }
        SkillsView {
            skills_by_category,
            total_skills: self.skills.len(),
        }
    }

    /// Experience entries, most recent start date first
    pub fn sorted_experience(&self) -> Vec<Experience> {
        let mut experience = self.experience.clone();
        experience.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        experience
    }

    /// Education entries, most recent start date first
    pub fn sorted_education(&self) -> Vec<Education> {
        let mut education = self.education.clone();
        education.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        education
    }

    pub fn stats_view(&self) -> StatsView {
        let mut skills_by_level: BTreeMap<String, usize> = BTreeMap::new();
        for skill in &self.skills {
            *skills_by_level
                .entry(skill.level.as_str().to_string())
                .or_default() += 1;
        }
        StatsView {
            stats: self.stats,
            total_skills: self.skills.len(),
            skills_by_level,
            total_experience: self.experience.len(),
            current_jobs: self.experience.iter().filter(|e| e.is_current_job).count(),
        }
    }
}

/// Request body for `PUT /api/profile`
///
/// Scalar fields are always required. Omitted collections keep their
/// stored value (or start empty when the profile is first created).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub short_bio: String,
    #[serde(default)]
    pub email: String,
    pub phone: Option<String>,
    #[serde(default)]
    pub location: String,
    pub profile_image: Option<String>,
    pub resume_url: Option<String>,
    pub skills: Option<Vec<Skill>>,
    pub social_links: Option<Vec<SocialLink>>,
    pub experience: Option<Vec<Experience>>,
    pub education: Option<Vec<Education>>,
    pub languages: Option<Vec<Language>>,
    pub certifications: Option<Vec<Certification>>,
    pub availability: Option<Availability>,
    pub stats: Option<ProfileStats>,
}

impl ProfileUpdate {
    /// Validates the update and applies it to the stored profile, or
    /// creates the profile when none exists yet
    pub fn apply_to(self, existing: Option<Profile>) -> DomainResult<Profile> {
        let mut v = Validator::default();

        let full_name = self.full_name.trim().to_string();
        let title = self.title.trim().to_string();
        let bio = self.bio.trim().to_string();
        let short_bio = self.short_bio.trim().to_string();
        let location = self.location.trim().to_string();
        let profile_image = trim_optional(self.profile_image);
        let resume_url = trim_optional(self.resume_url);

        v.length(
            "fullName",
            &full_name,
            2,
            100,
            "Full name must be between 2 and 100 characters",
        );
        if !full_name.is_empty() {
            v.person_name("fullName", &full_name, "Full name");
        }
        v.length("title", &title, 2, 100, "Title must be between 2 and 100 characters");
        v.length("bio", &bio, 10, 2000, "Bio must be between 10 and 2000 characters");
        v.length(
            "shortBio",
            &short_bio,
            10,
            300,
            "Short bio must be between 10 and 300 characters",
        );
        let email = Email::new(&self.email);
        if let Err(e) = &email {
            v.push("email", e.clone());
        }
        v.length(
            "location",
            &location,
            2,
            100,
            "Location must be between 2 and 100 characters",
        );
        v.http_url(
            "profileImage",
            profile_image.as_deref(),
            "Profile image must be a valid URL",
        );
        v.http_url("resumeUrl", resume_url.as_deref(), "Resume URL must be a valid URL");

        if let Some(skills) = &self.skills {
            check_skills(&mut v, skills);
        }
        if let Some(links) = &self.social_links {
            for (i, link) in links.iter().enumerate() {
                let field = format!("socialLinks[{}]", i);
                if link.platform.trim().is_empty() {
                    v.push(format!("{}.platform", field), "Platform is required");
                }
                v.http_url(&format!("{}.url", field), Some(&link.url), "Please enter a valid URL");
            }
        }
        if let Some(experience) = &self.experience {
            for (i, exp) in experience.iter().enumerate() {
                let field = format!("experience[{}]", i);
                if exp.title.trim().is_empty() {
                    v.push(format!("{}.title", field), "Job title is required");
                }
                if exp.company.trim().is_empty() {
                    v.push(format!("{}.company", field), "Company name is required");
                }
                if exp.description.trim().is_empty() {
                    v.push(format!("{}.description", field), "Job description is required");
                }
            }
        }
        if let Some(education) = &self.education {
            for (i, edu) in education.iter().enumerate() {
                let field = format!("education[{}]", i);
                if edu.degree.trim().is_empty() {
                    v.push(format!("{}.degree", field), "Degree is required");
                }
                if edu.institution.trim().is_empty() {
                    v.push(format!("{}.institution", field), "Institution is required");
                }
            }
        }
        if let Some(languages) = &self.languages {
            for (i, lang) in languages.iter().enumerate() {
                if lang.name.trim().is_empty() {
                    v.push(format!("languages[{}].name", i), "Language name is required");
                }
            }
        }
        if let Some(certifications) = &self.certifications {
            for (i, cert) in certifications.iter().enumerate() {
                let field = format!("certifications[{}]", i);
                if cert.name.trim().is_empty() {
                    v.push(format!("{}.name", field), "Certification name is required");
                }
                if cert.issuer.trim().is_empty() {
                    v.push(format!("{}.issuer", field), "Certification issuer is required");
                }
                v.http_url(
                    &format!("{}.credentialUrl", field),
                    cert.credential_url.as_deref(),
                    "Please enter a valid URL",
                );
            }
        }
        if let Some(stats) = &self.stats {
            for (field, value) in [
                ("stats.projectsCompleted", stats.projects_completed),
                ("stats.yearsOfExperience", stats.years_of_experience),
                ("stats.clientsSatisfied", stats.clients_satisfied),
                ("stats.linesOfCode", stats.lines_of_code),
            ] {
                if value < 0 {
                    v.push(field, format!("{} cannot be negative", field));
                }
            }
        }

        v.finish()?;
        let email = email.map_err(|e| DomainError::invalid("email", e))?;

        let now = Utc::now();
        let mut profile = existing.unwrap_or_else(|| Profile {
            id: Uuid::new_v4(),
            full_name: String::new(),
            title: String::new(),
            bio: String::new(),
            short_bio: String::new(),
            email: email.clone(),
            phone: None,
            location: String::new(),
            profile_image: None,
            resume_url: None,
            skills: Vec::new(),
            social_links: Vec::new(),
            experience: Vec::new(),
            education: Vec::new(),
            languages: Vec::new(),
            certifications: Vec::new(),
            availability: Availability::default(),
            stats: ProfileStats::default(),
            created_at: now,
            updated_at: now,
        });

        profile.full_name = full_name;
        profile.title = title;
        profile.bio = bio;
        profile.short_bio = short_bio;
        profile.email = email;
        profile.phone = trim_optional(self.phone);
        profile.location = location;
        profile.profile_image = profile_image;
        profile.resume_url = resume_url;
        if let Some(skills) = self.skills {
            profile.skills = skills;
        }
        if let Some(links) = self.social_links {
            profile.social_links = links;
        }
        if let Some(experience) = self.experience {
            profile.experience = experience;
        }
        if let Some(education) = self.education {
            profile.education = education;
        }
        if let Some(languages) = self.languages {
            profile.languages = languages;
        }
        if let Some(certifications) = self.certifications {
            profile.certifications = certifications;
        }
        if let Some(availability) = self.availability {
            profile.availability = availability;
        }
        if let Some(stats) = self.stats {
            profile.stats = stats;
        }
        profile.updated_at = now;

        Ok(profile)
    }
}

fn check_skills(v: &mut Validator, skills: &[Skill]) {
    for (i, skill) in skills.iter().enumerate() {
        if skill.name.trim().is_empty() {
            v.push(format!("skills[{}].name", i), "Skill name is required");
        }
        if let Some(years) = skill.years_of_experience {
            if years < 0.0 {
                v.push(
                    format!("skills[{}].yearsOfExperience", i),
                    "Years of experience cannot be negative",
                );
            }
        }
    }
}
