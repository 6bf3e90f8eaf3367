use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Employment form of a listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum JobType {
    Heltid,
    Deltid,
    Konsult,
    Praktik,
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            JobType::Heltid => "Heltid",
            JobType::Deltid => "Deltid",
            JobType::Konsult => "Konsult",
            JobType::Praktik => "Praktik",
        };
        write!(f, "{}", label)
    }
}

/// Core job listing data model
///
/// `deadline` and `time_posted` are display strings ("5 dagar kvar",
/// "2 dagar sedan"), not timestamps. `posted_at` carries the real posting
/// time where known; rows without it fall back to the legacy
/// relative-time vocabulary for the "newest" sort.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobListing {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub deadline: String,
    pub job_type: JobType,
    pub time_posted: String,
    pub posted_at: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    pub logo: Option<String>,
    pub description: String,
}

/// A user's bookmark of a listing, persisted in the hosted store.
/// Listing fields are denormalized so the bookmark survives the
/// original ad going away.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavedJob {
    pub id: String,
    pub user_id: String,
    pub job_id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub deadline: String,
    pub job_type: JobType,
    pub time_posted: String,
    pub tags: Vec<String>,
    pub logo: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// How often an alert would notify
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertFrequency {
    Daily,
    Weekly,
}

/// A saved search, persisted client-locally only
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobAlert {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_type: Option<JobType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    pub frequency: AlertFrequency,
    pub created_at: DateTime<Utc>,
    pub job_count: u32,
}

/// Caller-supplied fields for creating a [`JobAlert`]
#[derive(Debug, Clone)]
pub struct AlertDraft {
    pub title: String,
    pub location: Option<String>,
    pub job_type: Option<JobType>,
    pub keywords: Option<Vec<String>>,
    pub frequency: AlertFrequency,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Private,
    Business,
}

/// Account metadata, distinct from the auth identity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: String,
    pub user_id: String,
    pub account_type: AccountType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Active session as reported by the auth provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub user_id: String,
    pub email: String,
}
