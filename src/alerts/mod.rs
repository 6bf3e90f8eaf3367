use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use crate::listings::{pipeline, Criteria};
use crate::models::{AlertDraft, AlertFrequency, JobAlert, JobListing};
use crate::store::{LocalStorage, JOB_ALERTS_KEY};

/// Client-local job-alert repository over [`LocalStorage`].
///
/// Single-browser semantics: no identity scoping, and concurrent
/// writers (two tabs) race with last-writer-wins. Accepted limitation
/// of the storage choice.
pub struct AlertBook {
    storage: Arc<dyn LocalStorage>,
}

fn seed_alerts() -> Vec<JobAlert> {
    let now = Utc::now();
    vec![
        JobAlert {
            id: "seed-frontend".to_string(),
            title: "Frontendjobb i Stockholm".to_string(),
            location: Some("Stockholm".to_string()),
            job_type: None,
            keywords: Some(vec!["React".to_string(), "Frontend".to_string()]),
            frequency: AlertFrequency::Daily,
            created_at: now,
            job_count: 0,
        },
        JobAlert {
            id: "seed-ux".to_string(),
            title: "UX och design".to_string(),
            location: None,
            job_type: None,
            keywords: Some(vec!["UX".to_string(), "Figma".to_string()]),
            frequency: AlertFrequency::Weekly,
            created_at: now,
            job_count: 0,
        },
    ]
}

/// How many listings in the working set match an alert's criteria.
/// Keywords are OR'd: one hit is enough. Location and type reuse the
/// listing pipeline's predicates.
fn matching_count(draft: &AlertDraft, listings: &[JobListing]) -> u32 {
    let base = Criteria {
        location_query: draft.location.clone().unwrap_or_default(),
        type_filter: draft.job_type,
        ..Criteria::default()
    };

    let count = listings
        .iter()
        .filter(|listing| match &draft.keywords {
            None => pipeline::matches(listing, &base),
            Some(keywords) if keywords.is_empty() => pipeline::matches(listing, &base),
            Some(keywords) => keywords.iter().any(|keyword| {
                let criteria = Criteria {
                    search_query: keyword.clone(),
                    ..base.clone()
                };
                pipeline::matches(listing, &criteria)
            }),
        })
        .count();
    count as u32
}

impl AlertBook {
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self { storage }
    }

    fn write(&self, alerts: &[JobAlert]) {
        match serde_json::to_string(alerts) {
            Ok(json) => self.storage.set(JOB_ALERTS_KEY, &json),
            Err(e) => warn!("Failed to encode job alerts: {}", e),
        }
    }

    /// Read the alert list. On first run (or unreadable content) the
    /// two example alerts are seeded and written back immediately so
    /// subsequent reads are stable.
    pub fn list(&self) -> Vec<JobAlert> {
        if let Some(raw) = self.storage.get(JOB_ALERTS_KEY) {
            match serde_json::from_str(&raw) {
                Ok(alerts) => return alerts,
                Err(e) => warn!("Stored job alerts unreadable, reseeding: {}", e),
            }
        }
        debug!("Seeding example job alerts");
        let seeded = seed_alerts();
        self.write(&seeded);
        seeded
    }

    /// Create an alert. The id is derived from the creation timestamp
    /// and `job_count` is a real match count against the given working
    /// set, evaluated at creation time.
    pub fn create(&self, draft: AlertDraft, listings: &[JobListing]) -> JobAlert {
        let now = Utc::now();
        let alert = JobAlert {
            id: format!("alert-{}", now.timestamp_millis()),
            title: draft.title.clone(),
            location: draft.location.clone(),
            job_type: draft.job_type,
            keywords: draft.keywords.clone(),
            frequency: draft.frequency,
            created_at: now,
            job_count: matching_count(&draft, listings),
        };

        let mut alerts = self.list();
        alerts.push(alert.clone());
        self.write(&alerts);
        alert
    }

    /// Delete by id; an absent id is a silent no-op
    pub fn remove(&self, id: &str) {
        let mut alerts = self.list();
        alerts.retain(|alert| alert.id != id);
        self.write(&alerts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::seed::seed_listings;
    use crate::models::JobType;
    use crate::store::MemoryStorage;

    fn book() -> AlertBook {
        AlertBook::new(Arc::new(MemoryStorage::default()))
    }

    fn draft(title: &str) -> AlertDraft {
        AlertDraft {
            title: title.to_string(),
            location: None,
            job_type: None,
            keywords: None,
            frequency: AlertFrequency::Daily,
        }
    }

    #[test]
    fn first_run_seeds_two_example_alerts() {
        let book = book();
        let alerts = book.list();
        assert_eq!(alerts.len(), 2);
        // Seeds were written back, so a second read is stable
        assert_eq!(book.list(), alerts);
    }

    #[test]
    fn unreadable_content_reseeds() {
        let storage = Arc::new(MemoryStorage::default());
        storage.set(JOB_ALERTS_KEY, "not json at all");
        let book = AlertBook::new(storage);
        assert_eq!(book.list().len(), 2);
    }

    #[test]
    fn alert_round_trip() {
        let book = book();
        let created = book.create(draft("Test"), &[]);
        assert!(!created.id.is_empty());

        let alerts = book.list();
        assert_eq!(alerts.len(), 3);
        assert!(alerts.iter().any(|a| a.title == "Test"));

        book.remove(&created.id);
        let remaining = book.list();
        assert_eq!(remaining.len(), 2);
        assert!(remaining.iter().all(|a| a.id != created.id));
    }

    #[test]
    fn removing_an_absent_id_is_a_no_op() {
        let book = book();
        let before = book.list();
        book.remove("no-such-alert");
        assert_eq!(book.list(), before);
    }

    #[test]
    fn job_count_is_computed_from_the_working_set() {
        let book = book();
        let listings = seed_listings();

        let mut d = draft("Javajobb");
        d.keywords = Some(vec!["Java".to_string()]);
        let created = book.create(d, &listings);
        // "Java" matches the Java listings and "JavaScript"/"Javautvecklare"
        let expected = listings
            .iter()
            .filter(|l| {
                l.title.to_lowercase().contains("java")
                    || l.company.to_lowercase().contains("java")
                    || l.tags.iter().any(|t| t.to_lowercase().contains("java"))
            })
            .count() as u32;
        assert_eq!(created.job_count, expected);
        assert!(created.job_count > 0);
    }

    #[test]
    fn job_count_respects_location_and_type() {
        let book = book();
        let listings = seed_listings();

        let d = AlertDraft {
            title: "Konsultuppdrag i Stockholm".to_string(),
            location: Some("Stockholm".to_string()),
            job_type: Some(JobType::Konsult),
            keywords: None,
            frequency: AlertFrequency::Weekly,
        };
        let created = book.create(d, &listings);
        let expected = listings
            .iter()
            .filter(|l| {
                l.location.to_lowercase().contains("stockholm") && l.job_type == JobType::Konsult
            })
            .count() as u32;
        assert_eq!(created.job_count, expected);
    }
}
