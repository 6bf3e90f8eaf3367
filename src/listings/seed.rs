use chrono::{Duration, Utc};
use tracing::debug;

use crate::models::{JobListing, JobType};

fn entry(
    id: &str,
    title: &str,
    company: &str,
    location: &str,
    deadline: &str,
    job_type: JobType,
    days_ago: i64,
    tags: &[&str],
    description: &str,
) -> JobListing {
    JobListing {
        id: id.to_string(),
        title: title.to_string(),
        company: company.to_string(),
        location: location.to_string(),
        deadline: deadline.to_string(),
        job_type,
        time_posted: match days_ago {
            0 => "Idag".to_string(),
            1 => "1 dag sedan".to_string(),
            7 => "1 vecka sedan".to_string(),
            n => format!("{} dagar sedan", n),
        },
        posted_at: Some(Utc::now() - Duration::days(days_ago)),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        logo: None,
        description: description.to_string(),
    }
}

/// Static working set of job ads shown in the browse view
pub fn seed_listings() -> Vec<JobListing> {
    debug!("Loading seeded job listings");

    vec![
        entry(
            "job-1",
            "Senior Frontend Developer",
            "Spotify",
            "Stockholm",
            "5 dagar kvar",
            JobType::Heltid,
            1,
            &["React", "TypeScript", "CSS"],
            "Vi söker en senior frontendutvecklare till vårt team i Stockholm. \
             Du arbetar med React och TypeScript i en modern produktmiljö.",
        ),
        entry(
            "job-2",
            "UX Designer",
            "Klarna",
            "Stockholm",
            "12 dagar kvar",
            JobType::Heltid,
            2,
            &["Figma", "Design Systems", "User Research"],
            "Som UX-designer hos oss driver du designarbetet från idé till \
             lansering tillsammans med produktteamet.",
        ),
        entry(
            "job-3",
            "Backend Developer",
            "Volvo Cars",
            "Göteborg",
            "3 dagar kvar",
            JobType::Heltid,
            3,
            &["Java", "Spring Boot", "Kubernetes"],
            "Backendutvecklare till vår uppkopplade bilplattform. Java, \
             Spring Boot och Kubernetes i stor skala.",
        ),
        entry(
            "job-4",
            "Data Engineer",
            "Ericsson",
            "Lund",
            "8 dagar kvar",
            JobType::Heltid,
            4,
            &["Python", "Spark", "Airflow"],
            "Bygg och förvalta datapipelines för våra analysplattformar.",
        ),
        entry(
            "job-5",
            "DevOps Engineer",
            "Northvolt",
            "Skellefteå",
            "15 dagar kvar",
            JobType::Heltid,
            5,
            &["AWS", "Terraform", "CI/CD"],
            "DevOps-ingenjör till fabriksnära system. Du automatiserar \
             infrastruktur och leveransflöden.",
        ),
        entry(
            "job-6",
            "Fullstack-utvecklare",
            "Tietoevry",
            "Malmö",
            "6 dagar kvar",
            JobType::Konsult,
            2,
            &["React", "Node.js", "PostgreSQL"],
            "Konsultuppdrag hos kund i Öresundsregionen. Fullstack med \
             React och Node.js.",
        ),
        entry(
            "job-7",
            "Produktägare",
            "H&M Group",
            "Stockholm",
            "10 dagar kvar",
            JobType::Heltid,
            6,
            &["Agile", "Product Management"],
            "Produktägare till vårt e-handelsteam. Du prioriterar backlog \
             och driver leveransen framåt.",
        ),
        entry(
            "job-8",
            "Javautvecklare",
            "Handelsbanken",
            "Stockholm",
            "2 dagar kvar",
            JobType::Heltid,
            7,
            &["Java", "Spring", "SQL"],
            "Javautvecklare till bankens kärnsystem. Stabilt team, långa \
             linjer, hög kvalitetsribba.",
        ),
        entry(
            "job-9",
            "Systemutvecklare .NET",
            "Skatteverket",
            "Solna",
            "20 dagar kvar",
            JobType::Heltid,
            3,
            &["C#", ".NET", "Azure"],
            "Utveckla samhällsnära tjänster i .NET och Azure.",
        ),
        entry(
            "job-10",
            "Frontend Developer",
            "IKEA",
            "Älmhult / Remote",
            "9 dagar kvar",
            JobType::Deltid,
            1,
            &["JavaScript", "Vue", "Accessibility"],
            "Deltidsroll i vårt digitala team. Fokus på tillgänglighet och \
             komponentbibliotek.",
        ),
        entry(
            "job-11",
            "Embedded Developer",
            "Scania",
            "Södertälje",
            "4 dagar kvar",
            JobType::Heltid,
            4,
            &["C++", "Rust", "CAN"],
            "Inbyggda system för nästa generations lastbilar.",
        ),
        entry(
            "job-12",
            "UX-praktikant",
            "Stegroo",
            "Stockholm",
            "7 dagar kvar",
            JobType::Praktik,
            0,
            &["Figma", "Prototyping"],
            "Praktikplats i vårt designteam under vårterminen.",
        ),
        entry(
            "job-13",
            "Säkerhetskonsult",
            "Truesec",
            "Stockholm / Remote",
            "18 dagar kvar",
            JobType::Konsult,
            5,
            &["Security", "Pentest", "Cloud"],
            "Konsultroll inom offensiv säkerhet. Uppdrag hos nordiska \
             kunder.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn seed_ids_are_unique() {
        let listings = seed_listings();
        let ids: HashSet<_> = listings.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids.len(), listings.len());
    }

    #[test]
    fn seed_deadlines_parse() {
        for listing in seed_listings() {
            assert!(
                crate::listings::deadline_days(&listing.deadline).is_some(),
                "deadline {:?} on {}",
                listing.deadline,
                listing.id
            );
        }
    }

    #[test]
    fn seed_rows_carry_real_timestamps() {
        assert!(seed_listings().iter().all(|l| l.posted_at.is_some()));
    }
}
