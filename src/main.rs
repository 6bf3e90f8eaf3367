use std::sync::Arc;

use stegroo::alerts::AlertBook;
use stegroo::listings::{self, classify_deadline, deadline_days, search, Criteria, SortKey};
use stegroo::models::{AlertDraft, AlertFrequency};
use stegroo::session::{FlowState, SessionFlow};
use stegroo::store::{
    FileStorage, LocalStorage, MemoryAuthProvider, MemoryProfileStore, DEMO_AUTH_KEY,
};
use tracing::{info, Level};
use tracing_subscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("💼 Stegroo - job search demo");
    info!("=============================");
    info!("");

    // Load the seeded working set and run a search the way the browse
    // view would, reading entry parameters from a query string
    let all_listings = listings::seed::seed_listings();
    info!("Loaded {} listings", all_listings.len());

    let criteria = Criteria::from_query_string("q=developer&location=")
        .with_sort(SortKey::Deadline);
    let results = search(&all_listings, &criteria);

    info!(
        "\n✅ {} matches for \"{}\" ({} page(s))\n",
        results.total_count, criteria.search_query, results.total_pages
    );

    for (i, listing) in results.items.iter().enumerate() {
        let urgency = deadline_days(&listing.deadline)
            .map(classify_deadline)
            .map(|u| if u.is_urgent() { " ⚠️" } else { "" })
            .unwrap_or("");
        println!("{}. {} - {}", i + 1, listing.title, listing.company);
        println!("   {} · {}", listing.location, listing.job_type);
        println!("   {}{} · {}", listing.deadline, urgency, listing.time_posted);
        println!("   Tags: {}", listing.tags.join(", "));
        println!();
    }

    // Save the result page to a JSON file
    let json = serde_json::to_string_pretty(&results.items)?;
    tokio::fs::write("search_results.json", json).await?;
    info!("💾 Saved result page to search_results.json");

    // Client-local storage demo: demo flag plus an alert round trip
    let storage: Arc<dyn LocalStorage> = Arc::new(FileStorage::new("local_store")?);
    storage.set(DEMO_AUTH_KEY, "true");

    // Bootstrap the profile view in demo mode (no session, flag set)
    let mut flow = SessionFlow::new(
        Arc::new(MemoryAuthProvider::signed_out()),
        Arc::new(MemoryProfileStore::default()),
        storage.clone(),
    );
    flow.bootstrap().await?;
    if let FlowState::DemoMode { profile } = flow.state() {
        info!(
            "👤 Viewing profile as {} (demo mode)",
            profile.display_name.as_deref().unwrap_or("okänd")
        );
    }

    let book = AlertBook::new(storage);
    let alert = book.create(
        AlertDraft {
            title: "Utvecklarjobb".to_string(),
            location: None,
            job_type: None,
            keywords: Some(vec!["developer".to_string()]),
            frequency: AlertFrequency::Daily,
        },
        &all_listings,
    );
    info!(
        "🔔 Created alert \"{}\" matching {} listings ({} alerts stored)",
        alert.title,
        alert.job_count,
        book.list().len()
    );

    Ok(())
}
