use std::cmp::Reverse;

use super::criteria::{Criteria, SortKey, PAGE_SIZE};
use super::urgency::deadline_days;
use crate::models::JobListing;

/// One page of filtered results plus the counts the pager needs
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults {
    pub items: Vec<JobListing>,
    pub total_count: usize,
    pub total_pages: usize,
    /// The page actually rendered, after clamping
    pub page: usize,
}

/// Does a single listing pass the active criteria?
///
/// Search text matches title, company or any tag by case-insensitive
/// substring ("java" matches "javascript"). All three predicates must
/// hold.
pub fn matches(listing: &JobListing, criteria: &Criteria) -> bool {
    let search = criteria.search_query.trim().to_lowercase();
    let search_ok = search.is_empty()
        || listing.title.to_lowercase().contains(&search)
        || listing.company.to_lowercase().contains(&search)
        || listing
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&search));

    let location = criteria.location_query.trim().to_lowercase();
    let location_ok = location.is_empty() || listing.location.to_lowercase().contains(&location);

    let type_ok = match criteria.type_filter {
        None => true,
        Some(wanted) => listing.job_type == wanted,
    };

    search_ok && location_ok && type_ok
}

/// Legacy rank table for the closed Swedish relative-time vocabulary.
/// Unknown strings rank last. Only consulted for rows without a real
/// `posted_at` timestamp.
fn posted_rank(time_posted: &str) -> u32 {
    match time_posted {
        "Idag" => 0,
        "1 dag sedan" => 1,
        "2 dagar sedan" => 2,
        "3 dagar sedan" => 3,
        "4 dagar sedan" => 4,
        "5 dagar sedan" => 5,
        "6 dagar sedan" => 6,
        "1 vecka sedan" => 7,
        _ => 999,
    }
}

fn sort_listings(listings: &mut Vec<JobListing>, sort_key: SortKey) {
    match sort_key {
        // Default ranking is the working set's own order
        SortKey::Relevance => {}
        SortKey::Newest => {
            // One total key for the whole set: timestamped rows first,
            // newest to oldest, then legacy rows by vocabulary rank
            listings.sort_by_key(|l| match l.posted_at {
                Some(ts) => (0u8, Reverse(ts.timestamp()), 0u32),
                None => (1, Reverse(0), posted_rank(&l.time_posted)),
            });
        }
        SortKey::Deadline => {
            // Soonest deadline first; unparseable sorts last
            listings.sort_by_key(|l| deadline_days(&l.deadline).unwrap_or(i64::MAX));
        }
    }
}

/// Run the full filter/sort/paginate pipeline.
///
/// Pure function of (working set, criteria); an empty result set is a
/// valid output, not an error.
pub fn search(listings: &[JobListing], criteria: &Criteria) -> SearchResults {
    let mut filtered: Vec<JobListing> = listings
        .iter()
        .filter(|l| matches(l, criteria))
        .cloned()
        .collect();

    sort_listings(&mut filtered, criteria.sort_key);

    let total_count = filtered.len();
    let total_pages = total_count.div_ceil(PAGE_SIZE);
    let page = criteria.page.clamp(1, total_pages.max(1));

    let start = (page - 1) * PAGE_SIZE;
    let items = filtered
        .into_iter()
        .skip(start)
        .take(PAGE_SIZE)
        .collect();

    SearchResults {
        items,
        total_count,
        total_pages,
        page,
    }
}
