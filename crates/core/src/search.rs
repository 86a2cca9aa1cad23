//! Listing search: criteria parsing, predicate chain, relevance sort,
//! pagination.
//!
//! The whole pipeline is pure: the same `(criteria, candidates)` input
//! always produces the same page, with no clock, randomness, or I/O. The
//! API layer fetches the approved candidate set and feeds it through
//! [`run`].

use std::cmp::Ordering;

use serde::Deserialize;

use crate::listing::{Intent, PropertyType};

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default number of listings per result page.
pub const DEFAULT_PAGE_SIZE: i64 = 12;

/// Maximum number of listings per result page.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Clamp a parsed page size to valid bounds.
pub fn clamp_page_size(size: Option<i64>) -> i64 {
    size.unwrap_or(DEFAULT_PAGE_SIZE).max(1).min(MAX_PAGE_SIZE)
}

/// Clamp a parsed page number to be at least 1.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// The raw query-parameter bag, exactly as it arrives on the wire.
///
/// All fields are optional strings; camelCase names are the public API
/// contract. Conversion into [`SearchCriteria`] never fails; bad values
/// degrade to "filter skipped".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSearchQuery {
    pub intent: Option<String>,
    pub property_type: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub budget_min: Option<String>,
    pub budget_max: Option<String>,
    pub bedrooms: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

/// Typed, validated search criteria.
///
/// Every filter is optional; an absent criterion skips its predicate.
#[derive(Debug, Clone, Default)]
pub struct SearchCriteria {
    pub intent: Option<Intent>,
    pub property_type: Option<PropertyType>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub budget_min: Option<i64>,
    pub budget_max: Option<i64>,
    pub min_bedrooms: Option<i32>,
    pub page: i64,
    pub page_size: i64,
}

impl SearchCriteria {
    /// Build criteria from the raw parameter bag with permissive parsing.
    ///
    /// - Unknown intent / property-type tokens become `None` (filter
    ///   skipped).
    /// - Unparseable budgets become "no bound"; negative budgets floor at 0.
    /// - Unparseable page / pageSize fall back to page 1 / the default size;
    ///   sizes are clamped to `1..=MAX_PAGE_SIZE`.
    ///
    /// The conversion itself never errors: a garbage query degrades to
    /// "show everything".
    pub fn from_raw(raw: &RawSearchQuery) -> Self {
        Self {
            intent: parse_token(&raw.intent, Intent::from_str_db),
            property_type: parse_token(&raw.property_type, PropertyType::from_str_db),
            country: non_empty(&raw.country),
            state: non_empty(&raw.state),
            city: non_empty(&raw.city),
            budget_min: parse_amount(&raw.budget_min),
            budget_max: parse_amount(&raw.budget_max),
            min_bedrooms: raw
                .bedrooms
                .as_deref()
                .and_then(|s| s.trim().parse::<i32>().ok())
                .filter(|n| *n > 0),
            page: clamp_page(parse_i64(&raw.page)),
            page_size: clamp_page_size(parse_i64(&raw.page_size)),
        }
    }
}

/// Trim, lowercase, and parse an enum token; anything unrecognised is `None`.
fn parse_token<T>(
    value: &Option<String>,
    parse: impl Fn(&str) -> Result<T, crate::error::CoreError>,
) -> Option<T> {
    value
        .as_deref()
        .map(|s| s.trim().to_ascii_lowercase())
        .filter(|s| !s.is_empty())
        .and_then(|s| parse(&s).ok())
}

/// A trimmed, non-empty string criterion.
fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parse a rupee amount; unparseable input means "no bound".
fn parse_amount(value: &Option<String>) -> Option<i64> {
    value
        .as_deref()
        .and_then(|s| s.trim().parse::<i64>().ok())
        .map(|n| n.max(0))
}

fn parse_i64(value: &Option<String>) -> Option<i64> {
    value.as_deref().and_then(|s| s.trim().parse::<i64>().ok())
}

// ---------------------------------------------------------------------------
// Candidate view
// ---------------------------------------------------------------------------

/// The fields the pipeline reads off a candidate listing.
///
/// Implemented by the repository layer's `Listing` row so filtering and
/// ranking stay borrow-only over the fetched set.
pub trait Searchable {
    fn intent(&self) -> Intent;
    fn property_type(&self) -> Option<PropertyType>;
    fn country(&self) -> &str;
    fn state(&self) -> &str;
    fn city(&self) -> &str;
    /// `None` means "price on request".
    fn price(&self) -> Option<i64>;
    fn bedrooms(&self) -> Option<i32>;
}

// ---------------------------------------------------------------------------
// Predicate chain
// ---------------------------------------------------------------------------

/// Apply the predicate chain, returning the matching subset in input order.
///
/// Each predicate is skipped when its criterion is absent; the result is
/// always a subset of `candidates` (no predicate adds items).
pub fn filter<'a, T: Searchable>(candidates: &'a [T], criteria: &SearchCriteria) -> Vec<&'a T> {
    candidates
        .iter()
        .filter(|listing| matches(*listing, criteria))
        .collect()
}

/// Whether a single listing passes every active predicate.
pub fn matches<T: Searchable>(listing: &T, criteria: &SearchCriteria) -> bool {
    matches_intent(listing, criteria.intent)
        && matches_property_type(listing, criteria.property_type)
        && matches_region(listing.country(), criteria.country.as_deref())
        && matches_region(listing.state(), criteria.state.as_deref())
        && matches_city(listing.city(), criteria.city.as_deref())
        && matches_budget(listing.price(), criteria.budget_min, criteria.budget_max)
        && matches_bedrooms(listing.bedrooms(), criteria.min_bedrooms)
}

fn matches_intent<T: Searchable>(listing: &T, intent: Option<Intent>) -> bool {
    intent.map_or(true, |i| listing.intent() == i)
}

/// `Others` is a sentinel: it matches any property type rather than only
/// listings literally typed `others`.
fn matches_property_type<T: Searchable>(listing: &T, property_type: Option<PropertyType>) -> bool {
    match property_type {
        None | Some(PropertyType::Others) => true,
        Some(pt) => listing.property_type() == Some(pt),
    }
}

/// Case-insensitive equality for country / state.
fn matches_region(value: &str, criterion: Option<&str>) -> bool {
    criterion.map_or(true, |c| value.eq_ignore_ascii_case(c))
}

/// Case-insensitive substring match: the query city must appear within the
/// listing's city name (so "mumbai" matches "Navi Mumbai").
fn matches_city(city: &str, criterion: Option<&str>) -> bool {
    criterion.map_or(true, |c| {
        city.to_lowercase().contains(&c.to_lowercase())
    })
}

/// Budget range inclusion. Listings priced "on request" (`None`) are never
/// excluded by a budget filter.
fn matches_budget(price: Option<i64>, min: Option<i64>, max: Option<i64>) -> bool {
    match price {
        None => true,
        Some(p) => min.map_or(true, |m| p >= m) && max.map_or(true, |m| p <= m),
    }
}

/// Minimum-bedroom threshold. Listings without a bedroom count (services,
/// plots) fail any threshold above zero.
fn matches_bedrooms(bedrooms: Option<i32>, min: Option<i32>) -> bool {
    min.map_or(true, |m| bedrooms.map_or(false, |b| b >= m))
}

// ---------------------------------------------------------------------------
// Relevance sort
// ---------------------------------------------------------------------------

/// Sort the filtered set by relevance, in place.
///
/// Ordering, most significant first:
/// 1. listings whose city contains the queried city sort before the rest;
/// 2. priced listings sort before "price on request" listings;
/// 3. among priced listings: price ascending, except descending for `sell`
///    searches so premium stock surfaces first.
///
/// The sort is stable, so equal listings keep their input order.
pub fn rank<T: Searchable>(items: &mut [&T], criteria: &SearchCriteria) {
    let city_query = criteria.city.as_deref().map(str::to_lowercase);
    let descending = criteria.intent == Some(Intent::Sell);

    items.sort_by(|a, b| {
        let a_city = city_hit(*a, city_query.as_deref());
        let b_city = city_hit(*b, city_query.as_deref());

        b_city
            .cmp(&a_city)
            .then_with(|| compare_prices(a.price(), b.price(), descending))
    });
}

fn city_hit<T: Searchable>(listing: &T, city_query: Option<&str>) -> bool {
    city_query.map_or(false, |q| listing.city().to_lowercase().contains(q))
}

fn compare_prices(a: Option<i64>, b: Option<i64>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(pa), Some(pb)) => {
            if descending {
                pb.cmp(&pa)
            } else {
                pa.cmp(&pb)
            }
        }
        // "Price on request" sorts last regardless of direction.
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// One page of results plus the counters clients page with.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total matches across all pages (post-filter, pre-slice).
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub has_more: bool,
}

/// Slice a 1-based page out of the ranked result set.
///
/// `has_more` is `page * page_size < total`; a page past the end is simply
/// empty.
pub fn paginate<T>(items: Vec<T>, page: i64, page_size: i64) -> Page<T> {
    let total = items.len() as i64;
    let start = (page - 1).saturating_mul(page_size);
    let has_more = page.saturating_mul(page_size) < total;

    let items: Vec<T> = items
        .into_iter()
        .skip(start as usize)
        .take(page_size as usize)
        .collect();

    Page {
        items,
        total,
        page,
        page_size,
        has_more,
    }
}

/// Run the full pipeline: filter, rank, paginate.
pub fn run<'a, T: Searchable>(candidates: &'a [T], criteria: &SearchCriteria) -> Page<&'a T> {
    let mut matched = filter(candidates, criteria);
    rank(&mut matched, criteria);
    paginate(matched, criteria.page, criteria.page_size)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
