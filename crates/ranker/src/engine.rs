use crate::domain::clean_domain;
use crate::error::SourceError;
use crate::model::{NameFormat, OrgReport, OrgStatus, SelectionWindow};
use crate::scorer::TitleScorer;
use crate::selector::{enrich, select};
use crate::shaper::{shape, ShapedRow, Table};
use crate::source::ContactSource;
use crate::taxonomy::{RolePriorityList, RoleTaxonomy};

/// Everything fixed for one run across all organizations.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub priority: RolePriorityList,
    pub window: SelectionWindow,
    pub reveal: bool,
    pub name_format: NameFormat,
}

/// Render a search failure the way it appears in the status column.
pub fn search_failure_status(err: &SourceError) -> String {
    match err.status() {
        Some(code) => format!("Search Error ({code})"),
        None => format!("Error: {err}"),
    }
}

/// Search, rank, select and (optionally) enrich contacts for one domain.
///
/// Never fails: every problem becomes the report's status.
pub fn process_domain<S: ContactSource + ?Sized>(
    source: &S,
    taxonomy: &RoleTaxonomy,
    request: &SearchRequest,
    raw_domain: &str,
) -> OrgReport {
    let domain = clean_domain(raw_domain);
    if domain.is_empty() {
        return OrgReport::failed(domain, "Invalid domain");
    }

    let terms = taxonomy.search_terms(&request.priority);
    let people = match source.search(&domain, &terms) {
        Ok(p) => p,
        Err(e) => {
            log::info!("{domain}: search failed: {e}");
            return OrgReport::failed(domain, search_failure_status(&e));
        }
    };
    if people.is_empty() {
        return OrgReport::failed(domain, "No contacts found");
    }

    let scorer = TitleScorer::new(taxonomy, &request.priority);
    let mut contacts = match select(&people, &scorer, request.window) {
        Ok(c) => c,
        Err(e) => {
            log::info!("{domain}: {} candidates, {e}", people.len());
            return OrgReport::failed(domain, e.to_string());
        }
    };

    if contacts.is_empty() {
        return OrgReport { domain, status: OrgStatus::NoMatches, contacts };
    }

    if request.reveal {
        enrich(&mut contacts, source);
    }

    log::info!("{domain}: selected {} of {} candidates", contacts.len(), people.len());
    OrgReport { domain, status: OrgStatus::Success, contacts }
}

/// Reports for a whole input list, in input order.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub reports: Vec<OrgReport>,
}

impl BatchReport {
    pub fn success_count(&self) -> usize {
        self.reports.iter().filter(|r| r.is_success()).count()
    }

    pub fn shaped(&self, format: NameFormat) -> Vec<ShapedRow> {
        self.reports.iter().map(|r| shape(r, format)).collect()
    }

    pub fn table(&self, format: NameFormat) -> Table {
        Table::from_rows(&self.shaped(format))
    }
}

/// Process each domain in order. `on_progress(done, total, report)` is
/// called after every domain.
pub fn run_batch<S, F>(
    source: &S,
    taxonomy: &RoleTaxonomy,
    request: &SearchRequest,
    domains: &[String],
    mut on_progress: F,
) -> BatchReport
where
    S: ContactSource + ?Sized,
    F: FnMut(usize, usize, &OrgReport),
{
    let total = domains.len();
    let mut reports = Vec::with_capacity(total);
    for (i, raw) in domains.iter().enumerate() {
        let report = process_domain(source, taxonomy, request, raw);
        on_progress(i + 1, total, &report);
        reports.push(report);
    }
    BatchReport { reports }
}
