//! Append-only offset window over the activity log
//!
//! The window only ever grows through [`ActivityWindow::load_more`]. A filter
//! change (or refresh) restarts from offset 0 with an empty list. Every
//! request gets a fresh id and only the page answering the latest request is
//! applied, so a slow page for an abandoned filter can never be appended.

use simcon_client::ApiError;
use simcon_core::{ActivityEvent, ActivityPage, EventType};

/// Default number of events per page
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// A page fetch to be issued by the action layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub request_id: u64,
    pub limit: u32,
    pub offset: u32,
    pub filter: Option<EventType>,
    /// `true` for load-more, `false` for a fresh first page
    pub append: bool,
}

#[derive(Debug, Clone)]
pub struct ActivityWindow {
    pub events: Vec<ActivityEvent>,
    pub offset: u32,
    pub limit: u32,
    pub filter: Option<EventType>,
    pub has_more: bool,
    pub error: Option<String>,
    in_flight: Option<PageRequest>,
    next_request_id: u64,
}

impl ActivityWindow {
    pub fn new(limit: u32) -> Self {
        Self {
            events: Vec::new(),
            offset: 0,
            limit: limit.max(1),
            filter: None,
            has_more: false,
            error: None,
            in_flight: None,
            next_request_id: 0,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether the in-flight request is a fresh first page
    pub fn is_reloading(&self) -> bool {
        self.in_flight.as_ref().is_some_and(|r| !r.append)
    }

    /// Restart the window for `filter`: offset 0, events cleared.
    ///
    /// Supersedes any request in flight.
    pub fn set_filter(&mut self, filter: Option<EventType>) -> PageRequest {
        self.filter = filter;
        self.offset = 0;
        self.events.clear();
        self.has_more = false;
        self.error = None;
        self.issue(false)
    }

    /// Re-issue the current filter from the first page.
    pub fn refresh(&mut self) -> PageRequest {
        self.set_filter(self.filter.clone())
    }

    /// Advance the window by one page.
    ///
    /// Returns `None`, issuing nothing, when there is nothing more to load or
    /// a request is already in flight.
    pub fn load_more(&mut self) -> Option<PageRequest> {
        if !self.has_more || self.in_flight.is_some() {
            return None;
        }
        self.offset += self.limit;
        self.error = None;
        Some(self.issue(true))
    }

    /// Apply the outcome of a page request.
    ///
    /// Returns `false` when the page answers a superseded request and was
    /// discarded.
    pub fn apply_page(&mut self, request_id: u64, result: Result<ActivityPage, ApiError>) -> bool {
        let request = match &self.in_flight {
            Some(request) if request.request_id == request_id => request.clone(),
            _ => {
                tracing::debug!("Discarding superseded activity page {}", request_id);
                return false;
            }
        };
        self.in_flight = None;

        match result {
            Ok(page) => {
                self.has_more = page.events.len() == self.limit as usize;
                if request.append {
                    self.events.extend(page.events);
                } else {
                    self.events = page.events;
                }
                self.error = None;
            }
            Err(e) => {
                if request.append {
                    // Roll back so the same page can be requested again.
                    self.offset = self.offset.saturating_sub(self.limit);
                }
                self.error = Some(e.user_message());
            }
        }
        true
    }

    fn issue(&mut self, append: bool) -> PageRequest {
        self.next_request_id += 1;
        let request = PageRequest {
            request_id: self.next_request_id,
            limit: self.limit,
            offset: self.offset,
            filter: self.filter.clone(),
            append,
        };
        self.in_flight = Some(request.clone());
        request
    }
}

impl Default for ActivityWindow {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// Next filter in the cycle: all, then each filterable type, then all again.
pub fn next_filter(current: Option<&EventType>) -> Option<EventType> {
    match current {
        None => EventType::FILTERABLE.first().cloned(),
        Some(current) => {
            let position = EventType::FILTERABLE.iter().position(|t| t == current)?;
            EventType::FILTERABLE.get(position + 1).cloned()
        }
    }
}
