use crate::domain::DuplicateGroup;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationDto {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_contacts: usize,
}

impl PaginationDto {
    /// Pages are 1-based; an empty list reports zero pages.
    pub fn new(current_page: usize, page_size: usize, total_contacts: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            current_page,
            total_pages: total_contacts.div_ceil(page_size),
            total_contacts,
        }
    }

    /// Index range of `current_page` within the full list, clamped to its length.
    pub fn page_bounds(&self, page_size: usize) -> (usize, usize) {
        let page_size = page_size.max(1);
        let start = self
            .current_page
            .saturating_sub(1)
            .saturating_mul(page_size)
            .min(self.total_contacts);
        let end = start.saturating_add(page_size).min(self.total_contacts);
        (start, end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReportDto {
    pub groups: Vec<DuplicateGroup>,
    pub pagination: PaginationDto,
}
