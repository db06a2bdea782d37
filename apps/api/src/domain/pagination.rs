use serde::{Deserialize, Serialize};

pub const MAX_PAGE_SIZE: i64 = 100;

/// Normalised page request (1-based page number)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    /// Builds a page request, clamping out-of-range values
    ///
    /// # Example
    /// ```
    /// use portfolio_api::domain::pagination::PageRequest;
    ///
    /// let page = PageRequest::new(Some(0), Some(500), 10);
    /// assert_eq!(page.page, 1);
    /// assert_eq!(page.limit, 100);
    /// ```
    pub fn new(page: Option<i64>, limit: Option<i64>, default_limit: i64) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(default_limit).clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Row offset of the page, saturating for absurd page numbers
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    pub fn total_pages(&self, total: i64) -> i64 {
        (total + self.limit - 1) / self.limit
    }
}

/// One page of results plus the unpaged total
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply() {
        let page = PageRequest::new(None, None, 20);
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 20);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn offset_for_later_pages() {
        let page = PageRequest::new(Some(3), Some(10), 10);
        assert_eq!(page.offset(), 20);
    }

    #[test]
    fn huge_page_saturates_offset() {
        let page = PageRequest::new(Some(i64::MAX), Some(10), 10);
        assert_eq!(page.offset(), i64::MAX);
        assert_eq!(PageRequest::new(Some(i64::MIN), None, 10).offset(), 0);
    }

    #[test]
    fn limit_is_clamped() {
        assert_eq!(PageRequest::new(None, Some(0), 10).limit, 1);
        assert_eq!(PageRequest::new(None, Some(-4), 10).limit, 1);
        assert_eq!(PageRequest::new(None, Some(1000), 10).limit, MAX_PAGE_SIZE);
    }

    #[test]
    fn total_pages_rounds_up() {
        let page = PageRequest::new(None, Some(10), 10);
        assert_eq!(page.total_pages(0), 0);
        assert_eq!(page.total_pages(10), 1);
        assert_eq!(page.total_pages(11), 2);
    }

    #[test]
    fn sort_order_parsing() {
        assert_eq!(SortOrder::parse(Some("asc")), SortOrder::Asc);
        assert_eq!(SortOrder::parse(Some("desc")), SortOrder::Desc);
        assert_eq!(SortOrder::parse(Some("sideways")), SortOrder::Desc);
        assert_eq!(SortOrder::parse(None), SortOrder::Desc);
    }
}
