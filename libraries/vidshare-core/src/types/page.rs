/// Offset pagination
use crate::error::{CoreError, Result};

/// Validated page request (1-based page number, positive page size)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> Result<Self> {
        if page == 0 {
            return Err(CoreError::invalid_input("page must be a positive integer"));
        }
        if limit == 0 {
            return Err(CoreError::invalid_input("limit must be a positive integer"));
        }
        Ok(Self { page, limit })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of rows to skip
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }

    /// Total page count for `total` matching rows
    pub fn pages_for(&self, total: u64) -> u32 {
        page_count(total, self.limit)
    }
}

/// `ceil(total / limit)`, saturating at `u32::MAX`
pub fn page_count(total: u64, limit: u32) -> u32 {
    if limit == 0 {
        return 0;
    }
    u32::try_from(total.div_ceil(u64::from(limit))).unwrap_or(u32::MAX)
}
