use serde::Deserialize;

use crate::core::{AppError, Result};

const MAX_PAGE_SIZE: i64 = 200;

/// Pagination query parameters shared by list endpoints
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

impl ListQuery {
    /// Validated (limit, offset)
    pub fn bounds(&self) -> Result<(i64, i64)> {
        if self.limit < 1 || self.limit > MAX_PAGE_SIZE {
            return Err(AppError::validation(format!(
                "limit must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, self.limit
            )));
        }
        if self.offset < 0 {
            return Err(AppError::validation("offset cannot be negative"));
        }
        Ok((self.limit, self.offset))
    }
}
