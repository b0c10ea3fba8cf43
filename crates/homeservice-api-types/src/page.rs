use serde::{Deserialize, Serialize};

/// Pagination metadata attached to list responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pagination {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

/// One page of a paginated list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Builds a page from bare items plus optional metadata; missing metadata
    /// describes a single page holding every item.
    pub fn from_parts(items: Vec<T>, pagination: Option<Pagination>) -> Self {
        match pagination {
            Some(p) => Self {
                items,
                total: p.total,
                page: p.page,
                limit: p.limit,
                total_pages: p.total_pages,
            },
            None => {
                let len = items.len();
                Self {
                    items,
                    total: len as u64,
                    page: 1,
                    limit: u32::try_from(len).unwrap_or(u32::MAX),
                    total_pages: 1,
                }
            }
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}
