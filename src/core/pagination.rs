// Page-spec handling shared by every resource.
//
// Paging and ordering are delegated to the store; this layer only validates
// the caller-supplied spec (page index, size, sort field, direction) and
// wraps the store's rows plus total count into a Page response.

use serde::{Deserialize, Serialize};

use crate::core::error::{AppError, Result};

pub const DEFAULT_PAGE_SIZE: u32 = 12;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Sort direction for paged listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl Default for SortDirection {
    fn default() -> Self {
        SortDirection::Asc
    }
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Query parameters accepted by every paged list endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_size")]
    pub size: u32,
    pub sort: Option<String>,
    #[serde(default)]
    pub direction: SortDirection,
}

fn default_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: None,
            direction: SortDirection::Asc,
        }
    }
}

/// Validated page spec handed to repositories
#[derive(Debug, Clone)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort_column: &'static str,
    pub direction: SortDirection,
}

impl PageRequest {
    /// Validate a raw query against the resource's sortable columns.
    ///
    /// `columns` maps accepted sort-field names to the actual column; the
    /// first entry is the default ordering. An unknown sort field is a
    /// caller error, not a silent fallback.
    pub fn from_query(query: &PageQuery, columns: &[(&str, &'static str)]) -> Result<Self> {
        if query.size == 0 {
            return Err(AppError::validation("Page size must be greater than 0"));
        }

        let sort_column = match &query.sort {
            Some(field) => columns
                .iter()
                .find(|(name, _)| *name == field.as_str())
                .map(|(_, col)| *col)
                .ok_or_else(|| {
                    AppError::validation(format!("Unsupported sort field '{}'", field))
                })?,
            None => {
                columns
                    .first()
                    .map(|(_, col)| *col)
                    .ok_or_else(|| AppError::internal("No sortable columns declared"))?
            }
        };

        Ok(Self {
            page: query.page,
            size: query.size.min(MAX_PAGE_SIZE),
            sort_column,
            direction: query.direction,
        })
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.size)
    }
}

/// One page of results, mirroring the store's total row count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: i64) -> Self {
        let size = i64::from(request.size);
        let total_pages = if total_elements == 0 {
            0
        } else {
            (total_elements + size - 1) / size
        };

        Self {
            content,
            page: request.page,
            size: request.size,
            total_elements,
            total_pages,
        }
    }

    /// Map page content to another type, keeping the page metadata
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}
