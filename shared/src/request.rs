//! Request types for the shared crate
//!
//! Paging parameters shared by the list endpoints

/// Pagination query parameters (`?page=2&limit=12`)
///
/// Both values are optional; each endpoint supplies its own default and
/// upper bound for `limit`.
#[derive(Debug, Clone, Copy, Default, serde::Deserialize)]
pub struct PaginationQuery {
    /// Page number (1-based)
    pub page: Option<u32>,
    /// Items per page
    pub limit: Option<u32>,
}

impl PaginationQuery {
    /// Page number, at least 1
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// Page size clamped to `1..=max`, `default` when absent
    pub fn limit(&self, default: u32, max: u32) -> u32 {
        self.limit.unwrap_or(default).clamp(1, max)
    }

    /// Row offset for the given page size
    pub fn offset(&self, limit: u32) -> u64 {
        u64::from(self.page() - 1) * u64::from(limit)
    }
}

/// Optional number from a query string; a blank value counts as absent
///
/// Use with `#[serde(default, deserialize_with = "...")]`. Accepts a JSON
/// number too. Values that do not parse to a finite number are errors.
pub fn blank_as_none_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    let value = match Option::<Raw>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(Raw::Number(n)) => n,
        Some(Raw::Text(s)) if s.trim().is_empty() => return Ok(None),
        Some(Raw::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| D::Error::custom(format!("invalid number: {s}")))?,
    };
    if !value.is_finite() {
        return Err(D::Error::custom("number must be finite"));
    }
    Ok(Some(value))
}

/// Number of pages needed to show `total` rows at `limit` per page
pub fn page_count(total: i64, limit: u32) -> u32 {
    if total <= 0 || limit == 0 {
        return 0;
    }
    let total = total as u64;
    let limit = u64::from(limit);
    total.div_ceil(limit) as u32
}
