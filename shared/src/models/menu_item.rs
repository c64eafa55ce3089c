//! Menu Item Model

use serde::{Deserialize, Serialize};

/// Menu category (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum MenuCategory {
    Appetizers,
    Starters,
    Mains,
    Desserts,
    Beverages,
}

impl MenuCategory {
    pub const ALL: [MenuCategory; 5] = [
        MenuCategory::Appetizers,
        MenuCategory::Starters,
        MenuCategory::Mains,
        MenuCategory::Desserts,
        MenuCategory::Beverages,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MenuCategory::Appetizers => "appetizers",
            MenuCategory::Starters => "starters",
            MenuCategory::Mains => "mains",
            MenuCategory::Desserts => "desserts",
            MenuCategory::Beverages => "beverages",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

/// Spice level (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum SpiceLevel {
    #[default]
    Mild,
    Medium,
    Hot,
}

impl SpiceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpiceLevel::Mild => "mild",
            SpiceLevel::Medium => "medium",
            SpiceLevel::Hot => "hot",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        [SpiceLevel::Mild, SpiceLevel::Medium, SpiceLevel::Hot]
            .into_iter()
            .find(|s| s.as_str() == value)
    }
}

/// Review embedded in a menu item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i64,
    /// Reviewer user ID
    #[cfg_attr(feature = "db", sqlx(rename = "user_id"))]
    pub user: i64,
    pub rating: i64,
    pub comment: Option<String>,
    pub created_at: i64,
}

/// Reviewer identity resolved for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reviewer {
    pub id: i64,
    pub email: String,
}

/// Review with the reviewer resolved (`GET /menu/{id}/reviews`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDetail {
    pub id: i64,
    /// `None` if the reviewer account no longer resolves
    pub user: Option<Reviewer>,
    pub rating: i64,
    pub comment: Option<String>,
    pub created_at: i64,
}

/// Menu item as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub category: MenuCategory,
    pub subcategory: Option<String>,
    pub image: Option<String>,
    pub ingredients: Vec<String>,
    pub spice_level: SpiceLevel,
    pub dietary: Vec<String>,
    pub preparation_time: Option<String>,
    pub reviews: Vec<Review>,
    /// Number of reviews (computed on read)
    pub review_count: usize,
    /// Mean rating rounded to 1 decimal, `None` without reviews (computed on read)
    pub average_rating: Option<f64>,
    pub created_at: i64,
}

impl MenuItem {
    /// Refresh `review_count` and `average_rating` from `reviews`
    pub fn compute_rating(&mut self) {
        self.review_count = self.reviews.len();
        self.average_rating = if self.reviews.is_empty() {
            None
        } else {
            let sum: i64 = self.reviews.iter().map(|r| r.rating).sum();
            let mean = sum as f64 / self.reviews.len() as f64;
            Some((mean * 10.0).round() / 10.0)
        };
    }
}

/// Create menu item payload
///
/// Enumerated fields arrive as plain strings so that unknown values can be
/// reported with a field-specific message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemCreate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub image: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub spice_level: Option<String>,
    pub dietary: Option<Vec<String>>,
    pub preparation_time: Option<String>,
}

/// Update menu item payload; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub image: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub spice_level: Option<String>,
    pub dietary: Option<Vec<String>>,
    pub preparation_time: Option<String>,
}

/// Add review payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewCreate {
    pub rating: Option<f64>,
    pub comment: Option<String>,
}

/// Query for `GET /menu`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuQuery {
    /// Case-insensitive substring of the item name
    pub name: Option<String>,
    /// Inclusive price upper bound; `maxPrice=` is ignored
    #[serde(default, deserialize_with = "crate::request::blank_as_none_f64")]
    pub max_price: Option<f64>,
    /// Exact category, `all` disables the filter
    pub category: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl MenuQuery {
    pub fn pagination(&self) -> crate::request::PaginationQuery {
        crate::request::PaginationQuery {
            page: self.page,
            limit: self.limit,
        }
    }
}

/// `POST /menu` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemEnvelope {
    pub item: MenuItem,
}

/// Paginated menu listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuPage {
    pub items: Vec<MenuItem>,
    pub total: i64,
    pub page: u32,
    pub pages: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(rating: i64) -> Review {
        Review {
            id: rating,
            user: 1,
            rating,
            comment: None,
            created_at: 0,
        }
    }

    fn item(reviews: Vec<Review>) -> MenuItem {
        MenuItem {
            id: 1,
            name: "Tiramisu".into(),
            price: 7.0,
            description: None,
            category: MenuCategory::Desserts,
            subcategory: None,
            image: None,
            ingredients: vec![],
            spice_level: SpiceLevel::default(),
            dietary: vec![],
            preparation_time: None,
            reviews,
            review_count: 0,
            average_rating: None,
            created_at: 0,
        }
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(MenuCategory::parse("mains"), Some(MenuCategory::Mains));
        assert_eq!(MenuCategory::parse("Mains"), None);
        assert_eq!(MenuCategory::parse("all"), None);
        assert_eq!(
            serde_json::to_string(&MenuCategory::Beverages).unwrap(),
            "\"beverages\""
        );
    }

    #[test]
    fn test_spice_level() {
        assert_eq!(SpiceLevel::default(), SpiceLevel::Mild);
        assert_eq!(SpiceLevel::parse("hot"), Some(SpiceLevel::Hot));
        assert_eq!(SpiceLevel::parse("extra"), None);
    }

    #[test]
    fn test_compute_rating() {
        let mut empty = item(vec![]);
        empty.compute_rating();
        assert_eq!(empty.review_count, 0);
        assert_eq!(empty.average_rating, None);

        let mut rated = item(vec![review(5), review(4), review(4)]);
        rated.compute_rating();
        assert_eq!(rated.review_count, 3);
        assert_eq!(rated.average_rating, Some(4.3));
    }

    #[test]
    fn test_menu_query_camel_case() {
        let q: MenuQuery =
            serde_json::from_str(r#"{"maxPrice":20.5,"category":"all","limit":3}"#).unwrap();
        assert_eq!(q.max_price, Some(20.5));
        assert_eq!(q.pagination().limit(12, 500), 3);
    }

    #[test]
    fn test_menu_query_blank_max_price_is_absent() {
        let q: MenuQuery = serde_json::from_str(r#"{"maxPrice":""}"#).unwrap();
        assert_eq!(q.max_price, None);
        let q: MenuQuery = serde_json::from_str(r#"{"maxPrice":"  "}"#).unwrap();
        assert_eq!(q.max_price, None);
        let q: MenuQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(q.max_price, None);

        let q: MenuQuery = serde_json::from_str(r#"{"maxPrice":"12.5"}"#).unwrap();
        assert_eq!(q.max_price, Some(12.5));

        assert!(serde_json::from_str::<MenuQuery>(r#"{"maxPrice":"cheap"}"#).is_err());
        assert!(serde_json::from_str::<MenuQuery>(r#"{"maxPrice":"NaN"}"#).is_err());
    }
}
