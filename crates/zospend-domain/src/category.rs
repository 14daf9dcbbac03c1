//! Closed set of expense categories.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Categorises expenses for grouping and reporting.
///
/// Declaration order is the canonical ordering used wherever categories are
/// listed (grouped lists, report breakdowns). Presentation attributes such as
/// icons and colours belong to the UI layer and are not modelled here.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Staff,
    Travel,
    #[default]
    Food,
    Utility,
}

impl Category {
    /// Every category in canonical order.
    pub const ALL: [Category; 4] = [
        Category::Staff,
        Category::Travel,
        Category::Food,
        Category::Utility,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Staff => "Staff",
            Category::Travel => "Travel",
            Category::Food => "Food",
            Category::Utility => "Utility",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_follows_declaration() {
        let mut shuffled = vec![
            Category::Utility,
            Category::Staff,
            Category::Food,
            Category::Travel,
        ];
        shuffled.sort();
        assert_eq!(shuffled, Category::ALL.to_vec());
    }

    #[test]
    fn serializes_as_uppercase_code() {
        let json = serde_json::to_string(&Category::Staff).unwrap();
        assert_eq!(json, "\"STAFF\"");
        let parsed: Category = serde_json::from_str("\"UTILITY\"").unwrap();
        assert_eq!(parsed, Category::Utility);
    }
}
