use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Stable,
    Declining,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Trend::Improving => "improving",
            Trend::Stable => "stable",
            Trend::Declining => "declining",
        };
        f.write_str(label)
    }
}

/// Mean category score (0-10 scale) keyed by display name.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryAverage {
    pub display_name: String,
    pub average: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyAnalytics {
    pub listing_id: String,
    pub listing_name: String,
    pub total_reviews: usize,
    pub average_rating: f64,
    /// First-seen category order; serialized as a JSON object.
    #[serde(with = "category_map")]
    pub category_averages: Vec<CategoryAverage>,
    pub rating_distribution: BTreeMap<u8, usize>,
    pub recent_trend: Trend,
    pub top_issues: Vec<String>,
    pub approved_count: usize,
    pub channel_breakdown: BTreeMap<String, usize>,
}

/// Serializes `Vec<CategoryAverage>` as an insertion-ordered JSON object.
pub mod category_map {
    use super::CategoryAverage;
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S>(value: &[CategoryAverage], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(value.len()))?;
        for entry in value {
            map.serialize_entry(&entry.display_name, &entry.average)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<CategoryAverage>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CategoryMapVisitor;

        impl<'de> Visitor<'de> for CategoryMapVisitor {
            type Value = Vec<CategoryAverage>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of category display names to averages")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((display_name, average)) = access.next_entry::<String, f64>()? {
                    entries.push(CategoryAverage { display_name, average });
                }
                Ok(entries)
            }
        }

        deserializer.deserialize_map(CategoryMapVisitor)
    }
}
