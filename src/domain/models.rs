use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Storage key holding the serialized menu collection.
pub const MENU_KEY: &str = "menuItems";
/// Storage key holding the serialized history collection.
pub const HISTORY_KEY: &str = "history";

/// Category partitioning the dishes on the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Course {
    Starters,
    Mains,
    Desserts,
}

impl Course {
    pub const ALL: [Course; 3] = [Course::Starters, Course::Mains, Course::Desserts];

    pub fn label(&self) -> &'static str {
        match self {
            Course::Starters => "Starters",
            Course::Mains => "Mains",
            Course::Desserts => "Desserts",
        }
    }

    /// Parses a course label exactly as it is stored.
    pub fn from_label(label: &str) -> Option<Course> {
        Self::ALL.into_iter().find(|course| course.label() == label)
    }

    /// Cycles through the optional course slots: unset, Starters, Mains, Desserts.
    pub fn cycle_next(current: Option<Course>) -> Option<Course> {
        match current {
            None => Some(Course::Starters),
            Some(Course::Starters) => Some(Course::Mains),
            Some(Course::Mains) => Some(Course::Desserts),
            Some(Course::Desserts) => None,
        }
    }

    pub fn cycle_prev(current: Option<Course>) -> Option<Course> {
        match current {
            None => Some(Course::Desserts),
            Some(Course::Desserts) => Some(Course::Mains),
            Some(Course::Mains) => Some(Course::Starters),
            Some(Course::Starters) => None,
        }
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single entry on the menu.
///
/// Dishes have no identifier of their own: a dish is addressed by its
/// position in the menu collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(
        default,
        serialize_with = "serialize_course",
        deserialize_with = "deserialize_course"
    )]
    pub course: Option<Course>,
    #[serde(deserialize_with = "deserialize_price")]
    pub price: f64,
    #[serde(rename = "imageUri", default, skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
}

/// Unvalidated dish input as typed by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DishDraft {
    pub name: String,
    pub description: String,
    pub course: Option<Course>,
    pub price: String,
    pub image_uri: Option<String>,
}

impl DishDraft {
    pub fn new(name: &str, description: &str, course: Option<Course>, price: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            course,
            price: price.to_string(),
            image_uri: None,
        }
    }

    pub fn with_image(mut self, image_uri: &str) -> Self {
        self.image_uri = Some(image_uri.to_string());
        self
    }
}

/// Immutable record of a past menu action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: String,
    pub action: String,
}

impl HistoryEntry {
    pub fn new(timestamp: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            action: action.into(),
        }
    }
}

fn serialize_course<S>(course: &Option<Course>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(course.map(|c| c.label()).unwrap_or(""))
}

// Older payloads store an unset course as "" or null.
fn deserialize_course<'de, D>(deserializer: D) -> Result<Option<Course>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(label) => Course::from_label(label)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown course: {}", label))),
    }
}

fn deserialize_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPrice {
        Number(f64),
        Text(String),
    }

    let price = match RawPrice::deserialize(deserializer)? {
        RawPrice::Number(n) => n,
        RawPrice::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid price: {}", text)))?,
    };

    if price.is_finite() && price > 0.0 {
        Ok(price)
    } else {
        Err(serde::de::Error::custom(format!("price must be positive: {}", price)))
    }
}
