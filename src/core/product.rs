use std::borrow::Cow;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::utils::text::normalize;

/// Additive tags as they appear in catalog data.
///
/// Source datasets store `additives_tags` as a list, as a single string, or
/// not at all. Any other JSON shape is treated as [`AdditiveTags::Absent`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AdditiveTags {
    Sequence(Vec<String>),
    Scalar(String),
    #[default]
    Absent,
}

impl AdditiveTags {
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// True when there are no tags to show or search
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Sequence(tags) => tags.iter().all(|tag| tag.trim().is_empty()),
            Self::Scalar(tag) => tag.trim().is_empty(),
            Self::Absent => true,
        }
    }

    /// Normalized additive text: each tag normalized, joined with a single space
    #[must_use]
    pub fn normalized(&self) -> String {
        match self {
            Self::Sequence(tags) => tags
                .iter()
                .map(|tag| normalize(tag))
                .collect::<Vec<_>>()
                .join(" "),
            Self::Scalar(tag) => normalize(tag),
            Self::Absent => String::new(),
        }
    }

    fn from_json_value(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Array(items) => Self::Sequence(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        serde_json::Value::String(tag) => Some(tag),
                        _ => None,
                    })
                    .collect(),
            ),
            serde_json::Value::String(tag) => Self::Scalar(tag),
            _ => Self::Absent,
        }
    }
}

/// Tags as listed, comma-separated for the list form
impl std::fmt::Display for AdditiveTags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sequence(tags) => write!(f, "{}", tags.join(", ")),
            Self::Scalar(tag) => write!(f, "{tag}"),
            Self::Absent => Ok(()),
        }
    }
}

impl Serialize for AdditiveTags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Sequence(tags) => tags.serialize(serializer),
            Self::Scalar(tag) => serializer.serialize_str(tag),
            Self::Absent => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for AdditiveTags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Self::from_json_value(value))
    }
}

/// A product from the reference catalog.
///
/// Field names on the wire follow the catalog dataset (`product_name`,
/// `brands`, `additives_tags`, ...). Display fields accept strings, numbers or
/// `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Barcode as stored in the catalog, padding and all
    #[serde(default, deserialize_with = "lenient::string")]
    pub code: String,

    #[serde(rename = "product_name", default, deserialize_with = "lenient::string")]
    pub name: String,

    #[serde(rename = "brands", default, deserialize_with = "lenient::string")]
    pub brand: String,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::optional_string"
    )]
    ingredients_text: Option<String>,

    #[serde(
        rename = "additives_tags",
        default,
        skip_serializing_if = "AdditiveTags::is_absent"
    )]
    additive_tags: AdditiveTags,

    #[serde(
        rename = "nutriscore_grade",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::optional_string"
    )]
    pub nutri_score_grade: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::optional_string"
    )]
    pub nova_group: Option<String>,

    #[serde(
        rename = "recommended",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::optional_string"
    )]
    pub recommended_note: Option<String>,

    #[serde(
        rename = "alert",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::optional_string"
    )]
    pub alert_note: Option<String>,

    // === Pre-computed for classification (populated on load) ===
    /// Normalized ingredient + additive text. Only ever set from the two
    /// private fields above, which change solely through the builder methods.
    #[serde(skip)]
    search_corpus: Option<String>,
}

impl ProductRecord {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            ..Self::default()
        }
        .with_rebuilt_corpus()
    }

    #[must_use]
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    #[must_use]
    pub fn with_ingredients(mut self, text: impl Into<String>) -> Self {
        self.ingredients_text = Some(text.into());
        self.with_rebuilt_corpus()
    }

    #[must_use]
    pub fn with_additive_tags(mut self, tags: AdditiveTags) -> Self {
        self.additive_tags = tags;
        self.with_rebuilt_corpus()
    }

    fn with_rebuilt_corpus(mut self) -> Self {
        self.rebuild_corpus();
        self
    }

    /// Ingredient text as listed in the catalog
    #[must_use]
    pub fn ingredients_text(&self) -> Option<&str> {
        self.ingredients_text.as_deref()
    }

    /// Additive tags as listed in the catalog
    #[must_use]
    pub fn additive_tags(&self) -> &AdditiveTags {
        &self.additive_tags
    }

    pub(crate) fn rebuild_corpus(&mut self) {
        self.search_corpus = Some(self.compute_corpus());
    }

    /// Normalized ingredient text and additive text separated by one space.
    ///
    /// Uses the cached corpus when the record came through the catalog or the
    /// builder methods; a freshly deserialized record computes it on the spot.
    #[must_use]
    pub fn search_corpus(&self) -> Cow<'_, str> {
        match &self.search_corpus {
            Some(corpus) => Cow::Borrowed(corpus.as_str()),
            None => Cow::Owned(self.compute_corpus()),
        }
    }

    fn compute_corpus(&self) -> String {
        let ingredients = normalize(self.ingredients_text.as_deref().unwrap_or(""));
        format!("{ingredients} {}", self.additive_tags.normalized())
    }

    /// Name for display, falling back to the code when the catalog has none
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.code
        } else {
            &self.name
        }
    }
}

/// Deserializers that accept whatever scalar the dataset happens to hold.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(optional_string(deserializer)?.unwrap_or_default())
    }

    pub fn optional_string<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        })
    }
}
