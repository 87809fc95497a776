use chrono::{DateTime, NaiveDate, Utc};
use egui::Color32;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A construction project; its tasks live in the owning [`super::Schedule`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub description: String,
    pub planned_start: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Project {
    pub fn new(name: impl Into<String>, planned_start: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            address: String::new(),
            description: String::new(),
            planned_start,
            created_at: Utc::now(),
        }
    }
}

/// An assignee. Each subcontractor gets one row on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subcontractor {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub trade: String,
    /// Bar color for this subcontractor's tasks (stored as RGBA).
    #[serde(with = "color_serde", default = "default_color")]
    pub color: Color32,
}

impl Subcontractor {
    pub fn new(project_id: Uuid, name: impl Into<String>, trade: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_id,
            name: name.into(),
            trade: trade.into(),
            color: default_color(),
        }
    }
}

fn default_color() -> Color32 {
    Color32::from_rgb(37, 99, 235)
}

/// Serde helper for `Color32`.
mod color_serde {
    use egui::Color32;
    use serde::{self, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(color: &Color32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        [color.r(), color.g(), color.b(), color.a()].serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Color32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let [r, g, b, a]: [u8; 4] = Deserialize::deserialize(deserializer)?;
        Ok(Color32::from_rgba_premultiplied(r, g, b, a))
    }
}
