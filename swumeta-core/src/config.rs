use serde::{Serialize, Deserialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SChartOptions {
    pub title: String,
    pub value_label: String,
    pub dynamic_height: bool,
}

/// Caller-supplied chart options. Every field left as `None` keeps the default.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SChartOptionsOverride {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub value_label: Option<String>,
    #[serde(default)]
    pub dynamic_height: Option<bool>,
}

impl Default for SChartOptions {
    fn default() -> Self {
        Self {
            title: String::from("Untitled"),
            value_label: String::from("Value"),
            dynamic_height: true,
        }
    }
}

impl SChartOptions {
    pub fn merged(overrides: &SChartOptionsOverride) -> Self {
        let defaults = Self::default();

        Self {
            title: overrides.title.clone().unwrap_or(defaults.title),
            value_label: overrides.value_label.clone().unwrap_or(defaults.value_label),
            dynamic_height: overrides.dynamic_height.unwrap_or(defaults.dynamic_height),
        }
    }
}

impl SChartOptionsOverride {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, val: &str) -> Self {
        self.title = Some(String::from(val));
        self
    }

    pub fn value_label(mut self, val: &str) -> Self {
        self.value_label = Some(String::from(val));
        self
    }

    pub fn dynamic_height(mut self, val: bool) -> Self {
        self.dynamic_height = Some(val);
        self
    }
}
