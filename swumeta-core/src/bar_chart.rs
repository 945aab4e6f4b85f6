use std::cell::Cell;
use std::fmt::Write;
use std::rc::Rc;

use serde::{Serialize, Deserialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::{parse_payload, SSeriesItem, SSeriesPayload};
use crate::config::{SChartOptions, SChartOptionsOverride};
use crate::error::{EWidgetError, WidgetResult};
use crate::ports::{SListenerId, TChartWidget, TElement, TJsonFetcher, TPage};

pub const BACKGROUND_COLOR: &str = "#121212";
pub const ACCENT_COLOR: &str = "#b03a2e";
pub const SUBTITLE: &str = "swumeta.net";

// -- above this many bars each row gets less room so long lists stay on screen
const ROOMY_MAX_ITEMS: usize = 32;
const ROOMY_ROW_PX: usize = 40;
const ROOMY_PADDING_PX: usize = 10;
const COMPACT_ROW_PX: usize = 30;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SLoadingOptions {
    pub mask_color: String,
    pub text_color: String,
}

/// The fetched series split into the parallel arrays the chart axes take.
#[derive(Clone, Debug, PartialEq)]
pub struct SSeriesData {
    pub names: Vec<String>,
    pub values: Vec<f64>,
    pub total: f64,
}

#[derive(Clone, Debug)]
pub struct STooltipFormatter {
    value_label: String,
    data: Rc<SSeriesData>,
}

pub struct SBarChart<P: TPage> {
    container: P::Element,
    chart: P::Chart,
    options: SChartOptions,
    resize_listener: Cell<Option<SListenerId>>,
    disposed: Cell<bool>,
}

impl Default for SLoadingOptions {
    fn default() -> Self {
        Self {
            mask_color: String::from("rgba(0,0,0,0)"),
            text_color: String::from("#fff"),
        }
    }
}

pub fn chart_height(count: usize) -> usize {
    if count > ROOMY_MAX_ITEMS {
        count * COMPACT_ROW_PX
    }
    else {
        count * ROOMY_ROW_PX + ROOMY_PADDING_PX
    }
}

/// Formats a number the way it reads in a browser: `3` not `3.0`, `NaN`, `Infinity`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        String::from("NaN")
    }
    else if value.is_infinite() {
        if value > 0.0 { String::from("Infinity") } else { String::from("-Infinity") }
    }
    else {
        format!("{}", value)
    }
}

// -- an exact tie at the second decimal is a multiple of 0.25 but not of 0.5
fn is_exact_tie(value: f64) -> bool {
    (value * 4.0).fract() == 0.0 && (value * 2.0).fract() != 0.0
}

/// `value / total * 100` to one decimal place, exact ties rounded away from zero.
/// A zero total yields `NaN` rather than failing.
pub fn format_percentage(value: f64, total: f64) -> String {
    let percentage = value / total * 100.0;
    if percentage.is_finite() {
        let rounded = if is_exact_tie(percentage) { (percentage * 10.0).round() / 10.0 } else { percentage };
        format!("{:.1}", rounded)
    }
    else {
        format_number(percentage)
    }
}

impl SSeriesData {
    pub fn from_items(items: &[SSeriesItem]) -> Self {
        let items = items.to_vec();

        let total = items.iter().map(|item| item.value).sum();
        let names = items.iter().map(|item| item.name.clone()).collect();
        let values = items.iter().map(|item| item.value).collect();

        Self {
            names,
            values,
            total,
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn percentage(&self, index: usize) -> Option<String> {
        self.values.get(index).map(|v| format_percentage(*v, self.total))
    }

    pub fn percentages(&self) -> Vec<String> {
        self.values.iter().map(|v| format_percentage(*v, self.total)).collect()
    }
}

impl STooltipFormatter {
    pub fn new(value_label: &str, data: SSeriesData) -> Self {
        Self {
            value_label: String::from(value_label),
            data: Rc::new(data),
        }
    }

    /// Tooltip markup for the bar at `index`, `None` when the index is out of range.
    pub fn format(&self, index: usize) -> Option<String> {
        let name = self.data.names.get(index)?;
        let value = self.data.values.get(index)?;
        let percentage = format_percentage(*value, self.data.total);

        let mut html = String::new();
        write!(html, "<strong style=\"color:#000\">{}</strong><br/>", name).ok()?;
        write!(html, "<span style=\"color:#000\">{}: {}</span><br/>", self.value_label, format_number(*value)).ok()?;
        write!(html, "<span style=\"color:#000\">Percentage: {}%</span>", percentage).ok()?;

        Some(html)
    }
}

/// The chart specification applied before any data arrives.
pub fn base_option(options: &SChartOptions) -> Value {
    json!({
        "tooltip": {
            "trigger": "axis",
            "axisPointer": {
                "type": "shadow",
            },
        },
        "title": {
            "text": options.title,
            "subtext": SUBTITLE,
            "left": "center",
            "textStyle": {
                "color": "#ffffff",
            },
        },
        "backgroundColor": BACKGROUND_COLOR,
        "legend": {
            "show": false,
        },
        "grid": {
            "left": "5%",
            "right": "5%",
            "bottom": "5%",
            "containLabel": true,
        },
        "xAxis": {
            "type": "value",
            "name": "",
            "nameLocation": "middle",
        },
        "yAxis": {
            "type": "category",
            "data": [],
            "axisLabel": {
                "fontSize": 13,
                "color": "#e0e0e0",
            },
        },
        "series": [
            {
                "name": options.value_label,
                "type": "bar",
                "data": [],
                "itemStyle": {
                    "color": ACCENT_COLOR,
                },
                "label": {
                    "show": true,
                    "position": "right",
                    "formatter": "{c}",
                    "color": "#fff",
                },
            },
        ],
    })
}

pub fn series_option(data: &SSeriesData) -> Value {
    json!({
        "yAxis": {
            "data": data.names,
        },
        "series": [
            {
                "data": data.values,
            },
        ],
    })
}

impl<P: TPage> SBarChart<P> {
    /// Binds a chart to the container, shows the loading overlay and applies the static option.
    pub fn new(page: &P, container_id: &str, overrides: &SChartOptionsOverride) -> WidgetResult<Self> {
        let options = SChartOptions::merged(overrides);

        let container = page.get_element_by_id(container_id)
            .ok_or_else(|| EWidgetError::ContainerNotFound(String::from(container_id)))?;

        let chart = page.init_chart(&container)?;
        chart.show_loading(&SLoadingOptions::default())?;
        chart.set_option(&base_option(&options))?;

        let resize_chart = chart.clone();
        let listener = page.add_resize_listener(Box::new(move || resize_chart.resize()))?;

        debug!(container_id, title = options.title.as_str(), "bar chart initialized");

        Ok(Self {
            container,
            chart,
            options,
            resize_listener: Cell::new(Some(listener)),
            disposed: Cell::new(false),
        })
    }

    pub fn chart(&self) -> &P::Chart {
        &self.chart
    }

    pub fn options(&self) -> &SChartOptions {
        &self.options
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    /// Fetches the series and re-renders. Nothing on the chart changes when this fails.
    pub async fn load<F: TJsonFetcher + ?Sized>(&self, fetcher: &F, data_url: &str) -> WidgetResult<SSeriesData> {
        debug!(data_url, "fetching chart data");

        let body = fetcher.get_text(data_url).await?;
        let payload : SSeriesPayload = parse_payload(&body)?;
        let data = SSeriesData::from_items(&payload.data);

        self.apply(&data)?;

        debug!(items = data.len(), total = data.total, "chart data applied");
        Ok(data)
    }

    fn apply(&self, data: &SSeriesData) -> WidgetResult<()> {
        self.chart.set_tooltip(STooltipFormatter::new(&self.options.value_label, data.clone()))?;

        if self.options.dynamic_height {
            let height = format!("{}px", chart_height(data.len()));
            self.container.set_style_property("height", height.as_str())?;
        }

        self.chart.hide_loading();
        self.chart.set_option(&series_option(data))?;
        self.chart.resize();

        Ok(())
    }

    /// Drops the resize listener and the chart widget. Safe to call more than once.
    pub fn dispose(&self, page: &P) {
        if let Some(listener) = self.resize_listener.take() {
            page.remove_resize_listener(listener);
        }

        if !self.disposed.replace(true) {
            self.chart.dispose();
        }
    }
}

/// Creates the chart, logging and returning `None` when the container does not exist.
pub fn create_horizontal_bar_chart<P: TPage>(page: &P, container_id: &str, overrides: &SChartOptionsOverride) -> Option<SBarChart<P>> {
    match SBarChart::new(page, container_id, overrides) {
        Ok(chart) => Some(chart),
        Err(e) => {
            warn!(container_id, error = %e, "could not create bar chart");
            page.log_error(e.to_string().as_str());
            None
        }
    }
}

/// Loads data into a chart made by `create_horizontal_bar_chart`. Failures are logged and
/// leave the loading overlay up.
pub async fn load_bar_chart_data<P, F>(page: &P, chart: &SBarChart<P>, fetcher: &F, data_url: &str) -> Option<SSeriesData>
where
    P: TPage,
    F: TJsonFetcher + ?Sized,
{
    match chart.load(fetcher, data_url).await {
        Ok(data) => Some(data),
        Err(e) => {
            warn!(data_url, error = %e, "failed to load chart data");
            page.log_error(format!("Failed to load chart data: {} {}", e.status_text(), e).as_str());
            None
        }
    }
}
