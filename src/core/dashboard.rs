use crate::core::charts::{self, Figure};
use crate::core::{LaunchTable, PayloadRange, SiteSelection, ALL_SITES};
use crate::utils::error::{DashError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const DASHBOARD_TITLE: &str = "SpaceX Launch Records Dashboard";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderSettings {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub mark_step: f64,
}

impl Default for SliderSettings {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 10000.0,
            step: 1000.0,
            mark_step: 2500.0,
        }
    }
}

/// 滑桿刻度數量上限
pub const MAX_SLIDER_MARKS: usize = 1000;

impl SliderSettings {
    /// Number of marks between `min` and `max` (inclusive of `max`), or
    /// `None` when the bounds or the mark step cannot produce a finite set.
    pub fn mark_count(&self) -> Option<usize> {
        if !self.min.is_finite()
            || !self.max.is_finite()
            || !self.mark_step.is_finite()
            || self.mark_step <= 0.0
            || self.max < self.min
        {
            return None;
        }

        let steps = ((self.max - self.min) / self.mark_step).ceil();
        if !steps.is_finite() || steps > MAX_SLIDER_MARKS as f64 {
            return None;
        }
        Some(steps as usize + 1)
    }

    /// 刻度從 `min` 開始，每 `mark_step` 一個，最後一個一定是 `max`。
    /// 超過 `MAX_SLIDER_MARKS` 時只保留兩端。
    pub fn marks(&self) -> Vec<SliderMark> {
        let Some(count) = self.mark_count() else {
            return if self.min.is_finite() && self.max.is_finite() && self.min <= self.max {
                vec![SliderMark::new(self.min), SliderMark::new(self.max)]
            } else {
                Vec::new()
            };
        };

        let mut marks: Vec<SliderMark> = (0..count.saturating_sub(1))
            .map(|i| self.min + i as f64 * self.mark_step)
            .filter(|value| *value < self.max)
            .map(SliderMark::new)
            .collect();
        marks.push(SliderMark::new(self.max));
        marks
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderMark {
    pub value: f64,
    pub label: String,
}

impl SliderMark {
    fn new(value: f64) -> Self {
        Self {
            value,
            label: format!("{}", value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingStyle {
    pub text_align: String,
    pub color: String,
    pub font_size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropdownLayout {
    pub id: String,
    pub options: Vec<DropdownOption>,
    pub value: String,
    pub placeholder: String,
    pub searchable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderLayout {
    pub id: String,
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub marks: Vec<SliderMark>,
    pub value: [f64; 2],
}

/// Static page description: heading, controls and chart ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardLayout {
    pub title: String,
    pub heading_style: HeadingStyle,
    pub dropdown: DropdownLayout,
    pub slider: SliderLayout,
    pub pie_chart_id: String,
    pub scatter_chart_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub rows: usize,
    pub sites: usize,
    pub successes: usize,
    pub min_payload: f64,
    pub max_payload: f64,
    pub loaded_at: DateTime<Utc>,
}

pub struct Dashboard {
    table: Arc<LaunchTable>,
    slider: SliderSettings,
    loaded_at: DateTime<Utc>,
}

impl Dashboard {
    pub fn new(table: LaunchTable, slider: SliderSettings) -> Self {
        Self {
            table: Arc::new(table),
            slider,
            loaded_at: Utc::now(),
        }
    }

    pub fn table(&self) -> &LaunchTable {
        &self.table
    }

    pub fn slider(&self) -> SliderSettings {
        self.slider
    }

    /// 滑桿初始值為資料集的最小/最大酬載
    pub fn initial_range(&self) -> PayloadRange {
        PayloadRange {
            low: self.table.min_payload(),
            high: self.table.max_payload(),
        }
    }

    pub fn dropdown_options(&self) -> Vec<DropdownOption> {
        std::iter::once(DropdownOption {
            label: "All Sites".to_string(),
            value: ALL_SITES.to_string(),
        })
        .chain(self.table.launch_sites().iter().map(|site| DropdownOption {
            label: site.clone(),
            value: site.clone(),
        }))
        .collect()
    }

    pub fn layout(&self) -> DashboardLayout {
        DashboardLayout {
            title: DASHBOARD_TITLE.to_string(),
            heading_style: HeadingStyle {
                text_align: "center".to_string(),
                color: "#503D36".to_string(),
                font_size: 40,
            },
            dropdown: DropdownLayout {
                id: "site-dropdown".to_string(),
                options: self.dropdown_options(),
                value: ALL_SITES.to_string(),
                placeholder: "Select a Launch Site here".to_string(),
                searchable: true,
            },
            slider: SliderLayout {
                id: "payload-slider".to_string(),
                label: "Payload range (Kg):".to_string(),
                min: self.slider.min,
                max: self.slider.max,
                step: self.slider.step,
                marks: self.slider.marks(),
                value: self.initial_range().as_array(),
            },
            pie_chart_id: "success-pie-chart".to_string(),
            scatter_chart_id: "success-payload-scatter-chart".to_string(),
        }
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            rows: self.table.len(),
            sites: self.table.launch_sites().len(),
            successes: self.table.success_count(),
            min_payload: self.table.min_payload(),
            max_payload: self.table.max_payload(),
            loaded_at: self.loaded_at,
        }
    }

    fn resolve_site(&self, site: Option<&str>) -> Result<SiteSelection> {
        let selection = SiteSelection::parse(site);
        if let SiteSelection::Site(name) = &selection {
            if !self.table.has_site(name) {
                return Err(DashError::UnknownSite { site: name.clone() });
            }
        }
        Ok(selection)
    }

    /// Recomputes the pie chart for a dropdown value.
    pub fn update_pie(&self, site: Option<&str>) -> Result<Figure> {
        let selection = self.resolve_site(site)?;
        tracing::debug!("Updating pie chart for {:?}", selection);
        Ok(charts::pie_chart(&self.table, &selection))
    }

    /// Recomputes the scatter chart for a dropdown value and payload range.
    /// Without a range the slider's initial value is used.
    pub fn update_scatter(
        &self,
        site: Option<&str>,
        range: Option<PayloadRange>,
    ) -> Result<Figure> {
        let selection = self.resolve_site(site)?;
        let range = range.unwrap_or_else(|| self.initial_range());
        tracing::debug!(
            "Updating scatter chart for {:?} with range [{}, {}]",
            selection,
            range.low,
            range.high
        );
        Ok(charts::scatter_chart(&self.table, &selection, range))
    }
}
