//! Plotly-compatible figure descriptions for the two dashboard charts.
//!
//! Figures serialize to the `{"data": [...], "layout": {...}}` shape that
//! `Plotly.react` accepts directly.

use crate::core::{LaunchTable, PayloadRange, SiteSelection};
use serde::{Deserialize, Serialize};

pub const PAYLOAD_AXIS_TITLE: &str = "Payload Mass (kg)";
pub const SUCCESS_AXIS_TITLE: &str = "Success Rate";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: FigureLayout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Pie {
        labels: Vec<String>,
        values: Vec<f64>,
        name: String,
    },
    Scatter {
        x: Vec<f64>,
        y: Vec<f64>,
        mode: String,
        name: String,
        legendgroup: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureLayout {
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub title: Title,
}

impl Title {
    fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Figure {
    pub fn title(&self) -> &str {
        &self.layout.title.text
    }
}

/// Pie chart of successes.
///
/// For `All`, one slice per site valued by the sum of `class`. For a single
/// site, one slice per outcome class valued by its row count.
pub fn pie_chart(table: &LaunchTable, selection: &SiteSelection) -> Figure {
    let (labels, values, title) = match selection {
        SiteSelection::All => {
            let values: Vec<f64> = table
                .launch_sites()
                .iter()
                .map(|site| {
                    table
                        .records()
                        .iter()
                        .filter(|r| &r.launch_site == site)
                        .map(|r| f64::from(r.class))
                        .sum::<f64>()
                })
                .collect();

            (
                table.launch_sites().to_vec(),
                values,
                "Total Success Launches by Site".to_string(),
            )
        }
        SiteSelection::Site(site) => {
            let rows = table.filter_site(selection);
            let mut counts = [0usize; 2];
            for row in &rows {
                counts[usize::from(row.class)] += 1;
            }

            let (labels, values): (Vec<String>, Vec<f64>) = counts
                .iter()
                .enumerate()
                .filter(|(_, count)| **count > 0)
                .map(|(class, count)| (class.to_string(), *count as f64))
                .unzip();

            (
                labels,
                values,
                format!("Total Success Launches for Site {}", site),
            )
        }
    };

    Figure {
        data: vec![Trace::Pie {
            labels,
            values,
            name: String::new(),
        }],
        layout: FigureLayout {
            title: Title::new(title),
            xaxis: None,
            yaxis: None,
            legend: None,
        },
    }
}

/// Payload vs outcome scatter, one trace per booster version category.
///
/// The payload range only sets the visible x-axis window; rows outside it
/// are still part of the figure.
pub fn scatter_chart(
    table: &LaunchTable,
    selection: &SiteSelection,
    range: PayloadRange,
) -> Figure {
    let mut categories: Vec<(String, Vec<f64>, Vec<f64>)> = Vec::new();

    for row in table.filter_site(selection) {
        let index = match categories
            .iter()
            .position(|(name, _, _)| *name == row.booster_version_category)
        {
            Some(index) => index,
            None => {
                categories.push((row.booster_version_category.clone(), Vec::new(), Vec::new()));
                categories.len() - 1
            }
        };

        let (_, x, y) = &mut categories[index];
        x.push(row.payload_mass_kg);
        y.push(f64::from(row.class));
    }

    let data = categories
        .into_iter()
        .map(|(name, x, y)| Trace::Scatter {
            x,
            y,
            mode: "markers".to_string(),
            legendgroup: name.clone(),
            name,
        })
        .collect();

    let title = match selection {
        SiteSelection::All => "Correlation between Payload and Success for all Sites".to_string(),
        SiteSelection::Site(site) => {
            format!("Correlation between Payload and Success for Site {}", site)
        }
    };

    Figure {
        data,
        layout: FigureLayout {
            title: Title::new(title),
            xaxis: Some(Axis {
                title: Title::new(PAYLOAD_AXIS_TITLE),
                range: Some(range.as_array()),
            }),
            yaxis: Some(Axis {
                title: Title::new(SUCCESS_AXIS_TITLE),
                range: None,
            }),
            legend: Some(Legend {
                title: Title::new("Booster Version Category"),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LaunchRecord;

    fn record(site: &str, payload: f64, class: u8, booster: &str) -> LaunchRecord {
        LaunchRecord {
            launch_site: site.to_string(),
            payload_mass_kg: payload,
            class,
            booster_version_category: booster.to_string(),
        }
    }

    fn table() -> LaunchTable {
        LaunchTable::new(vec![
            record("CCAFS LC-40", 0.0, 0, "v1.0"),
            record("CCAFS LC-40", 2000.0, 1, "FT"),
            record("KSC LC-39A", 3000.0, 1, "FT"),
            record("KSC LC-39A", 5000.0, 1, "B4"),
            record("KSC LC-39A", 6000.0, 0, "FT"),
            record("VAFB SLC-4E", 9600.0, 0, "B5"),
        ])
        .unwrap()
    }

    fn pie_values(figure: &Figure) -> (Vec<String>, Vec<f64>) {
        match &figure.data[0] {
            Trace::Pie { labels, values, .. } => (labels.clone(), values.clone()),
            other => panic!("expected pie trace, got {:?}", other),
        }
    }

    #[test]
    fn test_all_sites_pie_sums_successes() {
        let table = table();
        let figure = pie_chart(&table, &SiteSelection::All);
        let (labels, values) = pie_values(&figure);

        assert_eq!(figure.title(), "Total Success Launches by Site");
        assert_eq!(labels, vec!["CCAFS LC-40", "KSC LC-39A", "VAFB SLC-4E"]);
        assert_eq!(values, vec![1.0, 2.0, 0.0]);
        assert_eq!(values.iter().sum::<f64>(), table.success_count() as f64);
    }

    #[test]
    fn test_single_site_pie_counts_outcomes() {
        let table = table();
        let selection = SiteSelection::Site("KSC LC-39A".to_string());
        let figure = pie_chart(&table, &selection);
        let (labels, values) = pie_values(&figure);

        assert_eq!(figure.title(), "Total Success Launches for Site KSC LC-39A");
        assert_eq!(labels, vec!["0", "1"]);
        assert_eq!(values, vec![1.0, 2.0]);
        assert_eq!(
            values.iter().sum::<f64>(),
            table.filter_site(&selection).len() as f64
        );
    }

    #[test]
    fn test_single_site_pie_skips_missing_outcome() {
        let figure = pie_chart(&table(), &SiteSelection::Site("VAFB SLC-4E".to_string()));
        let (labels, values) = pie_values(&figure);
        assert_eq!(labels, vec!["0"]);
        assert_eq!(values, vec![1.0]);
    }

    #[test]
    fn test_scatter_groups_by_booster_category() {
        let range = PayloadRange::new(1000.0, 7000.0).unwrap();
        let figure = scatter_chart(&table(), &SiteSelection::All, range);

        let names: Vec<&str> = figure
            .data
            .iter()
            .map(|t| match t {
                Trace::Scatter { name, .. } => name.as_str(),
                Trace::Pie { .. } => panic!("unexpected pie trace"),
            })
            .collect();
        assert_eq!(names, vec!["v1.0", "FT", "B4", "B5"]);

        let total_points: usize = figure
            .data
            .iter()
            .map(|t| match t {
                Trace::Scatter { x, .. } => x.len(),
                Trace::Pie { .. } => 0,
            })
            .sum();
        assert_eq!(total_points, 6);
        assert_eq!(
            figure.title(),
            "Correlation between Payload and Success for all Sites"
        );
    }

    #[test]
    fn test_scatter_axis_range_matches_selection() {
        let range = PayloadRange::new(2500.0, 7500.0).unwrap();
        let selection = SiteSelection::Site("KSC LC-39A".to_string());
        let figure = scatter_chart(&table(), &selection, range);

        let xaxis = figure.layout.xaxis.as_ref().unwrap();
        assert_eq!(xaxis.range, Some([2500.0, 7500.0]));
        assert_eq!(xaxis.title.text, PAYLOAD_AXIS_TITLE);
        assert_eq!(
            figure.layout.yaxis.as_ref().unwrap().title.text,
            SUCCESS_AXIS_TITLE
        );
        assert_eq!(
            figure.title(),
            "Correlation between Payload and Success for Site KSC LC-39A"
        );
    }

    #[test]
    fn test_figure_serializes_to_plotly_shape() {
        let figure = pie_chart(&table(), &SiteSelection::All);
        let json = serde_json::to_value(&figure).unwrap();

        assert_eq!(json["data"][0]["type"], "pie");
        assert_eq!(json["layout"]["title"]["text"], "Total Success Launches by Site");
        assert!(json["layout"].get("xaxis").is_none());
    }
}
