//! Server-rendered dashboard page. Controls are rendered here; chart
//! figures are fetched from the JSON endpoints and drawn with plotly.js.

use crate::core::dashboard::DashboardLayout;
use crate::utils::error::Result;
use std::collections::HashMap;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>__TITLE__</title>
<script src="__PLOTLY__"></script>
<style>
  body { font-family: sans-serif; margin: 0 2em; }
  .slider { position: relative; height: 2.5em; }
  .slider input[type=range] { position: absolute; width: 100%; pointer-events: none; }
  .slider input[type=range]::-webkit-slider-thumb { pointer-events: all; }
  .slider input[type=range]::-moz-range-thumb { pointer-events: all; }
  .marks { display: flex; justify-content: space-between; font-size: 0.8em; }
</style>
</head>
<body>
<h1 style="text-align: __ALIGN__; color: __COLOR__; font-size: __FONT_SIZE__px">__TITLE__</h1>
<input id="__DROPDOWN_ID__" list="__DROPDOWN_ID__-options" placeholder="__PLACEHOLDER__" value="">
<datalist id="__DROPDOWN_ID__-options">
__DATALIST__
</datalist>
<select id="__DROPDOWN_ID__-select">
__OPTIONS__
</select>
<br>
<div id="__PIE_ID__"></div>
<br>
<p>__SLIDER_LABEL__ <span id="__SLIDER_ID__-value"></span></p>
<div class="slider">
  <input id="__SLIDER_ID__-low" type="range" min="__MIN__" max="__MAX__" step="__STEP__" value="__LOW__">
  <input id="__SLIDER_ID__-high" type="range" min="__MIN__" max="__MAX__" step="__STEP__" value="__HIGH__">
</div>
<div class="marks">__MARKS__</div>
<div id="__SCATTER_ID__"></div>
<script id="dashboard-layout" type="application/json">__LAYOUT_JSON__</script>
<script>
(function () {
  const layout = JSON.parse(document.getElementById("dashboard-layout").textContent);
  const dropdown = document.getElementById(layout.dropdown.id);
  const select = document.getElementById(layout.dropdown.id + "-select");
  const low = document.getElementById(layout.slider.id + "-low");
  const high = document.getElementById(layout.slider.id + "-high");
  const rangeLabel = document.getElementById(layout.slider.id + "-value");
  const sites = new Set(layout.dropdown.options.map(o => o.value));
  const labels = new Map(layout.dropdown.options.map(o => [o.label, o.value]));
  // 滑桿初始值可能不在 step 上，保留原始值直到使用者拖動
  let range = layout.slider.value.slice();
  let site = layout.dropdown.value;

  async function draw(target, url) {
    const response = await fetch(url);
    const body = await response.json();
    if (!response.ok) {
      document.getElementById(target).textContent = body.error;
      return;
    }
    Plotly.react(target, body.data, body.layout);
  }

  function updatePie() {
    draw(layout.pie_chart_id, "/api/charts/pie?site=" + encodeURIComponent(site));
  }

  function updateScatter() {
    rangeLabel.textContent = "[" + range[0] + ", " + range[1] + "]";
    const query = "site=" + encodeURIComponent(site) + "&low=" + range[0] + "&high=" + range[1];
    draw(layout.scatter_chart_id, "/api/charts/scatter?" + query);
  }

  function selectSite(value) {
    const resolved = labels.get(value) || value;
    if (!sites.has(resolved) || resolved === site) {
      return;
    }
    site = resolved;
    select.value = site;
    updatePie();
    updateScatter();
  }

  function moveSlider() {
    const a = Number(low.value);
    const b = Number(high.value);
    range = [Math.min(a, b), Math.max(a, b)];
    updateScatter();
  }

  dropdown.addEventListener("change", () => selectSite(dropdown.value.trim()));
  select.addEventListener("change", () => selectSite(select.value));
  low.addEventListener("input", moveSlider);
  high.addEventListener("input", moveSlider);

  updatePie();
  updateScatter();
})();
</script>
</body>
</html>
"#;

/// 轉義 HTML 特殊字元
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// JSON embedded in a `<script>` block. `<`, `>` and `&` only occur inside
/// JSON strings, so their `\u` escapes keep the document valid and inert.
fn embed_json(layout: &DashboardLayout) -> Result<String> {
    let json = serde_json::to_string(layout)?;
    Ok(json
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"))
}

/// 一次掃描替換所有佔位符，替換後的內容不會再被掃描
fn fill_template(values: &HashMap<&str, String>) -> String {
    let mut page = String::with_capacity(TEMPLATE.len() * 2);
    let mut rest = TEMPLATE;

    while let Some(start) = rest.find("__") {
        let after = &rest[start + 2..];
        let Some(len) = after.find("__") else {
            break;
        };

        let key = &after[..len];
        match values.get(key) {
            Some(value) => {
                page.push_str(&rest[..start]);
                page.push_str(value);
                rest = &after[len + 2..];
            }
            None => {
                page.push_str(&rest[..start + 2]);
                rest = after;
            }
        }
    }

    page.push_str(rest);
    page
}

pub fn render(layout: &DashboardLayout) -> Result<String> {
    let options = layout
        .dropdown
        .options
        .iter()
        .map(|option| {
            let selected = if option.value == layout.dropdown.value {
                " selected"
            } else {
                ""
            };
            format!(
                "<option value=\"{}\"{}>{}</option>",
                escape_html(&option.value),
                selected,
                escape_html(&option.label)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let datalist = layout
        .dropdown
        .options
        .iter()
        .map(|option| format!("<option value=\"{}\"></option>", escape_html(&option.label)))
        .collect::<Vec<_>>()
        .join("\n");

    let marks = layout
        .slider
        .marks
        .iter()
        .map(|mark| format!("<span>{}</span>", escape_html(&mark.label)))
        .collect::<String>();

    let slider = &layout.slider;
    let style = &layout.heading_style;

    let values: HashMap<&str, String> = HashMap::from([
        ("PLOTLY", PLOTLY_CDN.to_string()),
        ("TITLE", escape_html(&layout.title)),
        ("ALIGN", escape_html(&style.text_align)),
        ("COLOR", escape_html(&style.color)),
        ("FONT_SIZE", style.font_size.to_string()),
        ("DROPDOWN_ID", escape_html(&layout.dropdown.id)),
        ("PLACEHOLDER", escape_html(&layout.dropdown.placeholder)),
        ("PIE_ID", escape_html(&layout.pie_chart_id)),
        ("SCATTER_ID", escape_html(&layout.scatter_chart_id)),
        ("SLIDER_LABEL", escape_html(&slider.label)),
        ("SLIDER_ID", escape_html(&slider.id)),
        ("MIN", slider.min.to_string()),
        ("MAX", slider.max.to_string()),
        ("STEP", slider.step.to_string()),
        ("LOW", slider.value[0].to_string()),
        ("HIGH", slider.value[1].to_string()),
        ("MARKS", marks),
        ("DATALIST", datalist),
        ("OPTIONS", options),
        ("LAYOUT_JSON", embed_json(layout)?),
    ]);

    Ok(fill_template(&values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dashboard::{Dashboard, SliderSettings};
    use crate::core::{LaunchRecord, LaunchTable};

    fn layout_with_site(site: &str) -> DashboardLayout {
        let table = LaunchTable::new(vec![LaunchRecord {
            launch_site: site.to_string(),
            payload_mass_kg: 2490.0,
            class: 1,
            booster_version_category: "FT".to_string(),
        }])
        .unwrap();
        Dashboard::new(table, SliderSettings::default()).layout()
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<a href=\"x\">&'</a>"),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_render_contains_controls() {
        let html = render(&layout_with_site("KSC LC-39A")).unwrap();

        assert!(html.contains("SpaceX Launch Records Dashboard"));
        assert!(html.contains("color: #503D36"));
        assert!(html.contains("<option value=\"ALL\" selected>All Sites</option>"));
        assert!(html.contains("<option value=\"KSC LC-39A\">KSC LC-39A</option>"));
        assert!(html.contains("id=\"success-pie-chart\""));
        assert!(html.contains("id=\"success-payload-scatter-chart\""));
        assert!(html.contains("id=\"payload-slider-low\""));
        assert!(html.contains("<span>7500</span>"));
        assert!(!html.contains("__"));
    }

    #[test]
    fn test_render_escapes_site_names() {
        let html = render(&layout_with_site("</script><b>")).unwrap();
        assert!(html.contains("&lt;/script&gt;&lt;b&gt;"));
        assert!(!html.contains("</script><b>"));
    }

    #[test]
    fn test_render_keeps_placeholder_text_in_site_names() {
        let site = "__LAYOUT_JSON__<img src=x onerror=alert(1)>";
        let html = render(&layout_with_site(site)).unwrap();

        assert!(!html.contains("<img src=x onerror=alert(1)>"));
        assert!(html.contains("__LAYOUT_JSON__&lt;img src=x onerror=alert(1)&gt;"));
        // 版面 JSON 只嵌入一次
        assert_eq!(html.matches("\"pie_chart_id\"").count(), 1);
    }

    #[test]
    fn test_embedded_json_has_no_markup() {
        let json = embed_json(&layout_with_site("<b>A&B</b>")).unwrap();
        assert!(!json.contains('<'));
        assert!(!json.contains('&'));
        assert!(json.contains("\\u003cb\\u003eA\\u0026B"));

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["dropdown"]["options"][1]["value"], "<b>A&B</b>");
    }
}
