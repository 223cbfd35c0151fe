//! Chart adapter.
//!
//! Charts are described in the shape the front-end plotting library consumes:
//! a list of `{x[], y[]}` traces plus a layout. A [`Plot`] always replaces the
//! previous one wholesale, so a shorter series never leaves stale points behind.

use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LineStyle {
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MarkerStyle {
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Trace {
    pub x: Vec<String>,
    pub y: Vec<f64>,
    #[serde(rename = "type")]
    pub trace_type: String,
    pub mode: String,
    pub line: LineStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<MarkerStyle>,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Fixed `[min, max]`; autoscaled when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<Vec<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct Margin {
    pub t: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Plot {
    pub traces: Vec<Trace>,
    pub layout: Layout,
}

/// Fixed per-chart styling, identical on every redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartStyle {
    pub name: &'static str,
    pub color: &'static str,
    pub line_width: Option<u32>,
    pub marker_size: Option<u32>,
}

pub const TEMPERATURE_STYLE: ChartStyle = ChartStyle {
    name: "Temperatura °C",
    color: "#38bdf8",
    line_width: None,
    marker_size: None,
};

pub const HUMIDITY_STYLE: ChartStyle = ChartStyle {
    name: "Umidità %",
    color: "#facc15",
    line_width: None,
    marker_size: None,
};

pub const PRESSURE_STYLE: ChartStyle = ChartStyle {
    name: "Pressione hPa",
    color: "#22c55e",
    line_width: None,
    marker_size: None,
};

pub const RISK_TREND_STYLE: ChartStyle = ChartStyle {
    name: "Probabilità di frana (%)",
    color: "#dc2626",
    line_width: Some(3),
    marker_size: Some(6),
};

impl ChartStyle {
    #[must_use]
    pub fn trace(&self, x: Vec<String>, y: Vec<f64>) -> Trace {
        Trace {
            x,
            y,
            trace_type: "scatter".to_string(),
            mode: "lines+markers".to_string(),
            line: LineStyle {
                color: self.color.to_string(),
                width: self.line_width,
            },
            marker: self.marker_size.map(|size| MarkerStyle { size }),
            name: self.name.to_string(),
        }
    }

    /// Single-trace plot with the default layout.
    #[must_use]
    pub fn plot(&self, x: Vec<String>, y: Vec<f64>) -> Plot {
        Plot {
            traces: vec![self.trace(x, y)],
            layout: Layout::default(),
        }
    }
}

/// Probability is always drawn on a 0-100 % axis, whatever the data range.
#[must_use]
pub fn risk_trend_layout() -> Layout {
    Layout {
        xaxis: Some(Axis {
            title: Some("Tempo".to_string()),
            range: None,
        }),
        yaxis: Some(Axis {
            title: Some("Probabilità (%)".to_string()),
            range: Some(vec![0.0, 100.0]),
        }),
        margin: Some(Margin { t: 20 }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_carries_fixed_style() {
        let trace = PRESSURE_STYLE.trace(vec!["10:00".into()], vec![1013.0]);
        assert_eq!(trace.line.color, "#22c55e");
        assert_eq!(trace.marker, None);

        let json = serde_json::to_value(&trace).unwrap();
        assert_eq!(json["type"], "scatter");
        assert_eq!(json["mode"], "lines+markers");
        assert!(json.get("marker").is_none());
    }

    #[test]
    fn risk_trend_axis_is_fixed() {
        let layout = risk_trend_layout();
        assert_eq!(layout.yaxis.unwrap().range, Some(vec![0.0, 100.0]));

        let trace = RISK_TREND_STYLE.trace(vec![], vec![]);
        assert_eq!(trace.line.width, Some(3));
        assert_eq!(trace.marker, Some(MarkerStyle { size: 6 }));
    }
}
