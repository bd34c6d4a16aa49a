//! Vega-Lite chart specifications for the dashboard.
//!
//! Charts are plain JSON documents; the page hands them to vega-embed.

use serde_json::{json, Value};

const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";
const DEMOCRAT_BLUE: &str = "#234898";
const REPUBLICAN_RED: &str = "#d22532";
const USER_MARKER: &str = "orange";

/// Democrat/Republican bar spanning [-1, 1] with a tick at the user's score.
pub fn partisanship_chart(score: f64) -> Value {
    json!({
        "$schema": VEGA_LITE_SCHEMA,
        "title": "Partisanship",
        "width": "container",
        "height": 60,
        "data": {
            "values": [
                {"party": "Democrat", "value": -1, "label": "", "score": score},
                {"party": "Republican", "value": 1, "label": "", "score": score}
            ]
        },
        "layer": [
            {
                "mark": "bar",
                "encoding": {
                    "x": {"field": "value", "type": "quantitative", "title": "Democratic - Republican"},
                    "y": {"field": "label", "type": "nominal", "title": ""},
                    "color": {
                        "field": "party",
                        "type": "nominal",
                        "scale": {"range": [DEMOCRAT_BLUE, REPUBLICAN_RED], "interpolate": "hsl"},
                        "legend": null
                    }
                }
            },
            {
                "mark": {"type": "tick", "color": USER_MARKER, "thickness": 4, "size": 34},
                "encoding": {
                    "x": {"field": "score", "type": "quantitative"},
                    "y": {"field": "label", "type": "nominal"},
                    "tooltip": [{"field": "score", "type": "quantitative"}]
                }
            }
        ]
    })
}

/// Density curve of the reference samples with a rule at the user's score.
///
/// The density transform runs client-side, so the samples are shipped as-is.
pub fn exposure_density_chart(samples: &[f64], score: f64) -> Value {
    let values: Vec<Value> = samples.iter().map(|s| json!({ "score": s })).collect();

    json!({
        "$schema": VEGA_LITE_SCHEMA,
        "title": "Misinformation exposure compared to other users",
        "width": "container",
        "height": 200,
        "layer": [
            {
                "data": {"values": values},
                "transform": [
                    {"density": "score", "extent": [0, 1], "as": ["score", "density"]}
                ],
                "mark": {"type": "area", "opacity": 0.6},
                "encoding": {
                    "x": {"field": "score", "type": "quantitative", "title": "Misinformation exposure"},
                    "y": {"field": "density", "type": "quantitative", "title": "Density"}
                }
            },
            {
                "data": {"values": [{"score": score}]},
                "mark": {"type": "rule", "color": USER_MARKER, "strokeWidth": 3},
                "encoding": {
                    "x": {"field": "score", "type": "quantitative"},
                    "tooltip": [{"field": "score", "type": "quantitative"}]
                }
            }
        ]
    })
}
