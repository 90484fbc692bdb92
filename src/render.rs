use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::MapConfig;
use crate::html;
use crate::layers::Layer;

/// Thin adapter over the Leaflet side: the pipeline hands the finished
/// layer list here and this module only serializes and templates it.
/// Marker geometry, styling, and labels are all decided upstream.
const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>__TITLE__</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>
html, body, #map { height: 100%; margin: 0; }
.leaflet-tooltip {
    font-size: 20px !important;
    font-weight: bold !important;
    color: black !important;
}
.layer-swatch {
    display: inline-block;
    width: 12px;
    height: 12px;
    margin-left: 6px;
    margin-right: 3px;
    vertical-align: middle;
}
#title-block {
    position: fixed;
    top: 10px;
    left: 50%;
    transform: translateX(-50%);
    z-index: 9999;
    border-radius: 5px;
    display: flex;
    flex-direction: column;
    align-items: center;
    justify-content: center;
    box-shadow: 2px 2px 5px rgba(0,0,0,0.3);
    background: white;
    padding: 4px 10px;
}
#title-block .caption { font-size: 10px; font-weight: normal; }
#title-block .heading { font-size: 14px; font-weight: bold; }
</style>
</head>
<body>
<div id="title-block">
<span class="heading">__TITLE__</span>
<span class="caption">__CAPTION__</span>
</div>
<div id="map"></div>
<script>
var LAYERS = __LAYERS__;

var map = L.map("map").setView([__LAT__, __LON__], __ZOOM__);
L.control.scale().addTo(map);
L.tileLayer("https://tile.openstreetmap.org/{z}/{x}/{y}.png", {
    maxZoom: 19,
    attribution: "&copy; OpenStreetMap contributors"
}).addTo(map);

var overlays = {};
LAYERS.forEach(function (layer) {
    var group = L.layerGroup();
    layer.markers.forEach(function (m) {
        var marker = L.circleMarker([m.lat, m.lon], {
            radius: m.radius,
            color: m.outlineColor,
            weight: m.outlineWeight,
            fill: true,
            fillColor: m.fillColor,
            fillOpacity: m.fillOpacity
        });
        marker.bindTooltip(m.tooltip, { sticky: true });
        marker.bindPopup(m.popup, { maxWidth: 600 });
        group.addLayer(marker);
    });
    if (layer.show) { group.addTo(map); }
    var swatch = "<span class=\"layer-swatch\" style=\"background:" + layer.swatch.fill
        + "; border:" + layer.swatch.borderWeight + "px solid " + layer.swatch.border + ";\"></span>";
    overlays[layer.name + swatch] = group;
});
L.control.layers(null, overlays, { collapsed: false }).addTo(map);
</script>
</body>
</html>
"#;

/// Render the full output page for a layer list.
pub fn render_page(layers: &[Layer], cfg: &MapConfig) -> Result<String> {
    // "</" would terminate the surrounding <script> early.
    let payload = serde_json::to_string(layers)?.replace("</", "<\\/");
    Ok(PAGE_TEMPLATE
        .replace("__TITLE__", &html::escape(&cfg.title))
        .replace("__CAPTION__", &html::escape(&cfg.attribution))
        .replace("__LAT__", &cfg.center.0.to_string())
        .replace("__LON__", &cfg.center.1.to_string())
        .replace("__ZOOM__", &cfg.zoom.to_string())
        .replace("__LAYERS__", &payload))
}

/// Write the map document. Any failure here is fatal for the run.
pub fn write_map(path: &Path, layers: &[Layer], cfg: &MapConfig) -> Result<()> {
    let page = render_page(layers, cfg)?;
    fs::write(path, page).with_context(|| format!("Failed to write map to {}", path.display()))?;
    Ok(())
}

// ── Tests ──
