//! Geographic map of the filtered nodes.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Map, MapResolution, Points},
        Block, Borders, Paragraph,
    },
    Frame,
};

use crate::app::App;
use crate::data::view::MapPoint;
use crate::data::NodeStatus;

/// Continental US, used when no node has coordinates.
const DEFAULT_BOUNDS: Bounds = Bounds {
    x: [-125.0, -66.0],
    y: [24.0, 50.0],
};

/// Degrees added around the node extent.
const PADDING: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Bounds {
    /// Longitude range.
    x: [f64; 2],
    /// Latitude range.
    y: [f64; 2],
}

/// Extent of the plotted points with padding, clamped to the globe.
fn bounds_for(points: &[MapPoint]) -> Bounds {
    let located: Vec<&MapPoint> = points
        .iter()
        .filter(|p| p.latitude.is_finite() && p.longitude.is_finite())
        .filter(|p| p.latitude != 0.0 || p.longitude != 0.0)
        .collect();
    if located.is_empty() {
        return DEFAULT_BOUNDS;
    }

    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    for p in located {
        min_x = min_x.min(p.longitude);
        max_x = max_x.max(p.longitude);
        min_y = min_y.min(p.latitude);
        max_y = max_y.max(p.latitude);
    }

    Bounds {
        x: [(min_x - PADDING).max(-180.0), (max_x + PADDING).min(180.0)],
        y: [(min_y - PADDING).max(-90.0), (max_y + PADDING).min(90.0)],
    }
}

/// Render the Map view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref view) = app.dashboard else {
        return;
    };

    let chunks = Layout::vertical([Constraint::Min(5), Constraint::Length(1)]).split(area);

    let bounds = bounds_for(&view.map);
    let groups: Vec<(Color, Vec<(f64, f64)>)> = NodeStatus::ALL
        .iter()
        .map(|status| {
            let coords = view
                .map
                .iter()
                .filter(|p| p.status == *status)
                .map(|p| (p.longitude, p.latitude))
                .collect();
            (app.theme.status_color(*status), coords)
        })
        .collect();

    let canvas = Canvas::default()
        .block(
            Block::default()
                .title(format!(" Network Map ({} nodes) ", view.map.len()))
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .x_bounds(bounds.x)
        .y_bounds(bounds.y)
        .paint(move |ctx| {
            ctx.draw(&Map {
                resolution: MapResolution::High,
                color: Color::DarkGray,
            });
            ctx.layer();
            for (color, coords) in &groups {
                ctx.draw(&Points {
                    coords,
                    color: *color,
                });
            }
        });
    frame.render_widget(canvas, chunks[0]);

    // Legend
    let mut spans = vec![Span::raw(" ")];
    for status in NodeStatus::ALL {
        spans.push(Span::styled("● ", Style::default().fg(app.theme.status_color(status))));
        spans.push(Span::raw(format!("{}  ", status.label())));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lon: f64) -> MapPoint {
        MapPoint {
            node_id: "n".into(),
            node_name: "N".into(),
            node_type: "router".into(),
            region: "West".into(),
            latitude: lat,
            longitude: lon,
            status: NodeStatus::Healthy,
        }
    }

    #[test]
    fn test_bounds_default_when_empty() {
        assert_eq!(bounds_for(&[]), DEFAULT_BOUNDS);
        assert_eq!(bounds_for(&[point(0.0, 0.0)]), DEFAULT_BOUNDS);
    }

    #[test]
    fn test_bounds_cover_points_with_padding() {
        let b = bounds_for(&[point(37.0, -122.0), point(40.0, -74.0)]);
        assert_eq!(b.x, [-127.0, -69.0]);
        assert_eq!(b.y, [32.0, 45.0]);
    }

    #[test]
    fn test_bounds_clamped_to_globe() {
        let b = bounds_for(&[point(88.0, 178.0)]);
        assert_eq!(b.x[1], 180.0);
        assert_eq!(b.y[1], 90.0);
    }
}
