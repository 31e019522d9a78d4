//! Text render adapter: draws each sensor's scope from a snapshot.
//!
//! Every frame is redrawn from scratch, so expired blips simply stop being
//! drawn. Colours use 24-bit ANSI escapes when enabled.

use std::io::Write;

use glam::DVec2;

use scanner_core::constants::{BACKGROUND_INTENSITY, RANGE_RING_FRACTIONS};
use scanner_core::enums::SensorKind;
use scanner_core::sensors::legend_entry;
use scanner_core::state::{ScanSnapshot, SensorView};
use scanner_core::types::PolarPosition;

use crate::game_loop::SnapshotSink;
use crate::status::StatusLine;

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f64 = 2.0;

const GRID_INTENSITY: f64 = 0.3;

/// Smallest scope that still fits the angle labels.
pub const MIN_RADIUS: usize = 2;

type Rgb = (u8, u8, u8);

/// Scope geometry and colour settings.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Scope radius in rows.
    pub radius: usize,
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            radius: 9,
            color: true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Cell {
    ch: char,
    color: Option<Rgb>,
}

const BLANK: Cell = Cell {
    ch: ' ',
    color: None,
};

/// A character grid for one scope.
#[derive(Debug, Clone)]
pub struct ScopeCanvas {
    radius: usize,
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl ScopeCanvas {
    /// Radii below `MIN_RADIUS` are raised to it.
    pub fn new(radius: usize) -> Self {
        let radius = radius.max(MIN_RADIUS);
        let width = 4 * radius + 1;
        let height = 2 * radius + 1;
        Self {
            radius,
            width,
            height,
            cells: vec![BLANK; width * height],
        }
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Grid cell for an (east, north) offset where 1.0 is the scope edge.
    fn cell_for(&self, v: DVec2) -> Option<(usize, usize)> {
        let r = self.radius as f64;
        let col = self.radius as f64 * CELL_ASPECT + (v.x * r * CELL_ASPECT).round();
        let row = r - (v.y * r).round();
        if col < 0.0 || row < 0.0 || col >= self.width as f64 || row >= self.height as f64 {
            return None;
        }
        Some((row as usize, col as usize))
    }

    fn plot(&mut self, v: DVec2, ch: char, color: Rgb) {
        if let Some((row, col)) = self.cell_for(v) {
            self.cells[row * self.width + col] = Cell {
                ch,
                color: Some(color),
            };
        }
    }

    fn text(&mut self, row: usize, center_col: usize, text: &str, color: Rgb) {
        let len = text.chars().count();
        let start = center_col.saturating_sub(len / 2);
        for (i, ch) in text.chars().enumerate() {
            let col = start + i;
            if row < self.height && col < self.width {
                self.cells[row * self.width + col] = Cell {
                    ch,
                    color: Some(color),
                };
            }
        }
    }

    /// Character at (row, col); blank outside the grid.
    pub fn char_at(&self, row: usize, col: usize) -> char {
        if row < self.height && col < self.width {
            self.cells[row * self.width + col].ch
        } else {
            ' '
        }
    }

    /// Rendered rows, with ANSI colour when `color` is set.
    pub fn lines(&self, color: bool) -> Vec<String> {
        self.cells
            .chunks(self.width)
            .map(|row| {
                let mut line = String::new();
                for cell in row {
                    match (color, cell.color) {
                        (true, Some((r, g, b))) if cell.ch != ' ' => {
                            line.push_str(&format!("\x1b[38;2;{r};{g};{b}m{}\x1b[0m", cell.ch));
                        }
                        _ => line.push(cell.ch),
                    }
                }
                line
            })
            .collect()
    }
}

/// Blip glyph by intensity.
pub fn blip_glyph(intensity: f64) -> char {
    match intensity {
        i if i > 0.75 => '@',
        i if i > 0.5 => 'O',
        i if i > 0.25 => 'o',
        _ => '.',
    }
}

fn draw_ring(canvas: &mut ScopeCanvas, fraction: f64, ch: char, color: Rgb) {
    for deg in (0..360).step_by(2) {
        let v = PolarPosition::new(deg as f64, fraction).to_unit_vector();
        canvas.plot(v, ch, color);
    }
}

/// Background, sweep line and blips for one sensor.
pub fn draw_scope(view: &SensorView, radius: usize) -> ScopeCanvas {
    let sensor = view.sensor;
    let mut canvas = ScopeCanvas::new(radius);
    let radius = canvas.radius;
    let grid = sensor.shade(GRID_INTENSITY);
    let bright = sensor.shade(BACKGROUND_INTENSITY);

    // Cross-lines
    let steps = 4 * radius;
    for i in 0..=steps {
        let t = i as f64 / steps as f64 * 2.0 - 1.0;
        canvas.plot(DVec2::new(t, 0.0), '-', grid);
        canvas.plot(DVec2::new(0.0, t), '|', grid);
    }

    for fraction in RANGE_RING_FRACTIONS {
        draw_ring(&mut canvas, fraction, '.', grid);
    }
    if view.max_range_norm < 1.0 {
        draw_ring(&mut canvas, view.max_range_norm, ':', grid);
    }
    draw_ring(&mut canvas, 1.0, '*', bright);

    let center_col = 2 * radius;
    canvas.text(1, center_col, "0", bright);
    canvas.text(canvas.height.saturating_sub(2), center_col, "180", bright);
    canvas.text(radius, canvas.width.saturating_sub(4), "90", bright);
    canvas.text(radius, 3, "270", bright);

    // Sweep line
    let samples = 4 * radius;
    for i in 1..=samples {
        let v = PolarPosition::new(view.sweep_angle_deg, i as f64 / samples as f64).to_unit_vector();
        canvas.plot(v, '#', sensor.shade(1.0));
    }

    // Oldest first so fresh blips land on top
    let mut blips: Vec<_> = view.blips.iter().collect();
    blips.sort_by(|a, b| b.age_ticks.cmp(&a.age_ticks));
    for blip in blips {
        canvas.plot(
            blip.position.to_unit_vector(),
            blip_glyph(blip.intensity),
            sensor.shade(blip.intensity),
        );
    }

    canvas.plot(DVec2::ZERO, '+', (170, 170, 170));
    canvas
}

/// The sensor legend, one entry per sensor.
pub fn legend() -> String {
    SensorKind::ALL
        .iter()
        .map(|s| legend_entry(*s))
        .collect::<Vec<_>>()
        .join("   |   ")
}

/// A full frame: legend, three scopes side by side, status line.
pub fn render_frame(snapshot: &ScanSnapshot, status: &str, options: RenderOptions) -> String {
    let scopes: Vec<(SensorKind, f64, ScopeCanvas)> = snapshot
        .sensors
        .iter()
        .map(|v| (v.sensor, v.sweep_angle_deg, draw_scope(v, options.radius)))
        .collect();

    let mut out = String::new();
    out.push_str(&legend());
    out.push('\n');
    out.push('\n');

    let titles: Vec<String> = scopes
        .iter()
        .map(|(sensor, angle, canvas)| {
            let title = format!("{} {:>5.1}° ({} blips)", sensor.label(), angle, blip_count(snapshot, *sensor));
            format!("{:^width$}", title, width = canvas.width())
        })
        .collect();
    out.push_str(titles.join("  ").trim_end());
    out.push('\n');

    let rendered: Vec<Vec<String>> = scopes
        .iter()
        .map(|(_, _, canvas)| canvas.lines(options.color))
        .collect();
    let rows = scopes.iter().map(|(_, _, c)| c.height()).max().unwrap_or(0);
    for row in 0..rows {
        let parts: Vec<&str> = rendered
            .iter()
            .map(|lines| lines.get(row).map(String::as_str).unwrap_or(""))
            .collect();
        out.push_str(parts.join("  ").trim_end());
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&format!(
        "tick {}  objects {}  |  {}\n",
        snapshot.time.tick,
        snapshot.objects.len(),
        status
    ));
    out
}

fn blip_count(snapshot: &ScanSnapshot, sensor: SensorKind) -> usize {
    snapshot.sensor(sensor).map_or(0, |v| v.blips.len())
}

/// Render adapter that redraws the terminal on every snapshot.
pub struct TerminalSink {
    options: RenderOptions,
    status: StatusLine,
}

impl TerminalSink {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            status: StatusLine::new(),
        }
    }
}

impl SnapshotSink for TerminalSink {
    fn emit(&mut self, snapshot: &ScanSnapshot) {
        self.status.update(&snapshot.events);
        let frame = render_frame(snapshot, self.status.text(), self.options);

        let mut stdout = std::io::stdout().lock();
        let result = write!(stdout, "\x1b[H\x1b[2J{frame}").and_then(|_| stdout.flush());
        if let Err(err) = result {
            tracing::debug!(%err, "frame write failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scanner_core::enums::ObjectKind;
    use scanner_core::state::BlipView;
    use scanner_core::types::{BlipId, ObjectId};

    fn view(sensor: SensorKind, sweep: f64, blips: Vec<BlipView>) -> SensorView {
        SensorView {
            sensor,
            sweep_angle_deg: sweep,
            max_range_norm: 1.0,
            blips,
        }
    }

    #[test]
    fn test_canvas_dimensions() {
        let canvas = ScopeCanvas::new(5);
        assert_eq!(canvas.width(), 21);
        assert_eq!(canvas.height(), 11);
        assert_eq!(canvas.lines(false).len(), 11);
    }

    #[test]
    fn test_tiny_radius_clamped() {
        for radius in [0, 1] {
            let canvas = draw_scope(&view(SensorKind::Sonar, 90.0, Vec::new()), radius);
            assert_eq!(canvas.radius(), MIN_RADIUS);
            assert_eq!(canvas.width(), 4 * MIN_RADIUS + 1);
            assert_eq!(canvas.height(), 2 * MIN_RADIUS + 1);
            assert_eq!(canvas.char_at(MIN_RADIUS, 2 * MIN_RADIUS), '+');
        }

        let snapshot = ScanSnapshot {
            sensors: SensorKind::ALL.iter().map(|s| view(*s, 0.0, Vec::new())).collect(),
            ..Default::default()
        };
        let frame = render_frame(
            &snapshot,
            "",
            RenderOptions {
                radius: 0,
                color: false,
            },
        );
        assert!(frame.contains("LiDAR"));
    }

    #[test]
    fn test_blip_glyphs() {
        assert_eq!(blip_glyph(1.0), '@');
        assert_eq!(blip_glyph(0.6), 'O');
        assert_eq!(blip_glyph(0.3), 'o');
        assert_eq!(blip_glyph(0.04), '.');
    }

    #[test]
    fn test_center_and_north_sweep() {
        let canvas = draw_scope(&view(SensorKind::Radar, 0.0, Vec::new()), 5);
        assert_eq!(canvas.char_at(5, 10), '+');
        // Sweep at 0° runs straight up the middle column
        assert_eq!(canvas.char_at(3, 10), '#');
        assert_eq!(canvas.char_at(0, 10), '#');
    }

    #[test]
    fn test_blip_drawn_at_position() {
        let blip = BlipView {
            blip_id: BlipId(0),
            object_id: ObjectId(0),
            kind: ObjectKind::Ship,
            position: PolarPosition::new(90.0, 0.6),
            age_ticks: 1,
            intensity: 0.96,
        };
        let canvas = draw_scope(&view(SensorKind::Radar, 180.0, vec![blip]), 5);
        // East at 0.6 of radius 5: col 10 + round(0.6 * 10) = 16, row 5
        assert_eq!(canvas.char_at(5, 16), '@');
    }

    #[test]
    fn test_frame_contains_legend_and_status() {
        let snapshot = ScanSnapshot {
            sensors: SensorKind::ALL.iter().map(|s| view(*s, 0.0, Vec::new())).collect(),
            ..Default::default()
        };
        let frame = render_frame(
            &snapshot,
            "No objects added yet.",
            RenderOptions {
                radius: 4,
                color: false,
            },
        );
        assert!(frame.contains("Sonar: whales & submarines"));
        assert!(frame.contains("LiDAR"));
        assert!(frame.contains("No objects added yet."));
        assert!(!frame.contains('\x1b'), "No escapes without colour");
    }
}
