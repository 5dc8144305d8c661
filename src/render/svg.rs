use crate::config::ClockGeometry;
use crate::model::{ClockFrame, Frame, Pointer, Sector};
use crate::utils::format_price;
use std::fmt::Write;

pub const NO_DATA_MESSAGE: &str = "No electricity prices available";

const LEGEND_ROW: f64 = 18.0;
const LEGEND_TOP_MARGIN: f64 = 20.0;
const TEXT_LINE: f64 = 16.0;

/// Draws a frame as a standalone SVG document.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgRenderer {
    geometry: ClockGeometry,
}

impl SvgRenderer {
    pub fn new(geometry: ClockGeometry) -> Self {
        Self { geometry }
    }

    pub fn render(&self, frame: &Frame) -> String {
        match frame {
            Frame::NoData { pointer } => self.render_no_data(pointer),
            Frame::Clock(clock) => self.render_clock(clock),
        }
    }

    fn center(&self) -> f64 {
        self.geometry.clock_size / 2.0
    }

    /// Point at `degrees` clockwise from 12 o'clock.
    fn polar(&self, degrees: f64, radius: f64) -> (f64, f64) {
        let rad = degrees.to_radians();
        (self.center() + radius * rad.sin(), self.center() - radius * rad.cos())
    }

    fn sector_path(&self, sector: &Sector) -> String {
        let outer = self.center();
        let inner = outer - self.geometry.ring_thickness;
        let (ox1, oy1) = self.polar(sector.start_degrees, outer);
        let (ox2, oy2) = self.polar(sector.end_degrees, outer);
        let (ix2, iy2) = self.polar(sector.end_degrees, inner);
        let (ix1, iy1) = self.polar(sector.start_degrees, inner);
        format!(
            "M{:.3},{:.3} A{:.3},{:.3} 0 0 1 {:.3},{:.3} L{:.3},{:.3} A{:.3},{:.3} 0 0 0 {:.3},{:.3} Z",
            ox1, oy1, outer, outer, ox2, oy2, ix2, iy2, inner, inner, ix1, iy1
        )
    }

    fn open(&self, out: &mut String, height: f64) {
        let size = self.geometry.clock_size;
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{height}" viewBox="0 0 {size} {height}" font-family="sans-serif">"#
        );
    }

    fn pointer(&self, out: &mut String, pointer: &Pointer) {
        let _ = writeln!(
            out,
            r##"  <circle class="hour-marker" cx="{:.3}" cy="{:.3}" r="{:.3}" fill="#000"><animate attributeName="opacity" values="1;0;1" dur="1s" repeatCount="indefinite"/></circle>"##,
            pointer.x,
            pointer.y,
            self.geometry.ring_thickness / 2.0
        );
    }

    fn render_no_data(&self, pointer: &Pointer) -> String {
        let size = self.geometry.clock_size;
        let c = self.center();
        let mut out = String::new();
        self.open(&mut out, size);
        let _ = writeln!(
            out,
            r##"  <circle cx="{c}" cy="{c}" r="{c}" fill="rgba(255,255,255,0.9)" stroke="#999"/>"##
        );
        let _ = writeln!(
            out,
            r##"  <text x="{c}" y="{c}" text-anchor="middle" font-size="14" fill="#333">❌ {}</text>"##,
            NO_DATA_MESSAGE
        );
        self.pointer(&mut out, pointer);
        out.push_str("</svg>\n");
        out
    }

    fn render_clock(&self, clock: &ClockFrame) -> String {
        let size = self.geometry.clock_size;
        let c = self.center();
        let face_radius = c - self.geometry.ring_thickness;
        let advisory_lines: Vec<&str> = clock.summary.advisory_text.lines().collect();
        let legend_top = size + LEGEND_TOP_MARGIN;
        let advisory_top = legend_top + LEGEND_ROW * clock.legend.len() as f64 + TEXT_LINE;
        let height = advisory_top + TEXT_LINE * (advisory_lines.len() + 1) as f64;

        let mut out = String::new();
        self.open(&mut out, height);

        out.push_str("  <g class=\"gradient-ring\">\n");
        for sector in &clock.sectors {
            let _ = writeln!(
                out,
                r#"    <path data-hour="{}" data-band="{}" fill="{}" d="{}"/>"#,
                sector.hour,
                sector.band.token(),
                sector.color,
                self.sector_path(sector)
            );
        }
        out.push_str("  </g>\n");

        let _ = writeln!(
            out,
            r#"  <circle class="clock-face" cx="{c}" cy="{c}" r="{face_radius}" fill="rgba(255,255,255,0.9)"/>"#
        );
        for sector in &clock.sectors {
            let _ = writeln!(
                out,
                r##"  <text class="clock-number" x="{:.3}" y="{:.3}" text-anchor="middle" dominant-baseline="central" font-size="12" fill="#333">{}</text>"##,
                sector.label.x, sector.label.y, sector.hour
            );
        }

        let lines = [
            ("Price now:", format_price(clock.summary.current_price, clock.unit)),
            ("Average:", format_price(clock.summary.average_price, clock.unit)),
        ];
        let mut y = c - 1.5 * TEXT_LINE;
        for (caption, value) in lines {
            let _ = writeln!(
                out,
                r##"  <text class="price-text" x="{c}" y="{y}" text-anchor="middle" font-size="12" fill="#000">{caption}</text>"##
            );
            y += TEXT_LINE;
            let _ = writeln!(
                out,
                r##"  <text class="price-text" x="{c}" y="{y}" text-anchor="middle" font-size="14" font-weight="bold" fill="#000">{value}</text>"##
            );
            y += TEXT_LINE;
        }

        self.pointer(&mut out, &clock.pointer);

        out.push_str("  <g class=\"legend-box\" font-size=\"12\">\n");
        for (i, entry) in clock.legend.iter().enumerate() {
            let row = legend_top + LEGEND_ROW * i as f64;
            let _ = writeln!(
                out,
                r##"    <rect x="10" y="{row}" width="12" height="12" fill="{}" stroke="#000"/>"##,
                entry.color
            );
            let _ = writeln!(
                out,
                r##"    <text x="28" y="{}" fill="#000">{}</text>"##,
                row + 10.0,
                escape(&entry.text)
            );
        }
        out.push_str("  </g>\n");

        out.push_str("  <g class=\"summary\" font-size=\"14\" font-style=\"italic\">\n");
        let mut y = advisory_top;
        for line in advisory_lines {
            let _ = writeln!(out, r##"    <text x="10" y="{y}" fill="#000">{}</text>"##, escape(line));
            y += TEXT_LINE;
        }
        out.push_str("  </g>\n");

        out.push_str("</svg>\n");
        out
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
