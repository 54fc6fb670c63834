use frame_string::{
    geometry::{Point, Segment},
    Connection, Float, Path, PinLayout, Settings, Termination,
};
use image::{Rgb, RgbImage};
use serde::Serialize;

pub fn build_instructions<S: Float>(path: &Path, layout: &PinLayout<S>) -> String {
    let mut instructions = format!(
        "# {} pins, {} strings ({})\nstart at pin 0\n",
        layout.len(),
        path.len(),
        termination_name(path.termination())
    );
    instructions.extend(
        path.iter()
            .enumerate()
            .map(|(step, connection)| format!("{}: {} -> {}\n", step + 1, connection.from, connection.to)),
    );
    instructions
}

fn termination_name(termination: Termination) -> &'static str {
    match termination {
        Termination::Completed => "completed",
        Termination::NoCandidate => "stopped: no reachable pin",
        Termination::Cancelled => "cancelled",
    }
}

/// Frame-unit drawing: pins as dots, strings in stringing order.
pub fn build_svg<S: Float>(path: &Path, layout: &PinLayout<S>, line_thickness: f32) -> svg::Document {
    let frame = layout.frame();
    let mut doc = svg::Document::new().set(
        "viewBox",
        format!("0 0 {:.4} {:.4}", frame.width, frame.height),
    );
    for pin in layout.iter() {
        doc = doc.add(
            svg::node::element::Circle::new()
                .set("cx", format!("{:.4}", pin.position.x))
                .set("cy", format!("{:.4}", pin.position.y))
                .set("r", format!("{:.4}", line_thickness))
                .set("fill", "black"),
        );
    }
    for &connection in path.iter() {
        let Segment { start, end } = segment(layout, connection);
        doc = doc.add(
            svg::node::element::Line::new()
                .set("x1", format!("{:.4}", start.x))
                .set("y1", format!("{:.4}", start.y))
                .set("x2", format!("{:.4}", end.x))
                .set("y2", format!("{:.4}", end.y))
                .set("stroke", "black")
                .set("stroke-width", format!("{:.4}", line_thickness))
                .set("opacity", 1),
        );
    }
    doc
}

fn segment<S: Float>(layout: &PinLayout<S>, connection: Connection) -> Segment<S> {
    Segment::new(
        layout[connection.from].position,
        layout[connection.to].position,
    )
}

/// Black on white raster preview at `scale` pixels per frame unit.
pub fn build_rgb<S: Float>(path: &Path, layout: &PinLayout<S>, scale: S) -> Option<RgbImage> {
    let frame = layout.frame();
    let width = (frame.width * scale).ceil().to_u32()?.max(1);
    let height = (frame.height * scale).ceil().to_u32()?.max(1);
    let mut image = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));
    for &connection in path.iter() {
        let line = segment(layout, connection) * scale;
        for Point { x, y } in line.pixels() {
            if (0..width as isize).contains(&x) && (0..height as isize).contains(&y) {
                image.put_pixel(x as u32, y as u32, Rgb([0, 0, 0]));
            }
        }
    }
    Some(image)
}

/// Everything needed to string the frame again, as written to the json export.
#[derive(Debug, Serialize)]
pub struct Report<'a, S> {
    pub settings: &'a Settings<S>,
    pub frame: frame_string::Grid<S>,
    pub pins: Vec<Point<S>>,
    /// Pins in the order the string visits them.
    pub sequence: Vec<usize>,
    pub path: &'a Path,
}

impl<'a, S: Float + Serialize> Report<'a, S> {
    pub fn new(settings: &'a Settings<S>, layout: &PinLayout<S>, path: &'a Path) -> Self {
        Self {
            settings,
            frame: layout.frame(),
            pins: layout.positions().collect(),
            sequence: path.pins().collect(),
            path,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> (PinLayout<f64>, Path) {
        let layout = PinLayout::rectangle(4.0, 2.0, 12).unwrap();
        let path = Path::new(
            vec![Connection::new(0, 6), Connection::new(6, 2)],
            Termination::Completed,
        );
        (layout, path)
    }

    #[test]
    fn instructions_list_every_string() {
        let (layout, path) = sample();
        assert_eq!(
            build_instructions(&path, &layout),
            "# 12 pins, 2 strings (completed)\nstart at pin 0\n1: 0 -> 6\n2: 6 -> 2\n"
        );
    }

    #[test]
    fn instructions_report_early_stop() {
        let (layout, _) = sample();
        let path = Path::new(vec![Connection::new(0, 5)], Termination::NoCandidate);
        let instructions = build_instructions(&path, &layout);
        assert!(instructions.starts_with("# 12 pins, 1 strings (stopped: no reachable pin)\n"));
        assert!(instructions.ends_with("1: 0 -> 5\n"));
        assert_eq!(instructions.lines().count(), 3);
    }

    #[test]
    fn svg_has_pins_and_lines() {
        let (layout, path) = sample();
        let svg = build_svg(&path, &layout, 0.1).to_string();
        assert_eq!(svg.matches("<circle").count(), 12);
        assert_eq!(svg.matches("<line").count(), 2);
        assert!(svg.contains("viewBox=\"0 0 4.0000 2.0000\""));
    }

    #[test]
    fn preview_draws_strings() {
        let (layout, path) = sample();
        let image = build_rgb(&path, &layout, 10.0).unwrap();
        assert_eq!(image.dimensions(), (40, 20));
        // pin 0 sits on the top left corner
        assert_eq!(image.get_pixel(0, 0), &Rgb([0, 0, 0]));
        let inked = image.pixels().filter(|pixel| pixel.0 == [0, 0, 0]).count();
        assert!(inked > 20);
    }

    #[test]
    fn report_is_json() {
        let (layout, path) = sample();
        let settings = Settings::<f64>::new(2);
        let json = Report::new(&settings, &layout, &path).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["pins"].as_array().map(Vec::len), Some(12));
        assert_eq!(value["path"]["connections"][1]["to"], 2);
        assert_eq!(value["sequence"], serde_json::json!([0, 6, 2]));
        assert_eq!(value["path"]["termination"], "Completed");
        assert_eq!(value["settings"]["darkness"]["mode"], "flat");
    }
}
