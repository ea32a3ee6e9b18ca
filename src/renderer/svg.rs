//! SVG generation from a depicted molecule
//!
//! The produced document declares a private XML namespace and tags every
//! atom marker, bond and label with the atom names it belongs to, so
//! downstream tooling can recover per-atom geometry from the markup without
//! re-running the layout.

use crate::depict::{DepictionResult, Point};
use crate::graph::{BondOrder, BondStereo, Molecule};

use super::scene::{Scene, SceneAtom, SceneBond};
use super::{RenderError, RenderOptions};

/// Namespace URI for the per-atom identity attributes.
pub const ATOM_NAMESPACE: &str = "urn:ccd-depict:atom";

const LABEL_FONT_SIZE: f64 = 14.0;
const BOND_WIDTH: f64 = 2.0;
const DOUBLE_BOND_GAP: f64 = 2.2;
const TRIPLE_BOND_GAP: f64 = 4.0;
const WEDGE_HALF_WIDTH: f64 = 4.5;
const LABEL_HALO_RADIUS: f64 = 9.0;

/// Render a depicted molecule to an SVG string.
pub fn render_svg(
    molecule: &Molecule,
    depiction: &DepictionResult,
    options: &RenderOptions,
) -> Result<String, RenderError> {
    let scene = Scene::build(molecule, depiction, options)?;
    Ok(write_scene(&scene, options))
}

fn write_scene(scene: &Scene, options: &RenderOptions) -> String {
    let mut builder = SvgBuilder::new(scene.width, scene.height);
    builder.add_background(&options.stylesheet.resolve_or_default("background"));

    let bond_color = options.stylesheet.resolve_or_default("bond");
    for bond in &scene.bonds {
        builder.add_bond(bond, scene, &bond_color);
    }

    for atom in &scene.atoms {
        builder.add_atom_marker(atom);
    }

    for atom in &scene.atoms {
        if atom.labels.is_empty() {
            continue;
        }
        let halo = options.stylesheet.resolve_or_default("background");
        let color = options.stylesheet.element_color(atom.element);
        builder.add_label(atom, &halo, &color);
    }

    builder.build()
}

/// Build SVG elements incrementally.
struct SvgBuilder {
    width: u32,
    height: u32,
    elements: Vec<String>,
}

impl SvgBuilder {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            elements: vec![],
        }
    }

    fn add_background(&mut self, fill: &str) {
        self.elements.push(format!(
            r#"  <rect class="background" x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
            self.width, self.height, fill
        ));
    }

    fn add_bond(&mut self, bond: &SceneBond, scene: &Scene, color: &str) {
        let bgn = escape_xml(&scene.atoms[bond.bgn].name);
        let end = escape_xml(&scene.atoms[bond.end].name);
        let identity = format!(r#" atom:bgn="{bgn}" atom:end="{end}""#);

        match bond.stereo {
            BondStereo::WedgeUp => {
                self.add_wedge(bond, &identity, color, false);
                return;
            }
            BondStereo::WedgeDown => {
                self.add_wedge(bond, &identity, color, true);
                return;
            }
            BondStereo::None => {}
        }

        match bond.order {
            BondOrder::Single => {
                self.add_line(bond.from, bond.to, &bond.style, &identity, color, false);
            }
            BondOrder::Double => {
                for side in [-1.0, 1.0] {
                    let (from, to) = offset_segment(bond.from, bond.to, side * DOUBLE_BOND_GAP);
                    self.add_line(from, to, &bond.style, &identity, color, false);
                }
            }
            BondOrder::Triple => {
                self.add_line(bond.from, bond.to, &bond.style, &identity, color, false);
                for side in [-1.0, 1.0] {
                    let (from, to) = offset_segment(bond.from, bond.to, side * TRIPLE_BOND_GAP);
                    self.add_line(from, to, &bond.style, &identity, color, false);
                }
            }
            BondOrder::Aromatic => {
                self.add_line(bond.from, bond.to, &bond.style, &identity, color, false);
                let (from, to) = offset_segment(bond.from, bond.to, DOUBLE_BOND_GAP * 1.6);
                self.add_line(from, to, &bond.style, &identity, color, true);
            }
        }
    }

    fn add_line(
        &mut self,
        from: Point,
        to: Point,
        style: &str,
        identity: &str,
        color: &str,
        dashed: bool,
    ) {
        let dash = if dashed {
            r#" stroke-dasharray="4 3""#
        } else {
            ""
        };
        self.elements.push(format!(
            r#"  <line class="bond bond-{style}"{identity} x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{color}" stroke-width="{BOND_WIDTH}" stroke-linecap="round"{dash}/>"#,
            from.x, from.y, to.x, to.y
        ));
    }

    fn add_wedge(&mut self, bond: &SceneBond, identity: &str, color: &str, hashed: bool) {
        let (wide_a, wide_b) = offset_endpoints(bond.from, bond.to, WEDGE_HALF_WIDTH);
        let points = format!(
            "{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}",
            bond.from.x, bond.from.y, wide_a.x, wide_a.y, wide_b.x, wide_b.y
        );
        if hashed {
            self.elements.push(format!(
                r#"  <polygon class="bond bond-{}"{identity} points="{points}" fill="none" stroke="{color}" stroke-width="1" stroke-dasharray="2 2"/>"#,
                bond.style
            ));
        } else {
            self.elements.push(format!(
                r#"  <polygon class="bond bond-{}"{identity} points="{points}" fill="{color}" stroke="none"/>"#,
                bond.style
            ));
        }
    }

    /// Invisible per-atom anchor carrying the atom's name and position.
    fn add_atom_marker(&mut self, atom: &SceneAtom) {
        self.elements.push(format!(
            r#"  <circle class="atom" atom:name="{}" cx="{:.2}" cy="{:.2}" r="1" fill="none" stroke="none"/>"#,
            escape_xml(&atom.name),
            atom.pos.x,
            atom.pos.y
        ));
    }

    fn add_label(&mut self, atom: &SceneAtom, halo: &str, color: &str) {
        self.elements.push(format!(
            r#"  <circle class="label-halo" cx="{:.2}" cy="{:.2}" r="{LABEL_HALO_RADIUS}" fill="{halo}" stroke="none"/>"#,
            atom.pos.x, atom.pos.y
        ));
        for tspans in &atom.labels {
            let mut text = String::new();
            for (i, segment) in tspans.iter().enumerate() {
                let shift = segment_shift(i, segment);
                text.push_str(&format!(
                    "<tspan{shift}>{}</tspan>",
                    escape_xml(segment)
                ));
            }
            self.elements.push(format!(
                r#"  <text class="label" atom:name="{}" x="{:.2}" y="{:.2}" text-anchor="middle" dominant-baseline="central" font-family="sans-serif" font-size="{LABEL_FONT_SIZE}" fill="{color}">{text}</text>"#,
                escape_xml(&atom.name),
                atom.pos.x,
                atom.pos.y
            ));
        }
    }

    fn build(self) -> String {
        let mut svg = String::new();
        svg.push_str("<?xml version='1.0' encoding='UTF-8'?>\n");
        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" xmlns:atom="{ATOM_NAMESPACE}" width="{0}" height="{1}" viewBox="0 0 {0} {1}">"#,
            self.width, self.height
        ));
        svg.push('\n');
        for element in &self.elements {
            svg.push_str(element);
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }
}

/// Raise or lower a label segment: digit runs become subscripts (hydrogen
/// counts), charge segments become superscripts.
fn segment_shift(index: usize, segment: &str) -> &'static str {
    if index == 0 {
        return "";
    }
    if segment.chars().all(|c| c.is_ascii_digit()) {
        r#" baseline-shift="sub" font-size="10""#
    } else if segment.contains('+') || segment.contains('-') {
        r#" baseline-shift="super" font-size="10""#
    } else {
        ""
    }
}

/// Shift a segment sideways by `offset` pixels, shortening it slightly so
/// parallel strokes do not poke past the bond ends.
fn offset_segment(from: Point, to: Point, offset: f64) -> (Point, Point) {
    let (px, py) = perpendicular(from, to);
    let shrink = 0.12;
    let (dx, dy) = (to.x - from.x, to.y - from.y);
    (
        Point::new(from.x + px * offset + dx * shrink, from.y + py * offset + dy * shrink),
        Point::new(to.x + px * offset - dx * shrink, to.y + py * offset - dy * shrink),
    )
}

/// The two wide-end corners of a wedge at `to`.
fn offset_endpoints(from: Point, to: Point, half_width: f64) -> (Point, Point) {
    let (px, py) = perpendicular(from, to);
    (
        Point::new(to.x + px * half_width, to.y + py * half_width),
        Point::new(to.x - px * half_width, to.y - py * half_width),
    )
}

fn perpendicular(from: Point, to: Point) -> (f64, f64) {
    let (dx, dy) = (to.x - from.x, to.y - from.y);
    let len = dx.hypot(dy);
    if len < 1e-9 {
        (0.0, 0.0)
    } else {
        (-dy / len, dx / len)
    }
}

/// Escape special XML characters for element content and attribute values.
pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
