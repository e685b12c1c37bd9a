//! Vertex token and path command string formats.
//!
//! Ordinary shapes store vertices as `x,y` tokens joined by `:`; a vertex
//! carrying control points prepends them (`cx,cy,dx,dy,x,y` or `dx,dy,x,y`).
//! Freehand paths use an SVG-like command string with `M`, `L` and `C`.

use crate::model::{Segment, Vertex};
use sketchkit_core::{ParseError, Point};

/// Shortest round-trip decimal form; integers print without a fraction and
/// negative zero prints as `0`.
pub fn format_number(v: f64) -> String {
    if v == 0.0 {
        "0".to_string()
    } else {
        format!("{}", v)
    }
}

fn format_pair(p: Point) -> String {
    format!("{},{}", format_number(p.x), format_number(p.y))
}

fn parse_number(field: &str, token: &str) -> Result<f64, ParseError> {
    let trimmed = field.trim();
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParseError::InvalidCoordinate {
            token: token.to_string(),
            reason: format!("'{}' is not a number", trimmed),
        })
}

/// Encodes one vertex token. A vertex with only a leading control writes
/// its trailing control as the vertex itself so the 6-field form stays
/// unambiguous.
pub fn encode_vertex(v: &Vertex) -> String {
    match (v.c, v.d) {
        (None, None) => format_pair(v.pos),
        (None, Some(d)) => format!("{},{}", format_pair(d), format_pair(v.pos)),
        (Some(c), d) => format!(
            "{},{},{}",
            format_pair(c),
            format_pair(d.unwrap_or(v.pos)),
            format_pair(v.pos)
        ),
    }
}

/// Decodes one vertex token, reading fields from the end: the last two are
/// `x,y`, the four before the end `dx,dy`, and with six or more fields the
/// first two are `cx,cy`.
pub fn decode_vertex(token: &str) -> Result<Vertex, ParseError> {
    let fields = token
        .split(',')
        .map(|f| parse_number(f, token))
        .collect::<Result<Vec<f64>, _>>()?;
    let n = fields.len();
    if n < 2 {
        return Err(ParseError::InvalidCoordinate {
            token: token.to_string(),
            reason: "expected at least x,y".to_string(),
        });
    }
    let mut vertex = Vertex::new(fields[n - 2], fields[n - 1]);
    if n >= 4 {
        let d = Point::new(fields[n - 4], fields[n - 3]);
        if d != vertex.pos {
            vertex.d = Some(d);
        }
    }
    if n >= 6 {
        vertex.c = Some(Point::new(fields[0], fields[1]));
    }
    Ok(vertex)
}

pub fn encode_points(points: &[Vertex]) -> String {
    points
        .iter()
        .map(encode_vertex)
        .collect::<Vec<_>>()
        .join(":")
}

pub fn decode_points(text: &str) -> Result<Vec<Vertex>, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    text.split(':').map(|t| decode_vertex(t.trim())).collect()
}

/// Encodes a path's vertices as a command string. Absent controls are
/// written as their fallback anchors.
pub fn encode_path(points: &[Vertex]) -> String {
    let Some(first) = points.first() else {
        return String::new();
    };
    let mut out = format!("M{}", format_pair(first.pos));
    for w in points.windows(2) {
        match Segment::between(&w[0], &w[1]) {
            Segment::Line(_, to) => {
                out.push('L');
                out.push_str(&format_pair(to));
            }
            Segment::Cubic(_, c1, c2, to) => {
                out.push('C');
                out.push_str(&format_pair(c1));
                out.push(' ');
                out.push_str(&format_pair(c2));
                out.push(' ');
                out.push_str(&format_pair(to));
            }
        }
    }
    out
}

fn invalid_path(fragment: &str, reason: impl Into<String>) -> ParseError {
    ParseError::InvalidPathData {
        fragment: fragment.chars().take(32).collect(),
        reason: reason.into(),
    }
}

fn read_pairs(args: &str, fragment: &str) -> Result<Vec<Point>, ParseError> {
    let numbers = args
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| parse_number(s, fragment))
        .collect::<Result<Vec<f64>, _>>()?;
    if numbers.len() % 2 != 0 {
        return Err(invalid_path(fragment, "odd number of coordinates"));
    }
    Ok(numbers.chunks(2).map(|c| Point::new(c[0], c[1])).collect())
}

fn cubic_vertex(prev: Point, c1: Option<Point>, c2: Option<Point>, to: Point) -> Vertex {
    let mut v = Vertex::at(to);
    v.c = c1.filter(|c| *c != prev);
    v.d = c2.filter(|d| *d != to);
    v
}

/// Decodes a command string produced by [`encode_path`]. A control equal to
/// its fallback anchor is read back as absent.
///
/// `C` takes its pairs in groups of three (control 1, control 2, end); a
/// trailing group of two is control 1 plus end, a lone pair is just the end.
pub fn decode_path(data: &str) -> Result<Vec<Vertex>, ParseError> {
    let mut vertices: Vec<Vertex> = Vec::new();
    let mut rest = data.trim();

    while !rest.is_empty() {
        let mut chars = rest.chars();
        let Some(cmd) = chars.next() else { break };
        let body = chars.as_str();
        let end = body
            .find(|c: char| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
            .unwrap_or(body.len());
        let (args, tail) = body.split_at(end);
        let pairs = read_pairs(args, rest)?;

        match cmd {
            'M' => {
                if !vertices.is_empty() {
                    return Err(invalid_path(rest, "move command after the first point"));
                }
                let Some((first, more)) = pairs.split_first() else {
                    return Err(invalid_path(rest, "M needs a coordinate pair"));
                };
                vertices.push(Vertex::at(*first));
                vertices.extend(more.iter().copied().map(Vertex::at));
            }
            'L' => {
                if vertices.is_empty() {
                    return Err(invalid_path(rest, "path must start with M"));
                }
                if pairs.is_empty() {
                    return Err(invalid_path(rest, "L needs a coordinate pair"));
                }
                vertices.extend(pairs.iter().copied().map(Vertex::at));
            }
            'C' => {
                if pairs.is_empty() {
                    return Err(invalid_path(rest, "C needs a coordinate pair"));
                }
                for group in pairs.chunks(3) {
                    let prev = vertices
                        .last()
                        .map(|v| v.pos)
                        .ok_or_else(|| invalid_path(rest, "path must start with M"))?;
                    let v = match *group {
                        [c1, c2, to] => cubic_vertex(prev, Some(c1), Some(c2), to),
                        [c1, to] => cubic_vertex(prev, Some(c1), None, to),
                        [to] => Vertex::at(to),
                        _ => continue,
                    };
                    vertices.push(v);
                }
            }
            other => {
                return Err(invalid_path(rest, format!("unsupported command '{}'", other)));
            }
        }
        rest = tail.trim_start();
    }

    Ok(vertices)
}
