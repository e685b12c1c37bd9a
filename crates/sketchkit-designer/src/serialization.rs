//! Document codec.
//!
//! A document is a JSON sequence (also valid YAML flow syntax) written one
//! record per line. Block-style YAML sequences, as saved by earlier web
//! editors, are read as well. The first record is always the canvas size:
//!
//! ```text
//! [
//! {"type":"meta","size":[640,480]},
//! {"type":"line","points":"10,10:50,10"},
//! {"type":"path","d":"M0,0C10,-10 20,0 20,0","color":"red"}
//! ]
//! ```
//!
//! Writing is sparse: `color` is omitted when black and `width` when 1.
//! Reading is forgiving: unknown shape types are skipped, and a malformed
//! record stops decoding while keeping every shape read before it.

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::path::Path;

use crate::model::{
    CanvasMeta, Document, PathArrows, Shape, ShapeColor, ShapeKind, ShapeType, StrokeWidth,
};
use crate::path_data::{decode_path, decode_points, encode_path, encode_points};
use sketchkit_core::ParseError;

const META_TYPE: &str = "meta";

/// One shape as it appears on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapeRecord {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_width"
    )]
    pub width: Option<u8>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_text"
    )]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrow: Option<String>,
}

/// The leading canvas-size record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub size: [u32; 2],
}

/// Older writers stored the width class as a string.
fn lenient_width<'de, D>(deserializer: D) -> std::result::Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64().map(|v| v.round().clamp(0.0, 255.0) as u8),
        Some(Value::String(s)) => s.trim().parse::<u8>().ok(),
        _ => None,
    })
}

/// YAML readers resolve unquoted labels such as `42` or `true` to scalars;
/// they are still text.
fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Result of a forgiving decode.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Decoded {
    /// Everything decoded before the first failure.
    pub document: Document,
    /// The failure that stopped decoding, if any.
    pub error: Option<ParseError>,
}

impl Decoded {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Converts into a `Result`, discarding the partial document on failure.
    pub fn into_result(self) -> std::result::Result<Document, ParseError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.document),
        }
    }
}

/// Builds the sparse wire record for a shape.
pub fn encode_shape(shape: &Shape) -> ShapeRecord {
    let mut record = ShapeRecord {
        kind: shape.shape_type().name().to_string(),
        color: (shape.color != ShapeColor::default()).then(|| shape.color.name().to_string()),
        width: (shape.width != StrokeWidth::default()).then(|| shape.width.class()),
        ..Default::default()
    };
    match &shape.kind {
        ShapeKind::Path(arrows) => {
            record.d = Some(encode_path(&shape.points));
            record.arrow = arrows.name().map(str::to_string);
        }
        ShapeKind::Text(text) => {
            record.points = Some(encode_points(&shape.points));
            record.text = Some(text.clone());
        }
        _ => record.points = Some(encode_points(&shape.points)),
    }
    record
}

/// Decodes one record. `Ok(None)` means the type is unknown and the record
/// should be skipped.
pub fn decode_shape(record: &ShapeRecord, index: usize) -> Result<Option<Shape>, ParseError> {
    let Some(shape_type) = ShapeType::from_name(&record.kind) else {
        tracing::warn!("Skipping record {} with unknown type '{}'", index, record.kind);
        return Ok(None);
    };
    let missing = |field: &'static str| ParseError::MissingField {
        index,
        shape: record.kind.clone(),
        field,
    };

    let (kind, points) = match shape_type {
        ShapeType::Path => {
            let d = record.d.as_deref().ok_or_else(|| missing("d"))?;
            let arrows = record
                .arrow
                .as_deref()
                .map(PathArrows::from_name)
                .unwrap_or_default();
            (ShapeKind::Path(arrows), decode_path(d)?)
        }
        ShapeType::Text => {
            let text = record.text.clone().ok_or_else(|| missing("text"))?;
            let points = record.points.as_deref().ok_or_else(|| missing("points"))?;
            (ShapeKind::Text(text), decode_points(points)?)
        }
        other => {
            let points = record.points.as_deref().ok_or_else(|| missing("points"))?;
            (ShapeKind::plain(other), decode_points(points)?)
        }
    };

    let color = match record.color.as_deref() {
        Some(name) => ShapeColor::from_name(name).unwrap_or_else(|| {
            tracing::warn!("Unknown color '{}' in record {}, using black", name, index);
            ShapeColor::default()
        }),
        None => ShapeColor::default(),
    };
    let width = record
        .width
        .map(StrokeWidth::new)
        .unwrap_or_default();

    Ok(Some(
        Shape::try_new(kind, points)?
            .with_color(color)
            .with_width(width),
    ))
}

fn decode_meta(value: &Value, index: usize) -> Result<CanvasMeta, ParseError> {
    let invalid = |reason: String| ParseError::InvalidRecord { index, reason };
    let size = value
        .get("size")
        .and_then(Value::as_array)
        .filter(|a| a.len() == 2)
        .and_then(|a| Some((a[0].as_f64()?, a[1].as_f64()?)))
        .ok_or_else(|| invalid("meta needs 'size': [w, h]".to_string()))?;
    let (w, h) = size;
    if !(w.is_finite() && h.is_finite()) || w < 1.0 || h < 1.0 {
        return Err(invalid(format!("invalid canvas size {}x{}", w, h)));
    }
    Ok(CanvasMeta::new(w.round() as u32, h.round() as u32))
}

fn decode_record(value: Value, index: usize, doc: &mut Document) -> Result<(), ParseError> {
    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ParseError::InvalidRecord {
            index,
            reason: "expected an object with a string 'type'".to_string(),
        })?;

    if kind == META_TYPE {
        doc.meta = decode_meta(&value, index)?;
        return Ok(());
    }

    let record: ShapeRecord =
        serde_json::from_value(value).map_err(|e| ParseError::InvalidRecord {
            index,
            reason: e.to_string(),
        })?;
    if let Some(shape) = decode_shape(&record, index)? {
        doc.shapes.push(shape);
    }
    Ok(())
}

/// Reads the record sequence as JSON, falling back to YAML for block-style
/// documents. The reported reason comes from the parser the text looks
/// written for.
fn parse_container(text: &str) -> std::result::Result<Vec<Value>, ParseError> {
    let json_err = match serde_json::from_str::<Vec<Value>>(text) {
        Ok(records) => return Ok(records),
        Err(e) => e,
    };
    serde_yaml::from_str::<Vec<Value>>(text).map_err(|yaml_err| {
        let reason = if text.trim_start().starts_with('[') {
            json_err.to_string()
        } else {
            yaml_err.to_string()
        };
        ParseError::InvalidContainer { reason }
    })
}

/// Forgiving decode. Blank text is an empty document. The canvas size is
/// reset to its default before reading and only replaced by a `meta` record.
pub fn decode(text: &str) -> Decoded {
    let mut decoded = Decoded::default();
    if text.trim().is_empty() {
        return decoded;
    }

    let records = match parse_container(text) {
        Ok(records) => records,
        Err(err) => {
            tracing::warn!("Failed to read document: {}", err);
            decoded.error = Some(err);
            return decoded;
        }
    };

    for (index, value) in records.into_iter().enumerate() {
        if let Err(err) = decode_record(value, index, &mut decoded.document) {
            tracing::warn!(
                "Stopped decoding at record {} ({} shape(s) kept): {}",
                index,
                decoded.document.shapes.len(),
                err
            );
            decoded.error = Some(err);
            break;
        }
    }
    decoded
}

/// Strict decode: any malformed record fails the whole document.
pub fn decode_strict(text: &str) -> std::result::Result<Document, ParseError> {
    decode(text).into_result()
}

fn record_line<T: Serialize>(record: &T) -> String {
    // Records only hold strings and numbers, which always serialize.
    serde_json::to_string(record).unwrap_or_default()
}

/// Encodes a document, meta record first, one record per line.
pub fn encode(doc: &Document) -> String {
    let meta = MetaRecord {
        kind: META_TYPE.to_string(),
        size: [doc.meta.width, doc.meta.height],
    };
    let mut lines = vec![record_line(&meta)];
    lines.extend(doc.shapes.iter().map(|s| record_line(&encode_shape(s))));
    format!("[\n{}\n]\n", lines.join(",\n"))
}

/// Writes a document to disk.
pub fn save_to_file(doc: &Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, encode(doc))
        .with_context(|| format!("Failed to write sketch file: {}", path.display()))?;
    Ok(())
}

/// Reads a document from disk, rejecting malformed content.
pub fn load_from_file(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read sketch file: {}", path.display()))?;
    let doc = decode_strict(&text)
        .with_context(|| format!("Failed to parse sketch file: {}", path.display()))?;
    Ok(doc)
}
