use std::fmt;

/// How many points a shape type consumes before it is complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointCount {
    Fixed(usize),
    /// `path` grows until the user finishes it; `text` needs a string.
    Variable,
}

/// Plain tag for each drawable shape type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeType {
    Line,
    Arrow,
    BiArrow,
    DArrow,
    Arc,
    ArcArrow,
    ArcBiArrow,
    Rect,
    RectFill,
    Ellipse,
    EllipseFill,
    Star,
    Check,
    Done,
    Text,
    Path,
}

impl ShapeType {
    pub const ALL: [ShapeType; 16] = [
        ShapeType::Line,
        ShapeType::Arrow,
        ShapeType::BiArrow,
        ShapeType::DArrow,
        ShapeType::Arc,
        ShapeType::ArcArrow,
        ShapeType::ArcBiArrow,
        ShapeType::Rect,
        ShapeType::RectFill,
        ShapeType::Ellipse,
        ShapeType::EllipseFill,
        ShapeType::Star,
        ShapeType::Check,
        ShapeType::Done,
        ShapeType::Text,
        ShapeType::Path,
    ];

    /// Wire name used in the `type` field of a record.
    pub fn name(&self) -> &'static str {
        match self {
            ShapeType::Line => "line",
            ShapeType::Arrow => "arrow",
            ShapeType::BiArrow => "biarrow",
            ShapeType::DArrow => "darrow",
            ShapeType::Arc => "arc",
            ShapeType::ArcArrow => "arcarrow",
            ShapeType::ArcBiArrow => "arcbiarrow",
            ShapeType::Rect => "rect",
            ShapeType::RectFill => "rectfill",
            ShapeType::Ellipse => "ellipse",
            ShapeType::EllipseFill => "ellipsefill",
            ShapeType::Star => "star",
            ShapeType::Check => "check",
            ShapeType::Done => "done",
            ShapeType::Text => "text",
            ShapeType::Path => "path",
        }
    }

    /// Parses a wire name. Older documents spell the two-headed arrows
    /// `barrow` and `dallow`; both are still accepted.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "barrow" => return Some(ShapeType::BiArrow),
            "dallow" => return Some(ShapeType::DArrow),
            _ => {}
        }
        Self::ALL.iter().copied().find(|t| t.name() == name)
    }

    pub fn point_count(&self) -> PointCount {
        match self {
            ShapeType::Line
            | ShapeType::Arrow
            | ShapeType::BiArrow
            | ShapeType::DArrow
            | ShapeType::Rect
            | ShapeType::RectFill
            | ShapeType::Ellipse
            | ShapeType::EllipseFill => PointCount::Fixed(2),
            ShapeType::Arc | ShapeType::ArcArrow | ShapeType::ArcBiArrow => PointCount::Fixed(3),
            ShapeType::Star | ShapeType::Check | ShapeType::Done => PointCount::Fixed(1),
            ShapeType::Text | ShapeType::Path => PointCount::Variable,
        }
    }

    /// Minimum number of points a valid shape of this type carries.
    pub fn min_points(&self) -> usize {
        match self.point_count() {
            PointCount::Fixed(n) => n,
            PointCount::Variable => 1,
        }
    }

    /// Icons and text are anchored at a point and never scale.
    pub fn is_resizable(&self) -> bool {
        !(self.is_icon() || matches!(self, ShapeType::Text))
    }

    /// Types drawn with a fixed-pixel glyph and a 20x20 footprint.
    pub fn is_icon(&self) -> bool {
        matches!(self, ShapeType::Star | ShapeType::Check | ShapeType::Done)
    }

    /// Types whose vertices can be grabbed in path-edit mode.
    pub fn has_editable_points(&self) -> bool {
        matches!(
            self,
            ShapeType::Path | ShapeType::Arc | ShapeType::ArcArrow | ShapeType::ArcBiArrow
        )
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
