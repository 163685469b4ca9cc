//! Geospatial constraint values
//!
//! Shapes are classified by the keys they carry, checked in a fixed order:
//! `latitude` (point), `south` (box), `radius` (circle), `point` (polygon).
//! A circle also carries a `point`, so the radius check must come first.

use serde_json::{json, Map, Value};
use sq_core::{has_field, Args, Query};

/// A classified geospatial shape
#[derive(Debug, Clone, PartialEq)]
pub enum GeoShape {
    Point(Value),
    BoundingBox(Value),
    Circle(Value),
    Polygon(Value),
}

impl GeoShape {
    /// Classify a shape mapping, handing back anything unrecognized
    pub fn classify(shape: Value) -> Result<Self, Value> {
        if has_field(&shape, "latitude") {
            Ok(Self::Point(shape))
        } else if has_field(&shape, "south") {
            Ok(Self::BoundingBox(shape))
        } else if has_field(&shape, "radius") {
            Ok(Self::Circle(shape))
        } else if has_field(&shape, "point") {
            Ok(Self::Polygon(shape))
        } else {
            Err(shape)
        }
    }

    // Non-finite coordinates serialize as JSON null, so a shape built from
    // them may reclassify as another kind. `geospatial_shapes_constraint`
    // keeps the constructed kind.
    pub fn point(latitude: f64, longitude: f64) -> Self {
        Self::Point(json!({ "latitude": latitude, "longitude": longitude }))
    }

    pub fn bounding_box(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self::BoundingBox(json!({
            "south": south,
            "west": west,
            "north": north,
            "east": east,
        }))
    }

    pub fn circle(radius: f64, latitude: f64, longitude: f64) -> Self {
        Self::Circle(json!({
            "radius": radius,
            "point": { "latitude": latitude, "longitude": longitude },
        }))
    }

    /// Polygon from `(latitude, longitude)` vertices
    pub fn polygon(vertices: &[(f64, f64)]) -> Self {
        let points: Vec<Value> = vertices
            .iter()
            .map(|(latitude, longitude)| json!({ "latitude": latitude, "longitude": longitude }))
            .collect();
        Self::Polygon(json!({ "point": points }))
    }

    /// Field of the shape set this shape belongs to
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Point(_) => "point",
            Self::BoundingBox(_) => "box",
            Self::Circle(_) => "circle",
            Self::Polygon(_) => "polygon",
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            Self::Point(v) | Self::BoundingBox(v) | Self::Circle(v) | Self::Polygon(v) => v,
        }
    }
}

impl From<GeoShape> for Value {
    fn from(shape: GeoShape) -> Self {
        shape.into_value()
    }
}

/// Shapes partitioned by kind, each list in input order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoShapeSet {
    pub points: Vec<Value>,
    pub boxes: Vec<Value>,
    pub circles: Vec<Value>,
    pub polygons: Vec<Value>,
}

impl GeoShapeSet {
    pub fn push(&mut self, shape: GeoShape) {
        match shape {
            GeoShape::Point(v) => self.points.push(v),
            GeoShape::BoundingBox(v) => self.boxes.push(v),
            GeoShape::Circle(v) => self.circles.push(v),
            GeoShape::Polygon(v) => self.polygons.push(v),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len() + self.boxes.len() + self.circles.len() + self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `{ point, box, circle, polygon }` fields
    pub fn into_fields(self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("point".into(), Value::Array(self.points));
        fields.insert("box".into(), Value::Array(self.boxes));
        fields.insert("circle".into(), Value::Array(self.circles));
        fields.insert("polygon".into(), Value::Array(self.polygons));
        fields
    }
}

impl FromIterator<GeoShape> for GeoShapeSet {
    fn from_iter<I: IntoIterator<Item = GeoShape>>(iter: I) -> Self {
        let mut set = Self::default();
        for shape in iter {
            set.push(shape);
        }
        set
    }
}

/// Partition shape mappings into a shape set, dropping unrecognized shapes
pub fn partition_shapes(shapes: Args) -> GeoShapeSet {
    shapes
        .normalize()
        .into_iter()
        .filter_map(|shape| match GeoShape::classify(shape) {
            Ok(shape) => Some(shape),
            Err(shape) => {
                tracing::debug!(shape = %shape, "Dropping unrecognized geospatial shape");
                None
            }
        })
        .collect()
}

/// `{ point: [...], box: [...], circle: [...], polygon: [...] }`
pub fn geospatial_values(shapes: Args) -> Value {
    Value::Object(partition_shapes(shapes).into_fields())
}

/// `geospatial-constraint-query`
pub fn geospatial_constraint(name: &str, shapes: Args) -> Query {
    let shapes = Args::new(shapes.into_rest());

    constraint_query(name, partition_shapes(shapes))
}

/// `geospatial-constraint-query` from typed shapes, filed by their own kind
pub fn geospatial_shapes_constraint<I>(name: &str, shapes: I) -> Query
where
    I: IntoIterator<Item = GeoShape>,
{
    constraint_query(name, shapes.into_iter().collect())
}

fn constraint_query(name: &str, shapes: GeoShapeSet) -> Query {
    let mut body = Map::new();
    body.insert("constraint-name".into(), Value::String(name.to_string()));
    body.extend(shapes.into_fields());

    Query::new("geospatial-constraint-query", Value::Object(body))
}
