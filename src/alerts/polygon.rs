//! GeoJSON geometry covering the area of an alert.
//!
//! The feed ships the geometry as a JSON encoded string, for instance
//! `"{\"type\":\"Polygon\",\"coordinates\":[[[-50.1,-20.3],[-50.2,-20.4],[-50.1,-20.3]]]}"`.
//! Most alerts cover a single `Polygon`, alerts spanning disjoint zones come
//! as a `MultiPolygon`.

use std::fmt;

use serde::Deserialize;

/// A `[longitude, latitude]` pair of a polygon ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub longitude: f64,
    pub latitude: f64,
}

/// Polygon geometry made of linear rings.
///
/// The first ring is the exterior boundary, the following ones are holes.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    rings: Vec<Vec<Position>>,
}

/// Area impacted by an alert.
#[derive(Debug, Clone, PartialEq)]
pub enum Area {
    Polygon(Polygon),
    MultiPolygon(Vec<Polygon>),
}

/// GeoJSON geometry object as found on the wire.
#[derive(Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Polygon { coordinates: Vec<Vec<Vec<f64>>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Vec<f64>>>> },
}

impl Polygon {
    fn from_coordinates(coordinates: Vec<Vec<Vec<f64>>>) -> Result<Self, String> {
        if coordinates.is_empty() {
            return Err("polygon without any ring".to_string());
        }

        let rings = coordinates
            .into_iter()
            .map(|ring| {
                ring.into_iter()
                    .map(|position| match position.as_slice() {
                        [longitude, latitude, ..] => Ok(Position {
                            longitude: *longitude,
                            latitude: *latitude,
                        }),
                        _ => Err(format!("invalid position {:?}", position)),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Polygon { rings })
    }

    /// The exterior boundary.
    pub fn exterior(&self) -> &[Position] {
        &self.rings[0]
    }

    /// The holes, if any.
    pub fn interiors(&self) -> &[Vec<Position>] {
        &self.rings[1..]
    }
}

impl Area {
    /// Decodes a GeoJSON `Polygon` or `MultiPolygon` geometry.
    ///
    /// Members after longitude and latitude (altitude) are ignored.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem when the string is not JSON, the
    /// geometry is neither a polygon nor a multi polygon, a polygon has no
    /// ring, a multi polygon has no polygon, or a position has fewer than two
    /// numbers.
    pub fn from_geojson(raw: &str) -> Result<Self, String> {
        let geometry: Geometry =
            serde_json::from_str(raw).map_err(|err| format!("invalid GeoJSON geometry: {}", err))?;

        match geometry {
            Geometry::Polygon { coordinates } => {
                Ok(Area::Polygon(Polygon::from_coordinates(coordinates)?))
            }
            Geometry::MultiPolygon { coordinates } => {
                if coordinates.is_empty() {
                    return Err("multi polygon without any polygon".to_string());
                }
                let polygons = coordinates
                    .into_iter()
                    .map(Polygon::from_coordinates)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Area::MultiPolygon(polygons))
            }
        }
    }

    /// Every polygon of the area, a single one for [`Area::Polygon`].
    pub fn polygons(&self) -> &[Polygon] {
        match self {
            Area::Polygon(polygon) => std::slice::from_ref(polygon),
            Area::MultiPolygon(polygons) => polygons,
        }
    }
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "exterior points={}, holes={}",
            self.exterior().len(),
            self.interiors().len()
        )
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Area::Polygon(polygon) => write!(f, "polygon {}", polygon),
            Area::MultiPolygon(_) => write!(f, "multi polygon parts={}", self.polygons().len()),
        }
    }
}
