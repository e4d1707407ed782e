//! Classified layer regions.
//!
//! A [`Surface`] is an [`ExPolygon`] tagged with what kind of region it is.
//! The clipping layer only looks at the geometry; the tag travels with it so
//! callers can clip surface collections directly.

use super::{ExPolygon, ExPolygons};
use crate::CoordF;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a region is used for. Clipping ignores it; it only rides along.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceType {
    Top,
    Bottom,
    /// Bottom region with nothing underneath.
    BottomBridge,
    #[default]
    InternalSolid,
    /// Sparse region.
    Internal,
    InternalBridge,
    InternalVoid,
}

impl SurfaceType {
    pub const ALL: [SurfaceType; 7] = [
        SurfaceType::Top,
        SurfaceType::Bottom,
        SurfaceType::BottomBridge,
        SurfaceType::InternalSolid,
        SurfaceType::Internal,
        SurfaceType::InternalBridge,
        SurfaceType::InternalVoid,
    ];

    #[inline]
    pub fn is_top(self) -> bool {
        self == SurfaceType::Top
    }

    #[inline]
    pub fn is_bottom(self) -> bool {
        matches!(self, SurfaceType::Bottom | SurfaceType::BottomBridge)
    }

    #[inline]
    pub fn is_bridge(self) -> bool {
        matches!(self, SurfaceType::BottomBridge | SurfaceType::InternalBridge)
    }

    /// Neither top nor bottom.
    #[inline]
    pub fn is_internal(self) -> bool {
        !self.is_top() && !self.is_bottom()
    }

    pub fn label(self) -> &'static str {
        match self {
            SurfaceType::Top => "top",
            SurfaceType::Bottom => "bottom",
            SurfaceType::BottomBridge => "bottom bridge",
            SurfaceType::InternalSolid => "internal solid",
            SurfaceType::Internal => "internal",
            SurfaceType::InternalBridge => "internal bridge",
            SurfaceType::InternalVoid => "internal void",
        }
    }
}

impl fmt::Display for SurfaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A classified region within a layer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub expolygon: ExPolygon,
    pub surface_type: SurfaceType,
    /// In mm; negative when unknown.
    pub thickness: CoordF,
    pub thickness_layers: usize,
    /// Radians.
    pub bridge_angle: Option<CoordF>,
}

impl Surface {
    pub fn new(expolygon: ExPolygon, surface_type: SurfaceType) -> Self {
        Self {
            expolygon,
            surface_type,
            thickness: -1.0,
            thickness_layers: 1,
            bridge_angle: None,
        }
    }

    /// Same classification, different geometry.
    pub fn with_expolygon(&self, expolygon: ExPolygon) -> Self {
        Self {
            expolygon,
            ..self.clone()
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.expolygon.is_empty()
    }

    #[inline]
    pub fn area(&self) -> CoordF {
        self.expolygon.area()
    }
}

pub type Surfaces = Vec<Surface>;

/// Build surfaces of one type from a set of ExPolygons.
pub fn surfaces_from_expolygons(expolygons: ExPolygons, surface_type: SurfaceType) -> Surfaces {
    expolygons
        .into_iter()
        .map(|ex| Surface::new(ex, surface_type))
        .collect()
}

/// Strip the classification.
pub fn to_expolygons(surfaces: &[Surface]) -> ExPolygons {
    surfaces.iter().map(|s| s.expolygon.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Polygon};

    #[test]
    fn test_surface_type_flags() {
        let internal = SurfaceType::ALL.iter().filter(|t| t.is_internal()).count();
        assert_eq!(internal, 4);
        assert!(SurfaceType::BottomBridge.is_bottom() && SurfaceType::BottomBridge.is_bridge());
        assert!(SurfaceType::InternalVoid.is_internal());
        assert!(!SurfaceType::Top.is_internal());
        assert_eq!(SurfaceType::default(), SurfaceType::InternalSolid);
        assert_eq!(SurfaceType::InternalBridge.to_string(), "internal bridge");
    }

    #[test]
    fn test_surfaces_round_trip() {
        let ex = ExPolygon::new(Polygon::rectangle(Point::new(0, 0), Point::new(10, 10)));
        let surfaces = surfaces_from_expolygons(vec![ex.clone()], SurfaceType::Top);
        assert_eq!(surfaces[0].surface_type, SurfaceType::Top);
        assert_eq!(surfaces[0].area(), 100.0);
        assert_eq!(to_expolygons(&surfaces), vec![ex]);

        let other = surfaces[0].with_expolygon(ExPolygon::default());
        assert!(other.is_empty());
        assert_eq!(other.surface_type, SurfaceType::Top);
    }
}
