/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::errors::PhotosError;
use crate::gdata::namespaces::gml;
use crate::gdata::xml::{XmlElement, parse_number};

/// Location attached to a photo when it is uploaded or updated.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeoPosition {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl GeoPosition {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude: 0.0,
        }
    }

    pub fn with_altitude(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }
}

/// `<georss:where>` of a photo entry
#[derive(Debug, Clone, PartialEq)]
pub struct GeoRss {
    pub point: GmlPoint,
    pub envelope: Option<GmlEnvelope>,
}

impl GeoRss {
    pub(crate) fn parse(where_elem: &XmlElement) -> Result<Self, PhotosError> {
        let point = where_elem
            .element(gml("Point"))
            .ok_or(PhotosError::MissingElement("Point"))?;
        Ok(Self {
            point: GmlPoint::parse(point)?,
            envelope: where_elem
                .element(gml("Envelope"))
                .map(GmlEnvelope::parse)
                .transpose()?,
        })
    }

    pub fn to_position(&self) -> GeoPosition {
        GeoPosition::new(self.point.x, self.point.y)
    }
}

/// `<gml:Point>`; `x` is the latitude and `y` the longitude
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GmlPoint {
    pub x: f64,
    pub y: f64,
}

impl GmlPoint {
    pub(crate) fn parse(point: &XmlElement) -> Result<Self, PhotosError> {
        let (x, y) = coordinates("pos", &point.required_value(gml("pos"))?)?;
        Ok(Self { x, y })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GmlEnvelope {
    pub lower_corner_x: f64,
    pub lower_corner_y: f64,
    pub upper_corner_x: f64,
    pub upper_corner_y: f64,
}

impl GmlEnvelope {
    pub(crate) fn parse(envelope: &XmlElement) -> Result<Self, PhotosError> {
        let (lower_corner_x, lower_corner_y) = coordinates(
            "lowerCorner",
            &envelope.required_value(gml("lowerCorner"))?,
        )?;
        let (upper_corner_x, upper_corner_y) = coordinates(
            "upperCorner",
            &envelope.required_value(gml("upperCorner"))?,
        )?;
        Ok(Self {
            lower_corner_x,
            lower_corner_y,
            upper_corner_x,
            upper_corner_y,
        })
    }
}

// "lat lon" pair separated by whitespace
fn coordinates(field: &'static str, value: &str) -> Result<(f64, f64), PhotosError> {
    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(x), Some(y)) => Ok((parse_number(field, x)?, parse_number(field, y)?)),
        _ => Err(PhotosError::InvalidValue {
            field,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gdata::namespaces::georss;
    use crate::gdata::xml::XmlDocument;

    #[test]
    fn test_point_parsing() {
        let doc = XmlDocument::parse(
            "<georss:where xmlns:georss='http://www.georss.org/georss' xmlns:gml='http://www.opengis.net/gml'>\
               <gml:Point><gml:pos>37.4 -122.1</gml:pos></gml:Point>\
             </georss:where>",
        )
        .unwrap();
        assert!(doc.root().is(georss("where")));
        let geo = GeoRss::parse(doc.root()).unwrap();
        assert_eq!(geo.point, GmlPoint { x: 37.4, y: -122.1 });
        assert!(geo.envelope.is_none());
        assert_eq!(geo.to_position(), GeoPosition::new(37.4, -122.1));
    }

    #[test]
    fn test_envelope_parsing() {
        let doc = XmlDocument::parse(
            "<georss:where xmlns:georss='http://www.georss.org/georss' xmlns:gml='http://www.opengis.net/gml'>\
               <gml:Envelope>\
                 <gml:lowerCorner>37.3 -122.2</gml:lowerCorner>\
                 <gml:upperCorner>37.5 -122.0</gml:upperCorner>\
               </gml:Envelope>\
               <gml:Point><gml:pos>37.4 -122.1</gml:pos></gml:Point>\
             </georss:where>",
        )
        .unwrap();
        let envelope = GeoRss::parse(doc.root()).unwrap().envelope.unwrap();
        assert_eq!(envelope.lower_corner_x, 37.3);
        assert_eq!(envelope.upper_corner_y, -122.0);
    }

    #[test]
    fn test_bad_pos_is_error() {
        assert!(coordinates("pos", "37.4").is_err());
        assert!(matches!(
            coordinates("pos", "north -122.1"),
            Err(PhotosError::InvalidNumber { field: "pos", .. })
        ));
    }
}
