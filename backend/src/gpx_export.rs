use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use geo_types::Point;
use gpx::{Gpx, GpxVersion, Track, TrackSegment, Waypoint};

use crate::error::RouteIqError;
use crate::models::Coordinate;

/// Encodes a sequenced route as base64 GPX 1.1: one named waypoint per stop
/// plus a single track through them in visiting order.
pub fn encode_route_as_gpx<S: AsRef<str>>(
    stops: &[S],
    path: &[Coordinate],
) -> Result<String, RouteIqError> {
    let mut gpx = Gpx {
        version: GpxVersion::Gpx11,
        creator: Some("routeiq".into()),
        ..Default::default()
    };
    let mut track = Track {
        name: Some("routeiq optimized route".into()),
        ..Default::default()
    };

    let mut segment = TrackSegment::new();
    for (name, coord) in stops.iter().zip(path) {
        let mut waypoint = to_waypoint(coord);
        waypoint.name = Some(name.as_ref().to_string());
        gpx.waypoints.push(waypoint.clone());
        segment.points.push(waypoint);
    }
    track.segments.push(segment);
    gpx.tracks.push(track);

    let mut buffer = Vec::new();
    gpx::write(&gpx, &mut buffer)?;
    Ok(BASE64.encode(buffer))
}

fn to_waypoint(coord: &Coordinate) -> Waypoint {
    Waypoint::new(Point::new(coord.lon, coord.lat))
}
