use pointregion::geometry::{Frame, Point};
use pointregion::quadtree::Quadtree;

fn main() {
    // A point-region quadtree over weather stations plotted by (longitude offset,
    // latitude offset) from a regional reference point, normalized into [0, 1).
    let mut stations: Quadtree<&str> = Quadtree::new();

    let bulk_points = vec![
        (Point::new(0.05, 0.10), "Harbor"),
        (Point::new(0.12, 0.08), "Lighthouse"),
        (Point::new(0.80, 0.85), "Summit"),
        (Point::new(0.83, 0.90), "Ridge"),
        (Point::new(0.45, 0.50), "Midtown"),
    ];
    let inserted = stations.insert_bulk(&bulk_points);
    println!("bulk inserted {inserted} stations");

    stations
        .insert(Point::new(0.47, 0.52), "Riverside")
        .expect("within the unit square domain");

    let query = Point::new(0.46, 0.51);
    if let Some(nearest) = stations.nearest(query) {
        println!(
            "nearest station to ({:.2}, {:.2}) is {} at ({:.2}, {:.2})",
            query.x, query.y, nearest.payload, nearest.position.x, nearest.position.y
        );
    }

    // A sparse query far from any station: nearest() still works, but an expanding-disk
    // search shows how the radius grows until something is found.
    let sparse_query = Point::new(0.99, 0.01);
    if let Some(found) = stations.nearest_by_expanding_disk(sparse_query, 0.05, 0.05) {
        println!(
            "expanding-disk search from ({:.2}, {:.2}) found {} at ({:.2}, {:.2})",
            sparse_query.x, sparse_query.y, found.payload, found.position.x, found.position.y
        );
    }

    let northeast_quadrant = Frame::new(Point::new(0.5, 1.0), Point::new(1.0, 0.5));
    let in_range = stations.query_range(northeast_quadrant);
    println!("stations in the northeast quadrant:");
    for station in &in_range {
        println!("  {} at ({:.2}, {:.2})", station.payload, station.position.x, station.position.y);
    }

    let nearby = stations.query_disk(Point::new(0.1, 0.1), 0.1);
    println!("stations within 0.1 of (0.10, 0.10):");
    for station in &nearby {
        println!("  {} at ({:.2}, {:.2})", station.payload, station.position.x, station.position.y);
    }

    println!("\n{}", stations.to_dot());
}
