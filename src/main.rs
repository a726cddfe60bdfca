use pointregion::geometry::{Frame, Point};
use pointregion::quadtree::Quadtree;
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
struct Song {
    title: &'static str,
    artist: &'static str,
}

fn main() {
    println!("{}", "=".repeat(100));
    println!("Mood-space nearest-song lookup");

    let mut tree: Quadtree<Song> = Quadtree::new();

    let catalog = [
        (0.10, 0.15, "Stormy Weather", "Etta James"),
        (0.85, 0.90, "Walking on Sunshine", "Katrina and the Waves"),
        (0.30, 0.40, "Mad World", "Gary Jules"),
        (0.70, 0.20, "Seven Nation Army", "The White Stripes"),
        (0.55, 0.55, "Dreams", "Fleetwood Mac"),
    ];

    info!("inserting {} songs by mood vector", catalog.len());
    for (energy, valence, title, artist) in catalog {
        tree.insert(Point::new(energy, valence), Song { title, artist })
            .expect("catalog mood vectors lie within [0, 1)^2");
    }

    let query = Point::new(0.25, 0.35);
    info!("looking up the song nearest to mood {:?}", query);
    if let Some(nearest) = tree.nearest(query) {
        println!(
            "Nearest to mood ({:.2}, {:.2}): \"{}\" by {}",
            query.x, query.y, nearest.payload.title, nearest.payload.artist
        );
    }

    let somber_corner = Frame::new(Point::new(0.0, 0.5), Point::new(0.5, 0.0));
    let somber_songs = tree.query_range(somber_corner);
    println!("Songs in the low-energy, low-valence quadrant:");
    for nd in &somber_songs {
        println!("  \"{}\" by {}", nd.payload.title, nd.payload.artist);
    }

    println!("{}", "=".repeat(100));
}
