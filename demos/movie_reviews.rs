//! Sample application: a small catalogue of movie reviews.
//!
//! Run with `RUST_LOG=btree_map=trace cargo run --example movie_reviews`
//! to watch the tree split and rebalance.

use btree_map::BTreeMap;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const B_FACTOR: usize = 2;

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "btree_map=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut movie_reviews: BTreeMap<String, String, B_FACTOR> = BTreeMap::new();

    // Review some movies.
    for (movie, review) in [
        ("Office Space", "Deals with real issues in the workplace."),
        ("Pulp Fiction", "Masterpiece."),
        ("The Godfather", "Very enjoyable."),
        ("The Blues Brothers", "Eye lyked it a lot."),
    ] {
        movie_reviews.insert(movie.to_string(), review.to_string());
    }

    // Check for a specific one.
    if movie_reviews.find("Les Misérables").is_none() {
        println!("We've got some reviews, but Les Misérables ain't one.");
    }

    // Oops, this review has a lot of spelling mistakes, let's delete it.
    movie_reviews.erase("The Blues Brothers");

    // Look up the values associated with some keys.
    for movie in ["Up!", "Office Space"] {
        match movie_reviews.find(movie) {
            Some(review) => println!("Movie {movie} has review: {review}"),
            None => println!("Movie {movie} does not have review."),
        }
    }

    tracing::info!(stats = %movie_reviews.stats(), "done");
}
