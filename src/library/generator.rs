//! Random demo tracks for filling an empty library.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::model::{TrackId, TrackRecord};

/// Default number of tracks for `generate`.
pub const DEFAULT_COUNT: usize = 50;

const ARTISTS: [&str; 10] = [
    "Arctic Monkeys",
    "Eminem",
    "Coldplay",
    "Adele",
    "Drake",
    "The Weeknd",
    "Imagine Dragons",
    "Metallica",
    "Linkin Park",
    "Billie Eilish",
];

const TITLES: [&str; 10] = [
    "Sunrise",
    "Lost in Time",
    "Falling Stars",
    "Midnight Drive",
    "Broken Dreams",
    "Skyfall",
    "Thunderstorm",
    "Remember Me",
    "Gravity",
    "Blue Lights",
];

/// Generate `count` tracks with no attached file.
///
/// Durations fall in `[2.0, 10.0]` minutes, rounded to one decimal.
pub fn generate_tracks<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<TrackRecord> {
    (0..count)
        .map(|_| {
            let artist = ARTISTS.choose(rng).copied().unwrap_or(ARTISTS[0]);
            let title = TITLES.choose(rng).copied().unwrap_or(TITLES[0]);
            let duration = (rng.random_range(2.0..10.0_f64) * 10.0).round() / 10.0;

            TrackRecord {
                id: TrackId::new(),
                artist: artist.to_string(),
                title: title.to_string(),
                duration_minutes: duration,
                ..TrackRecord::default()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_generates_requested_count() {
        let mut rng = StdRng::seed_from_u64(7);
        let tracks = generate_tracks(&mut rng, DEFAULT_COUNT);
        assert_eq!(tracks.len(), 50);
    }

    #[test]
    fn test_generated_tracks_are_valid_manual_entries() {
        let mut rng = StdRng::seed_from_u64(42);
        for track in generate_tracks(&mut rng, 200) {
            assert!(track.validate().is_ok(), "{:?}", track);
            assert!(!track.has_file());
            assert!((2.0..=10.0).contains(&track.duration_minutes));
            let tenths = track.duration_minutes * 10.0;
            assert!((tenths - tenths.round()).abs() < 1e-9);
            assert!(ARTISTS.contains(&track.artist.as_str()));
            assert!(TITLES.contains(&track.title.as_str()));
        }
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let mut rng = StdRng::seed_from_u64(1);
        let tracks = generate_tracks(&mut rng, 20);
        let mut ids: Vec<_> = tracks.iter().map(|t| t.id.to_string()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn test_zero_count() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(generate_tracks(&mut rng, 0).is_empty());
    }
}
