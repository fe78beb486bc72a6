//! Writes a small synthetic chart dataset (`sample_charts.csv`) so the
//! explorer and its loader can be exercised without the real export.
//! Deterministic: the same file comes out on every run.

use anyhow::Result;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// (track, artist, popularity baseline, danceability, energy, acousticness,
/// instrumentalness, positiveness, liveness, speechiness)
type TrackProfile = (
    &'static str,
    &'static str,
    f64,
    [f64; 7],
);

const TRACKS: [TrackProfile; 12] = [
    ("Neon Nights", "Aurora Fields", 88.0, [0.82, 0.12, 0.75, 0.01, 0.70, 0.15, 0.05]),
    ("Paper Planes Home", "The Lantern Club", 74.0, [0.61, 0.55, 0.48, 0.00, 0.52, 0.11, 0.04]),
    ("Gravity Well", "Nadir", 81.0, [0.55, 0.05, 0.88, 0.35, 0.30, 0.22, 0.06]),
    ("Sunday Slow", "Mara Linde", 66.0, [0.44, 0.78, 0.30, 0.02, 0.61, 0.10, 0.03]),
    ("Static Bloom", "Velvet Antenna", 79.0, [0.70, 0.20, 0.66, 0.08, 0.45, 0.30, 0.07]),
    ("Copper Rain", "June & the Wire", 72.0, [0.58, 0.40, 0.52, 0.00, 0.48, 0.13, 0.05]),
    ("Night Bus 36", "Aurora Fields", 84.0, [0.77, 0.18, 0.70, 0.01, 0.66, 0.19, 0.08]),
    ("Half a Summer", "Okeanos", 69.0, [0.50, 0.62, 0.41, 0.00, 0.72, 0.09, 0.03]),
    ("Glasshouse", "Nadir", 76.0, [0.48, 0.10, 0.80, 0.28, 0.25, 0.26, 0.05]),
    ("Small Hours", "Mara Linde", 63.0, [0.39, 0.85, 0.25, 0.03, 0.55, 0.12, 0.04]),
    ("Wire and Thread", "June & the Wire", 70.0, [0.62, 0.35, 0.57, 0.00, 0.51, 0.14, 0.06]),
    ("Tidal", "Okeanos", 78.0, [0.67, 0.22, 0.68, 0.05, 0.58, 0.21, 0.05]),
];

const COUNTRIES: [(&str, &str); 4] = [
    ("us", "United States"),
    ("gb", "United Kingdom"),
    ("se", "Sweden"),
    ("mx", "Mexico"),
];

const HEADER: [&str; 16] = [
    "Unnamed: 0",
    "Country",
    "Country Name",
    "Weeknum",
    "Markets",
    "Artist Name",
    "Track Name",
    "ranking",
    "Popularity",
    "Danceability",
    "Energy",
    "Acousticness",
    "Instrumentalness",
    "Positiveness",
    "Liveness",
    "Speechiness",
];

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path("sample_charts.csv")?;
    writer.write_record(HEADER)?;

    let mut row_id: usize = 0;
    for (country, country_name) in COUNTRIES {
        for week in 1..=8 {
            // Ten consecutive tracks from a rotating offset: a distinct
            // plausible chart per country/week.
            let offset = rng.below(TRACKS.len());
            for rank in 1..=10usize {
                let (track, artist, base_pop, features) =
                    TRACKS[(offset + rank) % TRACKS.len()];

                let popularity =
                    (base_pop - rank as f64 + rng.gauss(0.0, 3.0)).clamp(0.0, 100.0);
                let jitter: Vec<f64> = features
                    .iter()
                    .map(|&f| (f + rng.gauss(0.0, 0.02)).clamp(0.0, 1.0))
                    .collect();

                // One market writes float weeks, the way a pandas export
                // sometimes does; the loader normalizes them back.
                let week_token = if country == "se" {
                    format!("{week}.0")
                } else {
                    week.to_string()
                };

                writer.write_record([
                    row_id.to_string(),
                    country.to_string(),
                    country_name.to_string(),
                    week_token,
                    format!("[{country}]"),
                    artist.to_string(),
                    track.to_string(),
                    rank.to_string(),
                    format!("{popularity:.0}"),
                    format!("{:.3}", jitter[0]),
                    format!("{:.3}", jitter[1]),
                    format!("{:.3}", jitter[2]),
                    format!("{:.3}", jitter[3]),
                    format!("{:.3}", jitter[4]),
                    format!("{:.3}", jitter[5]),
                    format!("{:.3}", jitter[6]),
                ])?;
                row_id += 1;
            }
        }
    }

    // A few rows the loader is expected to clean out.
    writer.write_record([
        row_id.to_string(),
        "us".to_string(),
        "United States".to_string(),
        String::new(),
        "[us]".to_string(),
        "Aurora Fields".to_string(),
        "Neon Nights".to_string(),
        "7".to_string(),
        "80".to_string(),
        "0.8".to_string(),
        "0.1".to_string(),
        "0.7".to_string(),
        "0.0".to_string(),
        "0.7".to_string(),
        "0.2".to_string(),
        "0.05".to_string(),
    ])?;
    writer.write_record([
        (row_id + 1).to_string(),
        "gb".to_string(),
        "United Kingdom".to_string(),
        "9".to_string(),
        "[gb]".to_string(),
        "Nadir".to_string(),
        "Gravity Well".to_string(),
        "n/a".to_string(),
        "75".to_string(),
        "0.5".to_string(),
        "0.1".to_string(),
        "0.9".to_string(),
        "0.3".to_string(),
        "0.3".to_string(),
        "0.2".to_string(),
        "0.06".to_string(),
    ])?;

    writer.flush()?;
    println!("Wrote sample_charts.csv ({} chart rows + 2 junk rows)", row_id);
    Ok(())
}
