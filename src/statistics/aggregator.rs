use std::collections::BTreeMap;

use super::buckets::{AgeBracket, Continent, GenderBucket};
use super::shares::percentage;
use super::types::{BucketShare, MovieStatistics, PopulationBreakdown};
use crate::domain::{MovieId, RatingWithDemographics};

#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    sum: i64,
    count: usize,
}

impl Tally {
    fn add(&mut self, score: i32) {
        self.sum += i64::from(score);
        self.count += 1;
    }

    fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum as f64 / self.count as f64
        }
    }
}

struct DimensionTallies {
    age: BTreeMap<AgeBracket, Tally>,
    gender: BTreeMap<GenderBucket, Tally>,
    continent: BTreeMap<Continent, Tally>,
    country: BTreeMap<String, Tally>,
}

impl DimensionTallies {
    fn with_fixed_buckets() -> Self {
        Self {
            age: empty_buckets(&AgeBracket::ALL),
            gender: empty_buckets(&GenderBucket::ALL),
            continent: empty_buckets(&Continent::ALL),
            country: BTreeMap::new(),
        }
    }
}

fn empty_buckets<K: Ord + Copy>(keys: &[K]) -> BTreeMap<K, Tally> {
    keys.iter().map(|&key| (key, Tally::default())).collect()
}

/// Average score of the ratings in each demographic bucket.
///
/// `overall_average` and `overall_count` come from the separate aggregate
/// query and are copied into the result as-is.
pub fn compute_statistics(
    movie_id: MovieId,
    ratings: &[RatingWithDemographics],
    overall_average: f64,
    overall_count: i64,
) -> MovieStatistics {
    let tallies = tally(ratings);

    MovieStatistics {
        movie_id,
        average_rating: overall_average,
        total_ratings: overall_count,
        age_buckets: averages(&tallies.age),
        gender_buckets: averages(&tallies.gender),
        continent_buckets: averages(&tallies.continent),
        country_buckets: averages(&tallies.country),
    }
}

/// Number of ratings in each demographic bucket and its share of `ratings`
pub fn compute_population(
    movie_id: MovieId,
    ratings: &[RatingWithDemographics],
) -> PopulationBreakdown {
    let tallies = tally(ratings);
    let total = ratings.len();

    PopulationBreakdown {
        movie_id,
        total_ratings: total,
        age: shares(&tallies.age, total),
        gender: shares(&tallies.gender, total),
        continent: shares(&tallies.continent, total),
        country: shares(&tallies.country, total),
    }
}

fn tally(ratings: &[RatingWithDemographics]) -> DimensionTallies {
    let mut tallies = DimensionTallies::with_fixed_buckets();

    for rating in ratings {
        let score = rating.score();
        let demographics = &rating.demographics;

        if let Some(age) = demographics.age {
            tallies
                .age
                .entry(AgeBracket::from_age(age))
                .or_default()
                .add(score);
        }

        tallies
            .gender
            .entry(GenderBucket::from_gender(demographics.gender.as_deref()))
            .or_default()
            .add(score);

        if let Some(raw) = demographics.continent() {
            for continent in Continent::matching(raw) {
                tallies.continent.entry(continent).or_default().add(score);
            }
        }

        if let Some(country) = demographics.country() {
            tallies
                .country
                .entry(country.to_string())
                .or_default()
                .add(score);
        }
    }

    tallies
}

fn averages<K: Ord + Clone>(buckets: &BTreeMap<K, Tally>) -> BTreeMap<K, f64> {
    buckets
        .iter()
        .map(|(key, tally)| (key.clone(), tally.average()))
        .collect()
}

fn shares<K: Ord + Clone>(buckets: &BTreeMap<K, Tally>, total: usize) -> BTreeMap<K, BucketShare> {
    buckets
        .iter()
        .map(|(key, tally)| {
            let share = BucketShare {
                count: tally.count,
                percentage: percentage(tally.count, total),
            };
            (key.clone(), share)
        })
        .collect()
}
