use std::collections::BTreeMap;

use super::types::{MovieStatistics, ScoreShareBreakdown};

/// Each bucket's average score as a percentage of the sum of all bucket
/// averages. This is a share of summed scores, not of raters; see
/// `compute_population` for rater shares.
pub fn score_shares<K: Ord + Clone>(buckets: &BTreeMap<K, f64>) -> BTreeMap<K, f64> {
    let total: f64 = buckets.values().sum();

    buckets
        .iter()
        .map(|(key, &average)| {
            let share = if total > 0.0 {
                average * 100.0 / total
            } else {
                0.0
            };
            (key.clone(), share)
        })
        .collect()
}

/// `score_shares` applied to every dimension of `stats`
pub fn score_share_breakdown(stats: &MovieStatistics) -> ScoreShareBreakdown {
    ScoreShareBreakdown {
        movie_id: stats.movie_id,
        age: score_shares(&stats.age_buckets),
        gender: score_shares(&stats.gender_buckets),
        continent: score_shares(&stats.continent_buckets),
        country: score_shares(&stats.country_buckets),
    }
}

pub(crate) fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistics::{AgeBracket, Continent, GenderBucket};

    #[test]
    fn test_score_shares_normalize_averages() {
        let buckets: BTreeMap<GenderBucket, f64> = [
            (GenderBucket::Male, 8.0),
            (GenderBucket::Female, 2.0),
            (GenderBucket::Other, 0.0),
            (GenderBucket::NotSpecified, 0.0),
        ]
        .into_iter()
        .collect();

        let shares = score_shares(&buckets);

        assert_eq!(shares[&GenderBucket::Male], 80.0);
        assert_eq!(shares[&GenderBucket::Female], 20.0);
        assert_eq!(shares[&GenderBucket::Other], 0.0);
    }

    // Equal averages get equal shares however many raters sit behind them.
    #[test]
    fn test_score_shares_ignore_rater_counts() {
        let buckets: BTreeMap<String, f64> =
            [("Peru".to_string(), 5.0), ("Chile".to_string(), 5.0)]
                .into_iter()
                .collect();

        let shares = score_shares(&buckets);

        assert_eq!(shares["Peru"], 50.0);
        assert_eq!(shares["Chile"], 50.0);
    }

    #[test]
    fn test_score_shares_of_all_zero_buckets() {
        let buckets: BTreeMap<String, f64> = [("Peru".to_string(), 0.0)].into_iter().collect();

        assert_eq!(score_shares(&buckets)["Peru"], 0.0);
        assert!(score_shares::<String>(&BTreeMap::new()).is_empty());
    }

    #[test]
    fn test_breakdown_covers_every_dimension() {
        let stats = MovieStatistics {
            movie_id: 7,
            average_rating: 6.0,
            total_ratings: 3,
            age_buckets: [(AgeBracket::From18To24, 9.0), (AgeBracket::From55, 3.0)]
                .into_iter()
                .collect(),
            gender_buckets: [(GenderBucket::Male, 6.0), (GenderBucket::Female, 0.0)]
                .into_iter()
                .collect(),
            continent_buckets: [(Continent::Europe, 4.0), (Continent::Asia, 4.0)]
                .into_iter()
                .collect(),
            country_buckets: BTreeMap::new(),
        };

        let breakdown = score_share_breakdown(&stats);

        assert_eq!(breakdown.movie_id, 7);
        assert_eq!(breakdown.age[&AgeBracket::From18To24], 75.0);
        assert_eq!(breakdown.age[&AgeBracket::From55], 25.0);
        assert_eq!(breakdown.gender[&GenderBucket::Male], 100.0);
        assert_eq!(breakdown.gender[&GenderBucket::Female], 0.0);
        assert_eq!(breakdown.continent[&Continent::Europe], 50.0);
        assert!(breakdown.country.is_empty());
    }

    #[test]
    fn test_percentage_of_empty_total() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(1, 4), 25.0);
    }
}
