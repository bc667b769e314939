use serde::{Deserialize, Serialize};

/// Fixed age ranges; lower bound inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeBracket {
    #[serde(rename = "under18")]
    Under18,
    #[serde(rename = "18-24")]
    From18To24,
    #[serde(rename = "25-34")]
    From25To34,
    #[serde(rename = "35-44")]
    From35To44,
    #[serde(rename = "45-54")]
    From45To54,
    #[serde(rename = "55+")]
    From55,
}

impl AgeBracket {
    pub const ALL: [AgeBracket; 6] = [
        AgeBracket::Under18,
        AgeBracket::From18To24,
        AgeBracket::From25To34,
        AgeBracket::From35To44,
        AgeBracket::From45To54,
        AgeBracket::From55,
    ];

    /// Ages are not range-checked: anything below 18 is `Under18`,
    /// anything from 55 up is `From55`.
    pub fn from_age(age: i32) -> Self {
        if age < 18 {
            AgeBracket::Under18
        } else if age < 25 {
            AgeBracket::From18To24
        } else if age < 35 {
            AgeBracket::From25To34
        } else if age < 45 {
            AgeBracket::From35To44
        } else if age < 55 {
            AgeBracket::From45To54
        } else {
            AgeBracket::From55
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GenderBucket {
    Male,
    Female,
    Other,
    NotSpecified,
}

impl GenderBucket {
    pub const ALL: [GenderBucket; 4] = [
        GenderBucket::Male,
        GenderBucket::Female,
        GenderBucket::Other,
        GenderBucket::NotSpecified,
    ];

    /// Exact lowercase match; everything else, absent included, is `NotSpecified`
    pub fn from_gender(gender: Option<&str>) -> Self {
        match gender {
            Some("male") => GenderBucket::Male,
            Some("female") => GenderBucket::Female,
            Some("other") => GenderBucket::Other,
            _ => GenderBucket::NotSpecified,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Continent {
    Africa,
    Asia,
    Europe,
    #[serde(rename = "North America")]
    NorthAmerica,
    #[serde(rename = "South America")]
    SouthAmerica,
    Australia,
    Antarctica,
}

impl Continent {
    pub const ALL: [Continent; 7] = [
        Continent::Africa,
        Continent::Asia,
        Continent::Europe,
        Continent::NorthAmerica,
        Continent::SouthAmerica,
        Continent::Australia,
        Continent::Antarctica,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Continent::Africa => "Africa",
            Continent::Asia => "Asia",
            Continent::Europe => "Europe",
            Continent::NorthAmerica => "North America",
            Continent::SouthAmerica => "South America",
            Continent::Australia => "Australia",
            Continent::Antarctica => "Antarctica",
        }
    }

    /// Every continent whose name occurs, ignoring case, inside `raw`.
    /// Strings naming no known continent yield nothing.
    pub fn matching(raw: &str) -> impl Iterator<Item = Continent> {
        let lowered = raw.to_lowercase();
        Continent::ALL
            .into_iter()
            .filter(move |continent| lowered.contains(&continent.name().to_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_bracket_lower_bounds_are_inclusive() {
        assert_eq!(AgeBracket::from_age(17), AgeBracket::Under18);
        assert_eq!(AgeBracket::from_age(18), AgeBracket::From18To24);
        assert_eq!(AgeBracket::from_age(24), AgeBracket::From18To24);
        assert_eq!(AgeBracket::from_age(25), AgeBracket::From25To34);
        assert_eq!(AgeBracket::from_age(45), AgeBracket::From45To54);
        assert_eq!(AgeBracket::from_age(54), AgeBracket::From45To54);
        assert_eq!(AgeBracket::from_age(55), AgeBracket::From55);
    }

    #[test]
    fn test_out_of_range_ages_are_not_rejected() {
        assert_eq!(AgeBracket::from_age(-4), AgeBracket::Under18);
        assert_eq!(AgeBracket::from_age(300), AgeBracket::From55);
    }

    #[test]
    fn test_unknown_gender_is_not_specified() {
        assert_eq!(GenderBucket::from_gender(None), GenderBucket::NotSpecified);
        assert_eq!(
            GenderBucket::from_gender(Some("nonbinary")),
            GenderBucket::NotSpecified
        );
        assert_eq!(
            GenderBucket::from_gender(Some("Male")),
            GenderBucket::NotSpecified
        );
        assert_eq!(GenderBucket::from_gender(Some("other")), GenderBucket::Other);
    }

    #[test]
    fn test_continent_matching_ignores_case() {
        let matched: Vec<_> = Continent::matching("ANTARCTICA").collect();
        assert_eq!(matched, vec![Continent::Antarctica]);

        let matched: Vec<_> = Continent::matching("south america").collect();
        assert_eq!(matched, vec![Continent::SouthAmerica]);
    }

    #[test]
    fn test_unknown_continent_matches_nothing() {
        assert_eq!(Continent::matching("Mars").count(), 0);
        assert_eq!(Continent::matching("America").count(), 0);
    }

    #[test]
    fn test_bucket_labels_serialize_as_map_keys() {
        let json = serde_json::to_string(&AgeBracket::From55).unwrap();
        assert_eq!(json, "\"55+\"");

        let json = serde_json::to_string(&GenderBucket::NotSpecified).unwrap();
        assert_eq!(json, "\"notSpecified\"");

        let json = serde_json::to_string(&Continent::NorthAmerica).unwrap();
        assert_eq!(json, "\"North America\"");
    }
}
