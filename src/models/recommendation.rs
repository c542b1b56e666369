use serde::{Deserialize, Serialize};

/// A precomputed movie prediction returned to the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Recommendation {
    pub movie_id: i64,
    pub predicted_rating: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_field_names() {
        let rec = Recommendation {
            movie_id: 3,
            predicted_rating: 4.5,
        };

        assert_eq!(
            serde_json::to_string(&rec).unwrap(),
            r#"{"movie_id":3,"predicted_rating":4.5}"#
        );
    }

    #[test]
    fn test_empty_list_serializes_as_array() {
        let recs: Vec<Recommendation> = Vec::new();
        assert_eq!(serde_json::to_string(&recs).unwrap(), "[]");
    }
}
