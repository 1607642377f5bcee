use super::domain::{PropertyType, SimulationResults};
use serde::{Deserialize, Serialize};

/// Lower bound of the suggested price range, as a share of the estimated credit.
pub const MIN_PRICE_SHARE: f64 = 0.5;

/// Price filter handed to the listings search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub min_price: i64,
    pub max_price: i64,
    pub property_type: PropertyType,
}

impl SearchQuery {
    /// Flat key/value pairs in the order the search page expects them.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("minPrice", self.min_price.to_string()),
            ("maxPrice", self.max_price.to_string()),
            ("propertyType", self.property_type.as_str().to_string()),
        ]
    }

    pub fn to_query_string(&self) -> String {
        self.to_query_pairs()
            .into_iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Map results to a price range; `property_type` defaults to houses.
pub fn to_search_query(
    results: &SimulationResults,
    property_type: Option<PropertyType>,
) -> SearchQuery {
    SearchQuery {
        min_price: round_price(results.estimated_credit * MIN_PRICE_SHARE),
        max_price: round_price(results.estimated_credit),
        property_type: property_type.unwrap_or_default(),
    }
}

fn round_price(value: f64) -> i64 {
    if value.is_finite() {
        value.round() as i64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results_with_credit(estimated_credit: f64) -> SimulationResults {
        SimulationResults {
            base_savings: 45_000.0,
            compounded_savings: 57_432.67,
            credit_factor: 30,
            estimated_credit,
            total_available_amount: estimated_credit + 57_432.67,
            estimated_monthly_payment: 4_896.5,
        }
    }

    #[test]
    fn price_range_spans_half_to_full_credit() {
        let query = to_search_query(&results_with_credit(507_432.67), None);
        assert_eq!(query.max_price, 507_433);
        assert_eq!(query.min_price, 253_716);
        assert_eq!(query.property_type, PropertyType::House);
    }

    #[test]
    fn caller_can_override_property_type() {
        let query = to_search_query(&results_with_credit(100_000.0), Some(PropertyType::Apartment));
        assert_eq!(query.property_type, PropertyType::Apartment);
        assert_eq!(query.min_price, 50_000);
    }

    #[test]
    fn query_string_carries_only_the_three_keys() {
        let query = to_search_query(&results_with_credit(1_000.0), None);
        assert_eq!(
            query.to_query_string(),
            "minPrice=500&maxPrice=1000&propertyType=house"
        );
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let query = to_search_query(&results_with_credit(2_000.0), Some(PropertyType::Land));
        let json = serde_json::to_value(query).expect("serializes");
        assert_eq!(
            json,
            serde_json::json!({"minPrice": 1000, "maxPrice": 2000, "propertyType": "land"})
        );
    }
}
