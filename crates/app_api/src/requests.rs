use serde::Deserialize;

/// Raw query parameters of a track-email call, before validation.
#[derive(Debug, Default, Deserialize)]
pub struct TrackEmailQuery {
    pub customer_number: Option<String>,
    pub tenant: Option<String>,
}

impl TrackEmailQuery {
    /// Builds the query from decoded key/value pairs. When a key repeats,
    /// its first value is used.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "customer_number" => &mut query.customer_number,
                "tenant" => &mut query.tenant,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }
}
