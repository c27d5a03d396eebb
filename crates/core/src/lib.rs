use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Client organizations an event can belong to. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tenant {
    Aadvanto,
    Movido,
}

impl Tenant {
    pub const ALL: [Tenant; 2] = [Tenant::Aadvanto, Tenant::Movido];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tenant::Aadvanto => "aadvanto",
            Tenant::Movido => "movido",
        }
    }
}

impl fmt::Display for Tenant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTenant(pub String);

impl fmt::Display for UnknownTenant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown tenant {:?}", self.0)
    }
}

impl std::error::Error for UnknownTenant {}

impl FromStr for Tenant {
    type Err = UnknownTenant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Tenant::ALL
            .into_iter()
            .find(|tenant| tenant.as_str() == value)
            .ok_or_else(|| UnknownTenant(value.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorKind {
    StringType,
    Enum,
}

/// One rejected request field, shaped like a pydantic error entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub loc: Vec<String>,
    #[serde(rename = "type")]
    pub kind: FieldErrorKind,
    #[serde(rename = "msg")]
    pub message: String,
    pub input: Option<String>,
}

impl FieldError {
    pub fn field(&self) -> Option<&str> {
        self.loc.first().map(String::as_str)
    }

    fn not_a_string(field: &str) -> Self {
        Self {
            loc: vec![field.to_string()],
            kind: FieldErrorKind::StringType,
            message: "Input should be a valid string".to_string(),
            input: None,
        }
    }

    fn not_a_tenant(field: &str, input: Option<&str>) -> Self {
        let allowed = Tenant::ALL
            .iter()
            .map(|tenant| format!("'{}'", tenant.as_str()))
            .collect::<Vec<_>>()
            .join(" or ");
        Self {
            loc: vec![field.to_string()],
            kind: FieldErrorKind::Enum,
            message: format!("Input should be {allowed}"),
            input: input.map(str::to_string),
        }
    }
}

/// A track-email request whose fields have passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackEmailRequest {
    customer_number: String,
    tenant: Tenant,
}

impl TrackEmailRequest {
    /// Checks both raw fields and reports every failing one.
    ///
    /// `customer_number` only has to be present. `tenant` has to be present
    /// and match one of [`Tenant::ALL`] exactly.
    pub fn validate(
        customer_number: Option<&str>,
        tenant: Option<&str>,
    ) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();

        if customer_number.is_none() {
            errors.push(FieldError::not_a_string("customer_number"));
        }
        let parsed = tenant.and_then(|value| value.parse::<Tenant>().ok());
        if parsed.is_none() {
            errors.push(FieldError::not_a_tenant("tenant", tenant));
        }

        match (customer_number, parsed) {
            (Some(customer_number), Some(tenant)) if errors.is_empty() => Ok(Self {
                customer_number: customer_number.to_string(),
                tenant,
            }),
            _ => Err(errors),
        }
    }

    pub fn customer_number(&self) -> &str {
        &self.customer_number
    }

    pub fn tenant(&self) -> Tenant {
        self.tenant
    }
}

/// Store-assigned identity of a tracking record. Never leaves the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId(pub i64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingRecord {
    pub id: RecordId,
    pub customer_number: String,
    pub tenant: Tenant,
    pub timestamp: String,
    pub count: u64,
}

/// A record that has not been written yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTrackingRecord {
    pub customer_number: String,
    pub tenant: Tenant,
    pub timestamp: String,
    pub count: u64,
}

impl NewTrackingRecord {
    pub fn first_event(request: &TrackEmailRequest, timestamp: String) -> Self {
        Self {
            customer_number: request.customer_number().to_string(),
            tenant: request.tenant(),
            timestamp,
            count: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
}
