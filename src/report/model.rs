use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ReportError, Result};

/// Transaction type of a finance entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryKind {
    Income,
    Expense,
    Deposit,
}

impl EntryKind {
    pub fn label(self) -> &'static str {
        match self {
            EntryKind::Income => "إيراد",
            EntryKind::Expense => "مصروف",
            EntryKind::Deposit => "إيداع",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            EntryKind::Income => "#4CAF50",
            EntryKind::Expense => "#F44336",
            EntryKind::Deposit => "#2196F3",
        }
    }
}

/// Result of a sales contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    Positive,
    Negative,
    Pending,
}

impl Outcome {
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Positive => "إيجابي",
            Outcome::Negative => "سلبي",
            Outcome::Pending => "في الانتظار",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Outcome::Positive => "#4CAF50",
            Outcome::Negative => "#F44336",
            Outcome::Pending => "#FFC107",
        }
    }
}

/// Progress of an operations task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Completed,
    InProgress,
    Pending,
}

impl TaskStatus {
    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Completed => "مكتمل",
            TaskStatus::InProgress => "قيد التنفيذ",
            TaskStatus::Pending => "في الانتظار",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            TaskStatus::Completed => "#4CAF50",
            TaskStatus::InProgress => "#FFC107",
            TaskStatus::Pending => "#9E9E9E",
        }
    }
}

/// Progress of a marketing task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CampaignStatus {
    Completed,
    InProgress,
    Planned,
}

impl CampaignStatus {
    pub fn label(self) -> &'static str {
        match self {
            CampaignStatus::Completed => "مكتمل",
            CampaignStatus::InProgress => "قيد التنفيذ",
            CampaignStatus::Planned => "مخطط",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            CampaignStatus::Completed => "#4CAF50",
            CampaignStatus::InProgress => "#FFC107",
            CampaignStatus::Planned => "#2196F3",
        }
    }
}

/// A scalar that may arrive as either a JSON number or a string,
/// rendered verbatim (e.g. the current liquidity figure).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FinanceEntry {
    pub title: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FinanceSection {
    #[serde(rename = "currentLiquidity")]
    pub current_liquidity: Option<Scalar>,
    pub entries: Vec<FinanceEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SalesEntry {
    #[serde(rename = "customerName")]
    pub customer_name: String,
    pub outcome: Outcome,
    #[serde(rename = "meetingTime")]
    pub meeting_time: String,
    #[serde(rename = "contactNumber")]
    pub contact_number: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SalesSection {
    #[serde(rename = "customersContacted")]
    pub customers_contacted: u64,
    pub entries: Vec<SalesEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OperationsEntry {
    pub task: String,
    pub status: TaskStatus,
    pub owner: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OperationsSection {
    pub entries: Vec<OperationsEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarketingTask {
    pub title: String,
    pub status: CampaignStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MarketingSection {
    pub tasks: Vec<MarketingTask>,
}

/// One synced trip record. Every field is optional in the payload;
/// `status` only distinguishes "approved" from everything else.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TripEntry {
    #[serde(rename = "bookingId")]
    pub booking_id: String,
    #[serde(rename = "clientName")]
    pub client_name: String,
    pub supplier: String,
    #[serde(rename = "driverName")]
    pub driver_name: String,
    #[serde(rename = "pickupPoint")]
    pub pickup_point: String,
    #[serde(rename = "dropoffPoint")]
    pub dropoff_point: String,
    pub status: String,
}

impl TripEntry {
    pub fn is_approved(&self) -> bool {
        self.status == "approved"
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_approved() {
            "جاهز"
        } else {
            "تنبيه"
        }
    }

    pub fn status_color(&self) -> &'static str {
        if self.is_approved() {
            "#16a34a"
        } else {
            "#f59e0b"
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TripsSection {
    #[serde(rename = "totalTrips")]
    pub total_trips: Option<u64>,
    #[serde(rename = "pendingSync")]
    pub pending_sync: Option<u64>,
    pub entries: Vec<TripEntry>,
}

/// Fully normalized report payload. Sections that were missing or not JSON
/// objects have already been replaced by their empty defaults; `date` stays
/// optional here and is only demanded during template substitution.
#[derive(Debug, Clone, Default)]
pub struct ReportDocument {
    pub date: Option<String>,
    pub gregorian_date_label: Option<String>,
    pub hijri_date_label: Option<String>,
    pub finance: FinanceSection,
    pub sales: SalesSection,
    pub operations: OperationsSection,
    pub marketing: MarketingSection,
    pub trips: Option<TripsSection>,
}

fn top_level_string(map: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_owned)
}

/// Deserializes a section when its value is a JSON object, defaults it when
/// the key is missing or holds any other JSON type. Malformed contents inside
/// an object (unknown enum value, wrong type, missing entry field) are fatal.
fn section<T>(map: &serde_json::Map<String, Value>, key: &'static str) -> Result<T>
where
    T: Default + for<'de> Deserialize<'de>,
{
    match map.get(key) {
        Some(value @ Value::Object(_)) => {
            serde_json::from_value(value.clone()).map_err(|source| ReportError::Section {
                section: key,
                source,
            })
        }
        _ => Ok(T::default()),
    }
}

/// Normalizes a raw payload into a [`ReportDocument`].
///
/// The top level must be a JSON object; each section degrades to its empty
/// default unless it is present as an object, in which case its contents must
/// be well-formed.
pub fn parse_report(payload: &Value) -> Result<ReportDocument> {
    let map = payload.as_object().ok_or(ReportError::InvalidPayload)?;

    let trips = match map.get("trips") {
        Some(value @ Value::Object(_)) => Some(
            serde_json::from_value(value.clone()).map_err(|source| ReportError::Section {
                section: "trips",
                source,
            })?,
        ),
        _ => None,
    };

    Ok(ReportDocument {
        date: top_level_string(map, "date"),
        gregorian_date_label: top_level_string(map, "gregorianDateLabel"),
        hijri_date_label: top_level_string(map, "hijriDateLabel"),
        finance: section(map, "finance")?,
        sales: section(map, "sales")?,
        operations: section(map, "operations")?,
        marketing: section(map, "marketing")?,
        trips,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_sections_default_to_empty() {
        let doc = parse_report(&json!({ "date": "2026-08-06" })).unwrap();
        assert!(doc.finance.entries.is_empty());
        assert!(doc.sales.entries.is_empty());
        assert!(doc.operations.entries.is_empty());
        assert!(doc.marketing.tasks.is_empty());
        assert!(doc.trips.is_none());
    }

    #[test]
    fn non_object_section_degrades_to_empty() {
        let doc = parse_report(&json!({
            "date": "2026-08-06",
            "finance": "not a section",
            "sales": 42,
            "trips": [1, 2, 3]
        }))
        .unwrap();
        assert!(doc.finance.entries.is_empty());
        assert_eq!(doc.sales.customers_contacted, 0);
        assert!(doc.trips.is_none());
    }

    #[test]
    fn unknown_finance_type_is_fatal() {
        let err = parse_report(&json!({
            "date": "2026-08-06",
            "finance": { "entries": [{ "title": "x", "amount": 1.0, "type": "loan" }] }
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            ReportError::Section {
                section: "finance",
                ..
            }
        ));
    }

    #[test]
    fn missing_entry_field_is_fatal() {
        let err = parse_report(&json!({
            "date": "2026-08-06",
            "operations": { "entries": [{ "task": "x", "status": "pending" }] }
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            ReportError::Section {
                section: "operations",
                ..
            }
        ));
    }

    #[test]
    fn top_level_must_be_an_object() {
        let err = parse_report(&json!(["not", "a", "report"])).unwrap_err();
        assert!(matches!(err, ReportError::InvalidPayload));
    }

    #[test]
    fn liquidity_accepts_numbers_and_strings() {
        let doc = parse_report(&json!({
            "date": "2026-08-06",
            "finance": { "currentLiquidity": 5000 }
        }))
        .unwrap();
        assert_eq!(doc.finance.current_liquidity.unwrap().to_string(), "5000");

        let doc = parse_report(&json!({
            "date": "2026-08-06",
            "finance": { "currentLiquidity": "5,000 ر.س" }
        }))
        .unwrap();
        assert_eq!(
            doc.finance.current_liquidity.unwrap().to_string(),
            "5,000 ر.س"
        );
    }
}
