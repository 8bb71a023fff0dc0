use clap::ValueEnum;
use serde::Serialize;

use super::record::CustomerRecord;

/// Categorical columns a dataset can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Gender,
    SeniorCitizen,
    Partner,
    Dependents,
    PhoneService,
    MultipleLines,
    InternetService,
    OnlineSecurity,
    OnlineBackup,
    DeviceProtection,
    TechSupport,
    StreamingTv,
    StreamingMovies,
    Contract,
    PaperlessBilling,
    PaymentMethod,
}

impl Column {
    /// The nine subscribed-service columns, in CSV order.
    pub const SERVICES: [Column; 9] = [
        Column::PhoneService,
        Column::MultipleLines,
        Column::InternetService,
        Column::OnlineSecurity,
        Column::OnlineBackup,
        Column::DeviceProtection,
        Column::TechSupport,
        Column::StreamingTv,
        Column::StreamingMovies,
    ];

    /// Header name as it appears in the CSV file.
    pub fn header(&self) -> &'static str {
        match self {
            Column::Gender => "gender",
            Column::SeniorCitizen => "SeniorCitizen",
            Column::Partner => "Partner",
            Column::Dependents => "Dependents",
            Column::PhoneService => "PhoneService",
            Column::MultipleLines => "MultipleLines",
            Column::InternetService => "InternetService",
            Column::OnlineSecurity => "OnlineSecurity",
            Column::OnlineBackup => "OnlineBackup",
            Column::DeviceProtection => "DeviceProtection",
            Column::TechSupport => "TechSupport",
            Column::StreamingTv => "StreamingTV",
            Column::StreamingMovies => "StreamingMovies",
            Column::Contract => "Contract",
            Column::PaperlessBilling => "PaperlessBilling",
            Column::PaymentMethod => "PaymentMethod",
        }
    }

    /// Reads this column's category from a record.
    pub fn value<'a>(&self, record: &'a CustomerRecord) -> &'a str {
        match self {
            Column::Gender => &record.gender,
            Column::SeniorCitizen => record.senior_citizen.as_str(),
            Column::Partner => &record.partner,
            Column::Dependents => &record.dependents,
            Column::PhoneService => &record.phone_service,
            Column::MultipleLines => &record.multiple_lines,
            Column::InternetService => &record.internet_service,
            Column::OnlineSecurity => &record.online_security,
            Column::OnlineBackup => &record.online_backup,
            Column::DeviceProtection => &record.device_protection,
            Column::TechSupport => &record.tech_support,
            Column::StreamingTv => &record.streaming_tv,
            Column::StreamingMovies => &record.streaming_movies,
            Column::Contract => &record.contract,
            Column::PaperlessBilling => &record.paperless_billing,
            Column::PaymentMethod => &record.payment_method,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_services_are_nine_distinct_columns() {
        let mut headers: Vec<_> = Column::SERVICES.iter().map(|c| c.header()).collect();
        headers.sort();
        headers.dedup();
        assert_eq!(headers.len(), 9);
    }

    #[test]
    fn test_cli_names() {
        let col = Column::from_str("payment-method", false).unwrap();
        assert_eq!(col, Column::PaymentMethod);
        let col = Column::from_str("streaming-tv", false).unwrap();
        assert_eq!(col, Column::StreamingTv);
    }
}
