//! Output record for KTP field extraction.

use serde::{Deserialize, Serialize};

/// Sentinel value used when a field could not be extracted.
///
/// Downstream consumers (CLI printout, JSON responses) expect a concrete
/// string for every field, so absence is expressed as this literal rather
/// than as a null.
pub const NOT_FOUND: &str = "Not found";

/// The three structured fields extracted from one KTP image.
///
/// Serialized field names match the output contract of the API consumers:
/// `NIK`, `Nama`, `Tanggal Lahir`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KtpRecord {
    /// 16-digit national identity number.
    #[serde(rename = "NIK")]
    pub nik: String,

    /// Full name as printed on the card.
    #[serde(rename = "Nama")]
    pub nama: String,

    /// Date of birth, normalized to DD-MM-YYYY.
    #[serde(rename = "Tanggal Lahir")]
    pub tanggal_lahir: String,
}

impl KtpRecord {
    /// A record with every field set to the sentinel.
    pub fn empty() -> Self {
        Self {
            nik: NOT_FOUND.to_string(),
            nama: NOT_FOUND.to_string(),
            tanggal_lahir: NOT_FOUND.to_string(),
        }
    }

    /// True if no field was extracted.
    pub fn is_empty(&self) -> bool {
        self.nik == NOT_FOUND && self.nama == NOT_FOUND && self.tanggal_lahir == NOT_FOUND
    }
}

impl Default for KtpRecord {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_field_names() {
        let record = KtpRecord {
            nik: "1234567890123456".to_string(),
            nama: "JOHN DOE".to_string(),
            tanggal_lahir: "17-08-1990".to_string(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["NIK"], "1234567890123456");
        assert_eq!(json["Nama"], "JOHN DOE");
        assert_eq!(json["Tanggal Lahir"], "17-08-1990");
    }

    #[test]
    fn test_empty_record_uses_sentinel() {
        let record = KtpRecord::empty();
        assert!(record.is_empty());
        assert_eq!(record.nik, NOT_FOUND);
    }
}
