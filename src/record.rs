use serde::Serialize;

/// One administrative procedure parsed from a TUPA document.
///
/// Every field defaults to an empty value, so formatting code never has to
/// deal with missing data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcedureRecord {
    pub title: String,
    pub code: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub service_channels: Vec<String>,
    pub payment: Payment,
    pub deadline: String,
    pub office_locations: Vec<String>,
    pub submission_unit: String,
    pub approval_unit: String,
    pub contact: Contact,
}

impl ProcedureRecord {
    /// Lowercased, trimmed title used for lookups and tie-breaking.
    pub fn normalized_title(&self) -> String {
        crate::normalize::normalize_key(&self.title)
    }

    pub fn normalized_code(&self) -> String {
        crate::normalize::normalize_key(&self.code)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Payment {
    pub amount: String,
    pub modalities: ModalitySet,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Contact {
    pub phone: String,
    pub extension: String,
    pub email: String,
}

/// Insertion-ordered set of payment modalities.
///
/// Two entries are duplicates when they are equal ignoring case and
/// whitespace runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ModalitySet(Vec<String>);

impl ModalitySet {
    /// Insert a modality. Returns `false` if it was empty or already present.
    pub fn insert(&mut self, modality: &str) -> bool {
        let modality = modality.trim();
        if modality.is_empty() {
            return false;
        }

        let key = dedup_key(modality);
        if self.0.iter().any(|existing| dedup_key(existing) == key) {
            return false;
        }

        self.0.push(modality.to_string());
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

fn dedup_key(s: &str) -> String {
    s.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_is_empty() {
        let record = ProcedureRecord::default();
        assert!(record.title.is_empty());
        assert!(record.requirements.is_empty());
        assert!(record.payment.modalities.is_empty());
        assert!(record.contact.email.is_empty());
    }

    #[test]
    fn modalities_keep_insertion_order() {
        let mut set = ModalitySet::default();
        assert!(set.insert("Caja de la municipalidad"));
        assert!(set.insert("Agente bancario"));
        assert_eq!(set.as_slice(), ["Caja de la municipalidad", "Agente bancario"]);
    }

    #[test]
    fn modalities_dedup_ignores_case_and_spacing() {
        let mut set = ModalitySet::default();
        assert!(set.insert("Caja de la Municipalidad"));
        assert!(!set.insert("  caja   de la municipalidad "));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn modalities_reject_blank() {
        let mut set = ModalitySet::default();
        assert!(!set.insert("   "));
        assert!(set.is_empty());
    }

    #[test]
    fn normalized_title_lowercases_and_trims() {
        let record = ProcedureRecord {
            title: "  LICENCIA DE FUNCIONAMIENTO ".to_string(),
            ..Default::default()
        };
        assert_eq!(record.normalized_title(), "licencia de funcionamiento");
    }
}
