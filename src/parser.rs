//! Section-aware parser for plain-text TUPA documents.
//!
//! Documents have no formal grammar. A line that starts with a known label
//! (`Requisitos:`, `Plazo:`, ...) opens a section, and the lines that follow
//! belong to it until the next label. How those lines are folded into the
//! record depends on the section: list sections split on enumeration markers
//! and glue wrapped lines onto the previous entry, unit sections concatenate,
//! payment and contact sections recognize their own sub-labels.
//!
//! The parser is line-driven so callers reading from a file can inspect the
//! partially built record when reading fails halfway through.

use std::sync::LazyLock;

use regex::Regex;

use crate::record::ProcedureRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Title,
    Code,
    Description,
    Requirements,
    ServiceChannels,
    Payment,
    PaymentModality,
    Deadline,
    OfficeLocations,
    SubmissionUnit,
    ApprovalUnit,
    Contact,
}

/// Top-level section labels, matched in order against the trimmed line.
pub const SECTION_HEADERS: &[(&str, Section)] = &[
    ("Titulo:", Section::Title),
    ("Título:", Section::Title),
    ("Código:", Section::Code),
    ("Codigo:", Section::Code),
    ("Requisitos:", Section::Requirements),
    ("Canales de atención:", Section::ServiceChannels),
    ("Pago por derecho de tramitación:", Section::Payment),
    ("Modalidad de pago:", Section::PaymentModality),
    ("Plazo:", Section::Deadline),
    ("Sedes y horarios de atención:", Section::OfficeLocations),
    (
        "Unidad de organización donde se presenta la documentación:",
        Section::SubmissionUnit,
    ),
    (
        "Unidad de organización responsable de aprobar la solicitud:",
        Section::ApprovalUnit,
    ),
    ("Consulta sobre el servicio:", Section::Contact),
];

/// Labels that open a free-form description spanning many lines.
pub const DESCRIPTION_HEADERS: &[&str] =
    &["Descripción del procedimiento:", "Descripción del Servicio:"];

const AMOUNT_LABELS: &[&str] = &["Monto -", "Efectivo:"];
const PHONE_LABEL: &str = "Teléfono:";
const EXTENSION_LABEL: &str = "Anexo:";
const EMAIL_LABEL: &str = "Correo:";

static ENUMERATION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\d+\.-|-+)\s*.").expect("valid pattern"));

static PHONE_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:tel(?:éfono|efono)?|cel(?:ular)?|anexo)\b")
        .expect("valid pattern")
});

static LONG_DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{6,}").expect("valid pattern"));

/// Returns the section opened by `line` and the text after the label.
fn match_section_header(line: &str) -> Option<(Section, &str)> {
    SECTION_HEADERS.iter().find_map(|(label, section)| {
        line.strip_prefix(label).map(|rest| (*section, rest.trim()))
    })
}

fn match_description_header(line: &str) -> Option<&str> {
    DESCRIPTION_HEADERS
        .iter()
        .find_map(|label| line.strip_prefix(label).map(str::trim))
}

/// True if the trimmed line starts with any recognized top-level label.
pub fn is_header(line: &str) -> bool {
    match_description_header(line).is_some()
        || match_section_header(line).is_some()
}

/// Incremental document parser. Feed it lines in order, then call
/// [`DocumentParser::finish`].
#[derive(Debug, Default)]
pub struct DocumentParser {
    record: ProcedureRecord,
    section: Option<Section>,
    awaiting_code: bool,
    started: bool,
}

impl DocumentParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// The record as parsed so far.
    pub fn record(&self) -> &ProcedureRecord {
        &self.record
    }

    pub fn finish(self) -> ProcedureRecord {
        self.record
    }

    pub fn feed_line(&mut self, raw: &str) {
        let raw = if self.started {
            raw
        } else {
            self.started = true;
            raw.trim_start_matches('\u{feff}')
        };
        let line = raw.trim();

        // A code label with nothing after it takes its value from the next
        // line, unless that line opens another section.
        if self.awaiting_code {
            self.awaiting_code = false;
            if !line.is_empty() && !is_header(line) {
                self.record.code = line.to_string();
                return;
            }
        }

        if line.is_empty() {
            return;
        }

        if let Some(rest) = match_description_header(line) {
            self.section = Some(Section::Description);
            self.record.description = rest.to_string();
            return;
        }

        if let Some((section, rest)) = match_section_header(line) {
            self.section = Some(section);
            match section {
                Section::Title => self.record.title = rest.to_string(),
                Section::Code => {
                    self.record.code = rest.to_string();
                    self.awaiting_code = rest.is_empty();
                }
                Section::Deadline => self.record.deadline = rest.to_string(),
                _ => {}
            }
            return;
        }

        let Some(section) = self.section else {
            return;
        };

        let record = &mut self.record;
        match section {
            Section::Title | Section::Code | Section::Deadline => {}
            Section::Description => append_spaced(&mut record.description, line),
            Section::Requirements => push_entry(&mut record.requirements, line),
            Section::ServiceChannels => {
                push_entry(&mut record.service_channels, line)
            }
            Section::OfficeLocations => {
                push_entry(&mut record.office_locations, line)
            }
            Section::Payment => {
                if let Some(amount) = AMOUNT_LABELS
                    .iter()
                    .find_map(|label| line.strip_prefix(label))
                {
                    let amount = amount.trim();
                    if !amount.is_empty() {
                        record.payment.amount = amount.to_string();
                    }
                } else {
                    record.payment.modalities.insert(line);
                }
            }
            Section::PaymentModality => {
                record.payment.modalities.insert(line);
            }
            Section::SubmissionUnit => {
                append_spaced(&mut record.submission_unit, line)
            }
            Section::ApprovalUnit => {
                append_spaced(&mut record.approval_unit, line)
            }
            Section::Contact => apply_contact_line(record, line),
        }
    }
}

fn append_spaced(target: &mut String, line: &str) {
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(line);
}

/// Start a new entry on an enumeration marker, otherwise treat the line as a
/// wrapped continuation of the previous entry.
fn push_entry(list: &mut Vec<String>, line: &str) {
    match list.last_mut() {
        Some(last) if !ENUMERATION_MARKER.is_match(line) => {
            last.push(' ');
            last.push_str(line);
        }
        _ => list.push(line.to_string()),
    }
}

fn apply_contact_line(record: &mut ProcedureRecord, line: &str) {
    let contact = &mut record.contact;
    if let Some(phone) = line.strip_prefix(PHONE_LABEL) {
        contact.phone = phone.trim().to_string();
    } else if let Some(extension) = line.strip_prefix(EXTENSION_LABEL) {
        contact.extension = extension.trim().to_string();
    } else if let Some(email) = line.strip_prefix(EMAIL_LABEL) {
        contact.email = email.trim().to_string();
    } else {
        let lowered = line.to_lowercase();
        if PHONE_WORD.is_match(&lowered) || LONG_DIGIT_RUN.is_match(line) {
            contact.phone = line.to_string();
        } else if line.contains('@') {
            contact.email = line.to_string();
        } else if lowered.contains("anexo") {
            contact.extension = line.to_string();
        }
    }
}

/// Parse one document given its lines.
pub fn parse_document<I, S>(lines: I) -> ProcedureRecord
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parser = DocumentParser::new();
    for line in lines {
        parser.feed_line(line.as_ref());
    }
    parser.finish()
}

pub fn parse_str(text: &str) -> ProcedureRecord {
    parse_document(text.lines())
}
