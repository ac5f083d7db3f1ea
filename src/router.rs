//! Per-request intent routing.
//!
//! A message is answered by the first of these that applies:
//!
//! 1. its text is exactly a procedure title: that procedure is returned;
//! 2. a topic handler recognizes it (driver's license, building permits,
//!    birth registration, marital separation), in that priority order;
//! 3. the generic path: reject as out of domain, answer with the strongest
//!    match, offer suggestions, or ask the user to refine the query.

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    catalog::ProcedureCatalog,
    format::format_procedure,
    normalize::normalize_key,
    record::ProcedureRecord,
    rules::{
        BUILDING_KEYWORDS,
        BUILDING_PHRASES,
        Keywords,
        LICENSE_PHRASES,
        SEPARATION_PHRASES,
        SEPARATION_TRIGGERS,
        phrase_occurs,
    },
    scorer::{Query, ScoredMatch, score_all},
};

/// Below this top score a query is not about municipal procedures at all.
pub const OUT_OF_DOMAIN_THRESHOLD: i64 = 3;
/// Top score needed to answer directly on the generic path.
pub const STRONG_MATCH_THRESHOLD: i64 = 50;
/// Minimum score for a procedure to be offered as a suggestion.
pub const SUGGESTION_FLOOR: i64 = 5;
pub const MAX_SUGGESTIONS: usize = 5;

const BUILDING_DIRECT_FLOOR: i64 = 100;
const BUILDING_SUGGESTION_FLOOR: i64 = 10;
const SEPARATION_DIRECT_FLOOR: i64 = 10;

const LICENSE_TRIGGERS: &[&str] = &[
    "licencia de conducir",
    "brevete",
    "sacar brevete",
    "obtener licencia",
    "pase de conducir",
];

const BIRTH_TRIGGERS: &[&str] = &[
    "nacimiento",
    "recien nacido",
    "inscribir hijo",
    "registrar hijo",
    "partida de nacimiento",
    "bebe",
    "hijo",
    "inscripcion de partidas",
    "inscripcion de partida de nacimiento ordinaria",
    "inscripcion de partidas por mandato judicial",
];
const JUDICIAL_REGISTRATION: &str = "inscripcion de partidas por mandato judicial";
const BIRTH_REGISTRY_WORDS: &[&str] = &[
    "nacimiento",
    "partida",
    "registro civil",
    "menor",
    "registro de partida de nacimiento",
];
const BIRTH_EXCLUDED_WORDS: &[&str] = &["vehiculo", "moto", "triciclo", "placa"];

const OUT_OF_DOMAIN_MESSAGE: &str = "Disculpa, mi función se limita a brindarte información sobre \
**procedimientos TUPA** de la Municipalidad Provincial de Puno. No puedo ayudarte con preguntas \
que no estén relacionadas con trámites municipales. Por favor, intenta preguntar sobre un \
procedimiento específico.";

const REFINE_MESSAGE: &str = "Disculpa, no encontré un procedimiento TUPA que coincida exactamente \
con tu búsqueda. Por favor, intenta con otras palabras clave o sé más específico. Recuerda que \
solo puedo brindarte información sobre trámites municipales.";

const GENERIC_SUGGESTIONS_MESSAGE: &str = "He encontrado varias opciones que podrían ser \
relevantes para tu búsqueda. ¿Te refieres a alguna de estas o quieres reformular tu pregunta \
para obtener resultados más específicos?";

const LICENSE_REDIRECT: &str = "Estimado ciudadano, la **licencia de conducir (brevete)** no se \
tramita en la Municipalidad Provincial de Puno. Este procedimiento se gestiona a través del \
**Ministerio de Transportes y Comunicaciones (MTC)** o la **Dirección Regional de Transportes y \
Comunicaciones (DRTC)** de su región. Le recomiendo visitar sus sitios web oficiales o \
contactarlos directamente para conocer los requisitos y pasos para obtener su licencia.";

const BUILDING_SUGGESTIONS_MESSAGE: &str = "He encontrado varios procedimientos de edificación \
que podrían ser relevantes. ¿Te refieres a alguno de estos o quieres especificar más?";

const BUILDING_REDIRECT: &str = "Para trámites de **Licencia de Edificación**, te sugiero \
consultar la fuente oficial de la Municipalidad Provincial de Puno, como la Gerencia de \
Desarrollo Urbano o su página web, ya que no tengo información detallada para ese procedimiento \
específico. ¿Hay algún otro trámite municipal en el que pueda ayudarte?";

const BIRTH_REDIRECT: &str = "Para la **inscripción de un recién nacido** y la obtención de su \
partida de nacimiento, el trámite se gestiona directamente en el **Registro Nacional de \
Identificación y Estado Civil (RENIEC)**, no en la Municipalidad Provincial de Puno. Por favor, \
diríjase a las oficinas de RENIEC o consulte su sitio web oficial para más detalles.";

const BIRTH_SUGGESTIONS_SUFFIX: &str = "\n\nSin embargo, he encontrado otros trámites \
relacionados que gestionamos en la municipalidad y que podrían ser de tu interés. ¿Te refieres \
a alguno de estos o quieres especificar más?";

const BIRTH_TEXT_SUFFIX: &str = "\n¿Hay algún otro trámite municipal en el que pueda ayudarte?";

const SEPARATION_NOTICE: &str = "Estimado usuario, la Municipalidad Provincial de Puno gestiona \
trámites de **separación convencional** de mutuo acuerdo (sin hijos menores o mayores con \
incapacidad, y sin sociedad de gananciales por liquidar) o **divorcio ulterior** (después de \
una separación de hecho o legal). Los procesos de **divorcio o separación contenciosos \
(judiciales o notariales con conflictos)** NO se gestionan en esta municipalidad; para esos \
casos le recomiendo consultar con un abogado especializado en derecho de familia o dirigirse a \
los juzgados correspondientes. ";

const SEPARATION_SUGGESTIONS_SUFFIX: &str = "\n\nSi buscas información sobre los trámites que \
sí gestionamos, ¿te refieres a alguno de estos o quieres especificar más?";

const SEPARATION_TEXT_SUFFIX: &str = "Si buscas información sobre la Separación Convencional y \
Divorcio Ulterior que se tramita aquí, por favor, indícalo.";

/// Outgoing response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "response_type", rename_all = "lowercase")]
pub enum Reply {
    /// A procedure detail block, a rejection, or a redirect.
    Text { response: String },
    /// Candidate titles the user can pick from.
    Suggestions {
        message: String,
        suggestions: Vec<String>,
    },
}

impl Reply {
    fn text(response: impl Into<String>) -> Self {
        Reply::Text {
            response: response.into(),
        }
    }

    pub fn response_type(&self) -> &'static str {
        match self {
            Reply::Text { .. } => "text",
            Reply::Suggestions { .. } => "suggestions",
        }
    }

    /// Flattened text recorded in the conversation log.
    pub fn transcript(&self) -> String {
        match self {
            Reply::Text { response } => response.clone(),
            Reply::Suggestions {
                message,
                suggestions,
            } => format!("{message} Opciones: {}", suggestions.join(", ")),
        }
    }
}

/// Topics with dedicated handling, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    DrivingLicense,
    Building,
    Birth,
    Separation,
}

impl Topic {
    pub const PRIORITY: [Topic; 4] = [
        Topic::DrivingLicense,
        Topic::Building,
        Topic::Birth,
        Topic::Separation,
    ];

    fn triggers(self) -> &'static [&'static str] {
        match self {
            Topic::DrivingLicense => LICENSE_TRIGGERS,
            Topic::Building => BUILDING_KEYWORDS,
            Topic::Birth => BIRTH_TRIGGERS,
            Topic::Separation => SEPARATION_TRIGGERS,
        }
    }

    /// The highest-priority topic whose trigger occurs in the raw query.
    pub fn detect(raw_query: &str) -> Option<Topic> {
        Self::PRIORITY.into_iter().find(|topic| {
            topic.triggers().iter().any(|t| raw_query.contains(t))
        })
    }

    fn resolve(self, query: &Query, matches: &[ScoredMatch<'_>]) -> Reply {
        match self {
            Topic::DrivingLicense => resolve_driving_license(matches),
            Topic::Building => resolve_building(matches),
            Topic::Birth => resolve_birth(matches),
            Topic::Separation => resolve_separation(query, matches),
        }
    }
}

/// Which routing branch produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    DirectTitle,
    Topic(Topic),
    OutOfDomain,
    StrongMatch,
    Suggestions,
    Refine,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routed {
    pub branch: Branch,
    pub reply: Reply,
}

/// Route one message against the catalog. Pure: the catalog is not touched
/// and the same message always yields the same reply.
pub fn route(catalog: &ProcedureCatalog, message: &str) -> Routed {
    let query = Query::new(message);

    if let Some(record) = catalog.find_by_title(query.raw()) {
        tracing::info!(title = %record.title, "message is an exact procedure title");
        return Routed {
            branch: Branch::DirectTitle,
            reply: Reply::text(format_procedure(record)),
        };
    }

    let matches = score_all(catalog, &query);

    if let Some(topic) = Topic::detect(query.raw()) {
        tracing::info!(?topic, candidates = matches.len(), "topic handler");
        return Routed {
            branch: Branch::Topic(topic),
            reply: topic.resolve(&query, &matches),
        };
    }

    route_generic(&query, &matches)
}

fn route_generic(query: &Query, matches: &[ScoredMatch<'_>]) -> Routed {
    let top = match matches.first() {
        Some(top) if top.score >= OUT_OF_DOMAIN_THRESHOLD => top,
        _ => {
            tracing::info!(
                top_score = matches.first().map(|m| m.score),
                "query is outside the procedure domain"
            );
            return Routed {
                branch: Branch::OutOfDomain,
                reply: Reply::text(OUT_OF_DOMAIN_MESSAGE),
            };
        }
    };

    let good_matches = matches
        .iter()
        .filter(|m| m.score >= SUGGESTION_FLOOR)
        .count();
    let is_short = query.tokens().len() <= 3 || query.cleaned().chars().count() < 8;
    let ambiguous = is_short && good_matches > 1;

    if top.score >= STRONG_MATCH_THRESHOLD && !ambiguous {
        tracing::info!(title = %top.record.title, score = top.score, "strong match");
        return Routed {
            branch: Branch::StrongMatch,
            reply: Reply::text(format_procedure(top.record)),
        };
    }

    let suggestions = suggestion_titles(
        matches
            .iter()
            .filter(|m| m.score >= SUGGESTION_FLOOR)
            .map(|m| m.record),
    );
    if !suggestions.is_empty() {
        tracing::info!(count = suggestions.len(), ambiguous, "offering suggestions");
        return Routed {
            branch: Branch::Suggestions,
            reply: Reply::Suggestions {
                message: GENERIC_SUGGESTIONS_MESSAGE.to_string(),
                suggestions,
            },
        };
    }

    tracing::info!(top_score = top.score, "weak matches only");
    Routed {
        branch: Branch::Refine,
        reply: Reply::text(REFINE_MESSAGE),
    }
}

fn resolve_driving_license(matches: &[ScoredMatch<'_>]) -> Reply {
    let license = Keywords::Phrase(LICENSE_PHRASES);
    match matches.iter().find(|m| license.matches(&lowered_title(m.record))) {
        Some(m) => Reply::text(format_procedure(m.record)),
        None => Reply::text(LICENSE_REDIRECT),
    }
}

fn resolve_building(matches: &[ScoredMatch<'_>]) -> Reply {
    let building = Keywords::Any(BUILDING_KEYWORDS);
    let canonical = Keywords::Phrase(BUILDING_PHRASES);
    let mut candidates = Vec::new();

    for m in matches {
        let title = lowered_title(m.record);
        if !building.matches(&title) {
            continue;
        }
        if canonical.matches(&title) && m.score >= BUILDING_DIRECT_FLOOR {
            return Reply::text(format_procedure(m.record));
        }
        if m.score >= BUILDING_SUGGESTION_FLOOR {
            candidates.push(m.record);
        }
    }

    let suggestions = suggestion_titles(candidates);
    if suggestions.is_empty() {
        Reply::text(BUILDING_REDIRECT)
    } else {
        Reply::Suggestions {
            message: BUILDING_SUGGESTIONS_MESSAGE.to_string(),
            suggestions,
        }
    }
}

/// Birth registration belongs to RENIEC, so this never answers directly. It
/// redirects and, when available, offers related municipal registry
/// procedures, judicial-mandate registration first.
fn resolve_birth(matches: &[ScoredMatch<'_>]) -> Reply {
    let registry = Keywords::Any(BIRTH_REGISTRY_WORDS);
    let excluded = Keywords::Any(BIRTH_EXCLUDED_WORDS);

    let judicial = matches
        .iter()
        .find(|m| lowered_title(m.record).contains(JUDICIAL_REGISTRATION))
        .map(|m| m.record);
    let related = matches
        .iter()
        .filter(|m| {
            let title = lowered_title(m.record);
            registry.matches(&title) && !excluded.matches(&title)
        })
        .map(|m| m.record);

    let suggestions = suggestion_titles(judicial.into_iter().chain(related));
    if suggestions.is_empty() {
        Reply::text(format!("{BIRTH_REDIRECT}{BIRTH_TEXT_SUFFIX}"))
    } else {
        Reply::Suggestions {
            message: format!("{BIRTH_REDIRECT}{BIRTH_SUGGESTIONS_SUFFIX}"),
            suggestions,
        }
    }
}

fn resolve_separation(query: &Query, matches: &[ScoredMatch<'_>]) -> Reply {
    let separation = Keywords::Any(SEPARATION_PHRASES);
    let mut best = None;
    let mut related = Vec::new();

    for m in matches {
        let title = lowered_title(m.record);
        if !separation.matches(&title) {
            continue;
        }
        let handled_here = phrase_occurs(&title, "separacion convencional")
            || phrase_occurs(&title, "divorcio ulterior");
        if best.is_none() && handled_here && m.score >= SEPARATION_DIRECT_FLOOR {
            best = Some(m.record);
        }
        related.push(m.record);
    }

    if let Some(record) = best {
        let title = lowered_title(record);
        let specific = query.tokens().len() > 2;
        let names_it = query.raw().trim() == normalize_key(&record.title)
            || (query.raw().contains("separacion convencional")
                && title.contains("separacion convencional"));
        if specific && names_it {
            return Reply::text(format_procedure(record));
        }
    }

    let suggestions = suggestion_titles(related);
    if suggestions.is_empty() {
        Reply::text(format!("{SEPARATION_NOTICE}{SEPARATION_TEXT_SUFFIX}"))
    } else {
        Reply::Suggestions {
            message: format!("{SEPARATION_NOTICE}{SEPARATION_SUGGESTIONS_SUFFIX}"),
            suggestions,
        }
    }
}

fn lowered_title(record: &ProcedureRecord) -> String {
    record.title.to_lowercase()
}

/// Up to [`MAX_SUGGESTIONS`] distinct non-empty titles, in input order.
fn suggestion_titles<'a>(
    records: impl IntoIterator<Item = &'a ProcedureRecord>,
) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|r| !r.title.is_empty())
        .filter(|r| seen.insert(normalize_key(&r.title)))
        .map(|r| r.title.clone())
        .take(MAX_SUGGESTIONS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, description: &str) -> ProcedureRecord {
        ProcedureRecord {
            title: title.to_string(),
            code: format!("PA-{}", title.len()),
            description: description.to_string(),
            ..Default::default()
        }
    }

    fn catalog(records: &[(&str, &str)]) -> ProcedureCatalog {
        let mut catalog = ProcedureCatalog::new();
        for (i, (title, description)) in records.iter().enumerate() {
            catalog.insert(record(title, description), &format!("doc{i}"));
        }
        catalog
    }

    fn municipal() -> ProcedureCatalog {
        catalog(&[
            (
                "Licencia de Funcionamiento para Establecimientos",
                "Autoriza el desarrollo de actividades económicas en un establecimiento.",
            ),
            (
                "Certificado de Zonificacion y Vias",
                "Documento que acredita la zonificacion y vias del predio.",
            ),
            (
                "Certificado de Numeracion",
                "Asigna numeracion municipal al predio.",
            ),
            (
                "Permiso de Operacion para Vehiculos Menores Moto Taxi",
                "Autoriza el servicio de transporte en moto.",
            ),
            (
                "Separacion Convencional",
                "Procedimiento de separacion de mutuo acuerdo ante la municipalidad.",
            ),
            (
                "Divorcio Ulterior",
                "Disolucion del vinculo matrimonial tras la separacion convencional.",
            ),
            (
                "Inscripcion de Partidas por Mandato Judicial",
                "Inscripcion ordenada por resolucion judicial en el registro civil.",
            ),
            (
                "Licencia de Edificacion Modalidad A",
                "Licencia para obras de construccion menores.",
            ),
            (
                "Licencia de Edificacion Modalidad B",
                "Licencia para obras de edificacion multifamiliar.",
            ),
        ])
    }

    #[test]
    fn exact_title_short_circuits() {
        let catalog = municipal();
        let routed = route(&catalog, "Certificado de Numeracion");
        assert_eq!(routed.branch, Branch::DirectTitle);
        match routed.reply {
            Reply::Text { response } => {
                assert!(response.contains("**Procedimiento:** Certificado de Numeracion"));
                assert!(response.contains("Asigna numeracion municipal al predio."));
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn brevete_redirects_to_transport_authority() {
        let routed = route(&municipal(), "brevete");
        assert_eq!(routed.branch, Branch::Topic(Topic::DrivingLicense));
        assert_eq!(routed.reply, Reply::text(LICENSE_REDIRECT));
    }

    #[test]
    fn license_answers_when_catalog_has_it() {
        let catalog = catalog(&[("Duplicado de Licencia de Conducir", "")]);
        let routed = route(&catalog, "como saco mi brevete");
        match routed.reply {
            Reply::Text { response } => {
                assert!(response.contains("Duplicado de Licencia de Conducir"))
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn building_canonical_title_answers_directly() {
        let routed = route(&municipal(), "quiero la licencia de edificacion modalidad b");
        assert_eq!(routed.branch, Branch::Topic(Topic::Building));
        match routed.reply {
            Reply::Text { response } => {
                assert!(response.contains("**Procedimiento:** Licencia de Edificacion Modalidad"))
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn building_vague_query_suggests() {
        let catalog = catalog(&[
            ("Ampliacion de Vivienda", "obras menores"),
            ("Remodelacion de Local", "obras de remodelacion"),
        ]);
        let routed = route(&catalog, "quiero hacer una obra");
        match routed.reply {
            Reply::Suggestions { suggestions, .. } => {
                assert_eq!(suggestions.len(), 2);
            }
            other => panic!("expected suggestions, got {other:?}"),
        }
    }

    #[test]
    fn building_without_candidates_redirects() {
        let catalog = catalog(&[("Certificado de Numeracion", "")]);
        let routed = route(&catalog, "construccion de mi casa");
        assert_eq!(routed.reply, Reply::text(BUILDING_REDIRECT));
    }

    #[test]
    fn birth_never_surfaces_vehicle_procedures() {
        let routed = route(&municipal(), "quiero inscribir a mi bebe recien nacido");
        assert_eq!(routed.branch, Branch::Topic(Topic::Birth));
        match routed.reply {
            Reply::Suggestions {
                message,
                suggestions,
            } => {
                assert!(message.contains("RENIEC"));
                assert_eq!(
                    suggestions[0],
                    "Inscripcion de Partidas por Mandato Judicial"
                );
                assert!(suggestions.iter().all(|s| !s.to_lowercase().contains("moto")));
            }
            other => panic!("expected suggestions, got {other:?}"),
        }
    }

    #[test]
    fn birth_without_registry_procedures_is_a_redirect() {
        let catalog = catalog(&[("Certificado de Numeracion", "")]);
        match route(&catalog, "partida de nacimiento").reply {
            Reply::Text { response } => assert!(response.contains("RENIEC")),
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn separation_generic_query_suggests_local_procedures() {
        let routed = route(&municipal(), "quiero divorcio");
        assert_eq!(routed.branch, Branch::Topic(Topic::Separation));
        match routed.reply {
            Reply::Suggestions {
                message,
                suggestions,
            } => {
                assert!(message.contains("contenciosos"));
                assert!(suggestions.contains(&"Separacion Convencional".to_string()));
                assert!(suggestions.contains(&"Divorcio Ulterior".to_string()));
            }
            other => panic!("expected suggestions, got {other:?}"),
        }
    }

    #[test]
    fn separation_specific_query_answers() {
        let routed = route(
            &municipal(),
            "tramite de separacion convencional en la municipalidad",
        );
        match routed.reply {
            Reply::Text { response } => {
                assert!(response.contains("**Procedimiento:** Separacion Convencional"))
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn greeting_is_out_of_domain() {
        let routed = route(&municipal(), "hola, buenos dias");
        assert_eq!(routed.branch, Branch::OutOfDomain);
        assert_eq!(routed.reply, Reply::text(OUT_OF_DOMAIN_MESSAGE));
    }

    #[test]
    fn empty_catalog_is_out_of_domain() {
        let routed = route(&ProcedureCatalog::new(), "certificado de numeracion");
        assert_eq!(routed.branch, Branch::OutOfDomain);
    }

    #[test]
    fn short_generic_query_with_several_matches_suggests() {
        let routed = route(&municipal(), "certificado");
        assert_eq!(routed.branch, Branch::Suggestions);
        match routed.reply {
            Reply::Suggestions { suggestions, .. } => {
                assert_eq!(
                    suggestions,
                    vec!["Certificado de Numeracion", "Certificado de Zonificacion y Vias"]
                );
            }
            other => panic!("expected suggestions, got {other:?}"),
        }
    }

    #[test]
    fn strong_unambiguous_match_answers() {
        let routed = route(&municipal(), "zonificacion vias");
        assert_eq!(routed.branch, Branch::StrongMatch);
        match routed.reply {
            Reply::Text { response } => {
                assert!(response.contains("Certificado de Zonificacion y Vias"))
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn reconversion_program_answers_directly() {
        let catalog = catalog(&[
            ("Evaluacion y Aprobacion del Programa de Reconversion", ""),
            ("Certificado de Numeracion", ""),
        ]);
        let routed = route(&catalog, "programa de reconversion forestal");
        assert_eq!(routed.branch, Branch::StrongMatch);
        match routed.reply {
            Reply::Text { response } => assert!(response.contains(
                "**Procedimiento:** Evaluacion y Aprobacion del Programa de Reconversion"
            )),
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn weak_match_asks_to_refine() {
        // Only a description hit: score 4, above the domain floor but below
        // the suggestion floor.
        let catalog = catalog(&[("Tramite", "establecimiento")]);
        let routed = route(&catalog, "establecimiento");
        assert_eq!(routed.branch, Branch::Refine);
        assert_eq!(routed.reply, Reply::text(REFINE_MESSAGE));
    }

    #[test]
    fn suggestions_are_deduplicated_and_capped() {
        let titles: Vec<String> = (0..8)
            .map(|i| format!("Certificado tipo {}", (b'a' + i) as char))
            .collect();
        let mut records: Vec<(&str, &str)> =
            titles.iter().map(|t| (t.as_str(), "")).collect();
        records.push(("certificado tipo a", ""));
        let catalog = catalog(&records);

        match route(&catalog, "certificado").reply {
            Reply::Suggestions { suggestions, .. } => {
                assert_eq!(suggestions.len(), MAX_SUGGESTIONS);
                let unique: HashSet<_> =
                    suggestions.iter().map(|s| s.to_lowercase()).collect();
                assert_eq!(unique.len(), suggestions.len());
            }
            other => panic!("expected suggestions, got {other:?}"),
        }
    }

    #[test]
    fn routing_is_deterministic() {
        let catalog = municipal();
        for message in ["certificado", "licencia", "divorcio", "zonificacion vias"] {
            assert_eq!(route(&catalog, message), route(&catalog, message));
        }
    }

    #[test]
    fn reply_serializes_with_response_type_tag() {
        let text = serde_json::to_value(Reply::text("hola")).unwrap();
        assert_eq!(text["response_type"], "text");
        assert_eq!(text["response"], "hola");

        let suggestions = serde_json::to_value(Reply::Suggestions {
            message: "m".to_string(),
            suggestions: vec!["a".to_string()],
        })
        .unwrap();
        assert_eq!(suggestions["response_type"], "suggestions");
        assert_eq!(suggestions["suggestions"][0], "a");
    }

    #[test]
    fn transcript_flattens_suggestions() {
        let reply = Reply::Suggestions {
            message: "Elige".to_string(),
            suggestions: vec!["A".to_string(), "B".to_string()],
        };
        assert_eq!(reply.transcript(), "Elige Opciones: A, B");
    }
}
