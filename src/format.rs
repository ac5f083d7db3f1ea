use crate::record::ProcedureRecord;

const NOT_AVAILABLE: &str = "No disponible";

/// Render a procedure as a Markdown detail block.
///
/// Every section is always present; missing data renders as placeholder
/// text.
pub fn format_procedure(record: &ProcedureRecord) -> String {
    let mut parts: Vec<String> = Vec::new();

    parts.push("El trámite que desea es este:".to_string());
    parts.push(format!("**Procedimiento:** {}", or_placeholder(&record.title)));
    parts.push(format!("**Código:** {}", or_placeholder(&record.code)));

    let description = record.description.trim();
    if description.is_empty() {
        parts.push(
            "**Descripción:** No se encontró una descripción detallada para este procedimiento."
                .to_string(),
        );
    } else {
        parts.push(format!("**Descripción:** {description}"));
    }

    parts.push("\n**Requisitos:**".to_string());
    push_bullets(
        &mut parts,
        &record.requirements,
        "No se encontraron requisitos específicos en la base de datos para este procedimiento.",
    );

    parts.push("\n**Canales de Atención:**".to_string());
    push_bullets(
        &mut parts,
        &record.service_channels,
        "No se especificaron canales de atención.",
    );

    parts.push("\n**Pago por Derecho de Tramitación:**".to_string());
    let payment = &record.payment;
    if !payment.amount.is_empty() {
        parts.push(format!("- **Monto:** {}", payment.amount));
    }
    if !payment.modalities.is_empty() {
        parts.push(format!(
            "- **Modalidad de Pago:** {}",
            payment.modalities.iter().collect::<Vec<_>>().join(", ")
        ));
    }
    if payment.amount.is_empty() && payment.modalities.is_empty() {
        parts.push("- Información de pago no especificada.".to_string());
    }

    parts.push(format!("\n**Plazo:** {}", or_placeholder(&record.deadline)));

    parts.push("\n**Sedes y Horarios de Atención:**".to_string());
    push_bullets(
        &mut parts,
        &record.office_locations,
        "No se especificaron sedes u horarios.",
    );

    parts.push(format!(
        "\n**Unidad donde se presenta la documentación:** {}",
        or_placeholder(&record.submission_unit)
    ));
    parts.push(format!(
        "**Unidad responsable de aprobar:** {}",
        or_placeholder(&record.approval_unit)
    ));

    parts.push("\n**Consulta sobre el Servicio:**".to_string());
    let contact = &record.contact;
    if !contact.phone.is_empty() {
        let mut line = format!("- Teléfono: {}", contact.phone);
        if !contact.extension.is_empty() {
            line.push_str(&format!(" Anexo: {}", contact.extension));
        }
        parts.push(line);
    }
    if !contact.email.is_empty() {
        parts.push(format!("- Correo: {}", contact.email));
    }
    if contact.phone.is_empty() && contact.email.is_empty() {
        parts.push("- Información de contacto no especificada.".to_string());
    }

    parts.join("\n")
}

fn or_placeholder(value: &str) -> &str {
    if value.trim().is_empty() {
        NOT_AVAILABLE
    } else {
        value
    }
}

fn push_bullets(parts: &mut Vec<String>, items: &[String], empty: &str) {
    if items.is_empty() {
        parts.push(format!("- {empty}"));
    } else {
        parts.extend(items.iter().map(|item| format!("- {item}")));
    }
}
