use std::path::Path;

fn document(title: &str, code: &str, description: &str) -> String {
    format!(
        "Titulo: {title}\n\
         Código:\n\
         {code}\n\
         Descripción del procedimiento: {description}\n\
         Requisitos:\n\
         1.- Solicitud dirigida al alcalde.\n\
         2.- Copia del DNI.\n\
         Canales de atención:\n\
         Atención presencial\n\
         Pago por derecho de tramitación:\n\
         Monto - S/ 20.00\n\
         Caja de la municipalidad\n\
         Plazo: 10 días hábiles\n\
         Sedes y horarios de atención:\n\
         -Sede central: Jr. Deustua 458\n\
         Unidad de organización donde se presenta la documentación:\n\
         Unidad de Trámite Documentario\n\
         Unidad de organización responsable de aprobar la solicitud:\n\
         Subgerencia competente\n\
         Consulta sobre el servicio:\n\
         Teléfono: 051-601000\n\
         Anexo: 120\n\
         Correo: tramites@munipuno.gob.pe\n"
    )
}

/// A small corpus of procedure documents, including a duplicated title, a
/// hidden file, and a file that is not valid UTF-8.
pub fn write_corpus(dir: &Path) -> std::io::Result<()> {
    let documents = [
        (
            "licencia_funcionamiento.txt",
            "LICENCIA DE FUNCIONAMIENTO PARA ESTABLECIMIENTOS",
            "PA-0123",
            "Autoriza el desarrollo de actividades económicas en un establecimiento determinado.",
        ),
        (
            "certificado_numeracion.txt",
            "Certificado de Numeracion",
            "PA-0201",
            "Asigna la numeracion municipal al predio.",
        ),
        (
            "certificado_numeracion_copia.txt",
            "Certificado de Numeracion",
            "PA-0202",
            "Segunda version del mismo tramite.",
        ),
        (
            "certificado_zonificacion.txt",
            "Certificado de Zonificacion y Vias",
            "PA-0203",
            "Acredita la zonificacion del predio.",
        ),
        (
            "certificado_parametros.txt",
            "Certificado de Parametros Urbanisticos",
            "PA-0204",
            "Detalla los parametros aplicables al predio.",
        ),
        (
            "certificado_posesion.txt",
            "Certificado de Posesion",
            "PA-0205",
            "Acredita la posesion de un predio.",
        ),
        (
            "certificado_habitabilidad.txt",
            "Certificado de Habitabilidad",
            "PA-0206",
            "Acredita condiciones de la vivienda.",
        ),
        (
            "certificado_defensa_civil.txt",
            "Certificado de Inspeccion Tecnica",
            "PA-0207",
            "Inspeccion de seguridad en edificaciones.",
        ),
        (
            "edificacion_a.txt",
            "Licencia de Edificacion Modalidad A",
            "PA-0301",
            "Autoriza obras menores de edificacion.",
        ),
        (
            "mandato_judicial.txt",
            "Inscripcion de Partidas por Mandato Judicial",
            "PA-0401",
            "Inscripcion ordenada por resolucion judicial en el registro civil.",
        ),
        (
            "separacion.txt",
            "Separacion Convencional",
            "PA-0501",
            "Separacion de mutuo acuerdo ante la municipalidad.",
        ),
        (
            "moto_taxi.txt",
            "Permiso de Operacion para Vehiculos Menores Moto Taxi",
            "PA-0601",
            "Autoriza el servicio de transporte especial.",
        ),
    ];

    for (file, title, code, description) in documents {
        std::fs::write(dir.join(file), document(title, code, description))?;
    }

    std::fs::write(
        dir.join(".oculto.txt"),
        document("Tramite Oculto", "PA-9999", "No debe cargarse."),
    )?;
    std::fs::write(dir.join("roto.txt"), b"Titulo: Roto\n\xff\xfe\n")?;
    std::fs::write(dir.join("notas.md"), "Titulo: No es un documento\n")?;

    Ok(())
}
