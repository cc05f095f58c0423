use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Kickoff API",
        version = "1.0.0",
        description = "Project interview assistant that turns conversations into downloadable SRS documents"
    ),
    tags(
        (name = "interview", description = "Project interview chat and SRS documents")
    )
)]
pub struct ApiDoc;

pub fn openapi() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.merge(kickoff_api_interview::openapi());
    doc
}

pub fn write_openapi_json() -> std::io::Result<std::path::PathBuf> {
    let doc = openapi();
    let json = serde_json::to_string_pretty(&doc)
        .map_err(|e| std::io::Error::other(format!("serialize openapi: {e}")))?;

    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("openapi.gen.json");
    std::fs::write(&path, json)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    #[test]
    fn documents_every_route() {
        let doc = super::openapi();
        for path in ["/chat", "/create_document/{doc_id}", "/export-chat"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
