//! Club document archive. Uploads are multipart: metadata fields plus `file`.

use super::{ApiClient, UploadFile};
use crate::error::ApiResult;
use crate::models::{DocumentForm, DocumentList};

pub async fn fetch_documents(api: &ApiClient) -> ApiResult<DocumentList> {
    api.get("api/documents/", "Error al cargar documentos")
        .bearer_if_present()
        .fetch()
        .await
}

pub async fn create_document(
    api: &ApiClient,
    form: &DocumentForm,
    file: UploadFile,
) -> ApiResult<()> {
    tracing::info!("Uploading document '{}' ({} bytes)", form.name, file.size());
    api.post("api/documents/", "Error al crear documento")
        .bearer_if_present()
        .multipart(form.fields(), Some(file))
        .execute()
        .await
}

/// Update metadata; the stored file is replaced only when a new one is given.
pub async fn update_document(
    api: &ApiClient,
    document_id: i64,
    form: &DocumentForm,
    file: Option<UploadFile>,
) -> ApiResult<()> {
    api.put(
        &format!("api/documents/{}", document_id),
        "No se pudo actualizar el documento",
    )
    .bearer_if_present()
    .multipart(form.fields(), file)
    .execute()
    .await
}

pub async fn delete_document(api: &ApiClient, document_id: i64) -> ApiResult<()> {
    api.delete(
        &format!("api/documents/{}", document_id),
        "Error al eliminar el documento",
    )
    .bearer_if_present()
    .execute()
    .await
}

pub fn download_url(api: &ApiClient, document_id: i64) -> String {
    api.url(&format!("api/documents/{}/download", document_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocumentType;
    use crate::services::mock::{client, MockTransport};
    use crate::services::{Method, RequestBody};
    use std::rc::Rc;

    fn form() -> DocumentForm {
        DocumentForm {
            name: "Estatuto 2025".to_string(),
            entry_date: "2025-03-01".to_string(),
            responsible: "Secretaría".to_string(),
            document_type: DocumentType::Estatuto,
            description: "Estatuto vigente del club".to_string(),
        }
    }

    #[test]
    fn upload_is_multipart_with_file() {
        let mock = Rc::new(MockTransport::new());
        mock.respond(201, r#"{"id":4}"#);
        let api = client(&mock);
        let file = UploadFile {
            name: "estatuto.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            bytes: vec![1, 2, 3],
        };

        tokio_test::block_on(create_document(&api, &form(), file.clone())).unwrap();
        let request = mock.last_request();
        assert_eq!(request.method, Method::Post);
        match request.body {
            RequestBody::Multipart { fields, file: sent } => {
                assert!(fields.contains(&("document_type".to_string(), "estatuto".to_string())));
                assert!(fields.contains(&("entry_date".to_string(), "2025-03-01".to_string())));
                assert_eq!(sent, Some(file));
            }
            other => panic!("expected multipart, got {:?}", other),
        }
    }

    #[test]
    fn list_and_download_url() {
        let mock = Rc::new(MockTransport::new());
        mock.respond(
            200,
            r#"{"documents":[{"id":4,"name":"Acta","entry_date":"2025-01-10","responsible":"Ana",
                "document_type":"acta","file_name":"acta.pdf","file_size":2048}],"total":1}"#,
        );
        let api = client(&mock);

        let list = tokio_test::block_on(fetch_documents(&api)).unwrap();
        assert_eq!(list.total, 1);
        assert_eq!(
            download_url(&api, list.documents[0].id),
            "http://api.test/api/documents/4/download"
        );
    }
}
