//! Document templates: printable documents per module and functional
//! feature, with an effective date and an attached template file.
//!
//! This is the file-bearing family: create and update are encoded as
//! multipart forms so a replacement binary can travel with the metadata.

use crate::error::Result;
use crate::resource::{EncodedBody, ResourceDescriptor};
use bridge_traits::http::{MultipartForm, MultipartPart};
use bytes::Bytes;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A document template as returned by the server. The binary itself stays
/// server-side; the entity carries a reference to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTemplate {
    pub id: String,
    pub module_id: String,
    #[serde(rename = "fonctionnalite")]
    pub feature: String,
    /// Server-side reference to the stored document blob.
    pub document_ref: String,
    #[serde(rename = "dateEffet")]
    pub effective_date: NaiveDate,
    pub status: String,
}

/// Binary attachment for create/update.
#[derive(Debug, Clone)]
pub struct DocumentBlob {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

/// Create/update payload. `document` is required on create by the server;
/// on update its absence keeps the stored binary.
#[derive(Debug, Clone)]
pub struct TemplatePayload {
    pub module_id: String,
    pub feature: String,
    pub effective_date: NaiveDate,
    pub document: Option<DocumentBlob>,
}

impl TemplatePayload {
    fn to_multipart(&self) -> MultipartForm {
        let mut form = MultipartForm::new()
            .part(MultipartPart::text("moduleId", self.module_id.clone()))
            .part(MultipartPart::text("fonctionnalite", self.feature.clone()))
            .part(MultipartPart::text(
                "dateEffet",
                self.effective_date.format("%Y-%m-%d").to_string(),
            ));

        if let Some(document) = &self.document {
            form = form.part(MultipartPart::file(
                "document",
                document.file_name.clone(),
                document.content_type.clone(),
                document.data.clone(),
            ));
        }

        form
    }
}

/// Descriptor binding document templates to the generic synchronizer.
pub struct DocumentTemplates;

impl ResourceDescriptor for DocumentTemplates {
    type Entity = DocumentTemplate;
    type CreatePayload = TemplatePayload;
    type UpdatePayload = TemplatePayload;

    const NAME: &'static str = "modeles-documents";
    const COLLECTION_PATH: &'static str = "modeles-documents";

    fn entity_id(entity: &Self::Entity) -> &str {
        &entity.id
    }

    fn encode_create(payload: &Self::CreatePayload) -> Result<EncodedBody> {
        Ok(EncodedBody::Multipart(payload.to_multipart()))
    }

    fn encode_update(payload: &Self::UpdatePayload) -> Result<EncodedBody> {
        Ok(EncodedBody::Multipart(payload.to_multipart()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(with_document: bool) -> TemplatePayload {
        TemplatePayload {
            module_id: "m-1".to_string(),
            feature: "EMISSION_BILLET".to_string(),
            effective_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            document: with_document.then(|| DocumentBlob {
                file_name: "billet.pdf".to_string(),
                content_type: "application/pdf".to_string(),
                data: Bytes::from_static(b"%PDF-"),
            }),
        }
    }

    #[test]
    fn test_encodes_as_multipart_with_file() {
        match DocumentTemplates::encode_create(&payload(true)).unwrap() {
            EncodedBody::Multipart(form) => {
                assert_eq!(form.parts.len(), 4);
                let file = form.parts.iter().find(|p| p.name == "document").unwrap();
                assert_eq!(file.file_name.as_deref(), Some("billet.pdf"));
                assert_eq!(file.content_type.as_deref(), Some("application/pdf"));
            }
            other => panic!("Expected multipart body, got {:?}", other),
        }
    }

    #[test]
    fn test_update_without_file_omits_part() {
        match DocumentTemplates::encode_update(&payload(false)).unwrap() {
            EncodedBody::Multipart(form) => {
                assert_eq!(form.parts.len(), 3);
                assert!(form.parts.iter().all(|p| p.name != "document"));
                let date = form.parts.iter().find(|p| p.name == "dateEffet").unwrap();
                assert_eq!(date.data.as_ref(), b"2026-01-01");
            }
            other => panic!("Expected multipart body, got {:?}", other),
        }
    }

    #[test]
    fn test_template_wire_shape() {
        let json = r#"{
            "id": "5",
            "moduleId": "m-1",
            "fonctionnalite": "EMISSION_BILLET",
            "documentRef": "blob://templates/5",
            "dateEffet": "2026-01-01",
            "status": "CREE"
        }"#;
        let template: DocumentTemplate = serde_json::from_str(json).unwrap();
        assert_eq!(template.feature, "EMISSION_BILLET");
        assert_eq!(
            template.effective_date,
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
        );
    }
}
