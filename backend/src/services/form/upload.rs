//! Caches one PDF upload for a row's attachment slot.
//!
//! The multipart body is streamed chunk by chunk with the size ceiling applied
//! on the way in. The bytes go into the session's `AttachmentCache`, not into
//! durable storage; they are only uploaded to the backend when the whole form
//! validates at submit time. A cached upload survives failed-validation
//! resubmits, so fixing an unrelated error never means re-uploading.

use crate::persistence::sqlite::MAX_ATTACHMENT_BYTES;
use crate::schema;
use crate::session::SessionsState;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use common::model::section::SectionKind;
use futures_util::StreamExt;

/// Reads the `file` part of the multipart body, enforcing the PDF-only and
/// size policies while streaming.
async fn read_pdf_part(payload: &mut Multipart) -> Result<(String, Vec<u8>), String> {
    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| e.to_string())?;
        let part_name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));
        if part_name.as_deref() != Some("file") {
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
            .unwrap_or_default();
        if !filename.to_ascii_lowercase().ends_with(".pdf") {
            return Err("The file must end with .pdf".to_string());
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| e.to_string())?;
            if bytes.len() + chunk.len() > MAX_ATTACHMENT_BYTES {
                return Err("PDF exceeds the 10 MB limit".to_string());
            }
            bytes.extend_from_slice(&chunk);
        }
        return Ok((filename, bytes));
    }
    Err("Missing file".to_string())
}

/// Actix web handler for
/// `POST /api/form/{session_id}/attachments/{section}/{row_id}/{slot}`.
pub async fn process(
    state: web::Data<SessionsState>,
    path: web::Path<(String, String, String, String)>,
    mut payload: Multipart,
) -> impl Responder {
    let (session_id, section_key, row_id, slot) = path.into_inner();
    let Some(kind) = SectionKind::from_key(&section_key) else {
        return HttpResponse::NotFound().body("Unknown section");
    };
    if schema::section(kind).slot(&slot).is_none() {
        return HttpResponse::NotFound().body("Unknown attachment slot");
    }

    let (filename, bytes) = match read_pdf_part(&mut payload).await {
        Ok(part) => part,
        Err(e) => return HttpResponse::BadRequest().body(format!("Error: {}", e)),
    };

    let mut sessions = state.sessions.write().await;
    let Some(session) = sessions.get_mut(&session_id) else {
        return HttpResponse::NotFound().body("Session not found");
    };
    if !session.rows.rows(kind).iter().any(|r| r.id == row_id) {
        return HttpResponse::NotFound().body("Row not found");
    }

    session.attachments.store(&row_id, &slot, &filename, bytes);
    HttpResponse::Ok().json(serde_json::json!({ "cached": filename }))
}
