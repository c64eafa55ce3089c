//! Contact form route
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/contact | POST | none |

use axum::{Router, extract::State, routing::post};
use http::StatusCode;
use shared::models::{ContactCreate, ContactReceived, ContactSubject};

use crate::core::ServerState;
use crate::db::repository::contact;
use crate::utils::validation::{MAX_MESSAGE_LEN, MAX_NAME_LEN, is_valid_email, non_blank};
use crate::utils::{AppError, AppResult, ErrorCode, Json};

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/contact", post(submit))
}

/// POST /api/contact - store an inquiry
pub async fn submit(
    State(state): State<ServerState>,
    Json(payload): Json<ContactCreate>,
) -> AppResult<(StatusCode, Json<ContactReceived>)> {
    let name = non_blank(payload.name.as_deref())
        .ok_or_else(|| AppError::invalid_format("Name must be a non-empty string"))?;
    if name.chars().count() > MAX_NAME_LEN {
        return Err(AppError::invalid_format(format!(
            "Name exceeds {MAX_NAME_LEN} character limit"
        )));
    }

    let email = non_blank(payload.email.as_deref())
        .filter(|e| is_valid_email(e))
        .ok_or_else(|| AppError::new(ErrorCode::InvalidEmail))?;

    let message = non_blank(payload.message.as_deref())
        .ok_or_else(|| AppError::invalid_format("Message must be a non-empty string"))?;
    // Limit applies to the message as sent, surrounding whitespace included
    let length = payload.message.as_deref().map_or(0, |m| m.chars().count());
    if length > MAX_MESSAGE_LEN {
        return Err(AppError::new(ErrorCode::MessageTooLong).with_detail("length", length));
    }

    let subject = ContactSubject::coerce(payload.subject.as_deref().map(str::trim));

    let contact = contact::create(
        state.pool(),
        contact::NewContact {
            name,
            email,
            subject,
            message,
        },
    )
    .await?;

    tracing::info!(contact_id = contact.id, subject = subject.as_str(), "Contact message received");
    Ok((
        StatusCode::CREATED,
        Json(ContactReceived {
            message: "Message received".to_string(),
            contact,
        }),
    ))
}
