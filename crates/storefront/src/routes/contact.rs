//! Contact and quote form handlers.
//!
//! Submissions are not persisted and no email leaves this service; the
//! contract is deliberately thin: validate, log for the team,
//! acknowledge.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use cubed_core::Email;

use crate::state::AppState;

/// Shared contact block on every form.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Contact form payload.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    pub subject: String,
    pub message: String,
}

/// Services a general quote can ask about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuoteService {
    StlPrint,
    Modeling,
    Consulting,
    Prototyping,
}

/// How fast the customer needs an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

/// General quote request.
#[derive(Debug, Deserialize)]
pub struct QuoteForm {
    pub service: QuoteService,
    pub description: String,
    #[serde(default)]
    pub urgency: Urgency,
    #[serde(default)]
    pub budget: Option<String>,
    pub contact: ContactInfo,
}

/// Filament options for STL print quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Material {
    PLA,
    PETG,
    ABS,
    TPU,
}

/// STL print quote request.
///
/// Only file *names* travel here - the upload pipeline does not exist,
/// matching the stubbed upload UI.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintQuoteForm {
    pub material: Material,
    pub color: String,
    pub quantity: u32,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub file_names: Vec<String>,
    pub contact: ContactInfo,
}

/// Modeling complexity tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    Medium,
    Complex,
    Expert,
}

/// Custom modeling quote request.
#[derive(Debug, Deserialize)]
pub struct ModelingQuoteForm {
    pub description: String,
    pub complexity: Complexity,
    pub contact: ContactInfo,
}

/// Response for form submissions.
#[derive(Debug, Serialize)]
pub struct FormResponse {
    pub message: String,
}

fn reject(message: &str) -> (StatusCode, Json<FormResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(FormResponse {
            message: message.to_owned(),
        }),
    )
}

fn accept(message: &str) -> (StatusCode, Json<FormResponse>) {
    (
        StatusCode::OK,
        Json(FormResponse {
            message: message.to_owned(),
        }),
    )
}

fn validate_contact(contact: &ContactInfo) -> Option<&'static str> {
    if contact.name.trim().is_empty() {
        return Some("name is required");
    }
    if Email::parse(&contact.email).is_err() {
        return Some("please enter a valid email address");
    }
    None
}

/// Submit the contact form.
///
/// POST /api/contact
#[instrument(skip(_state, form), fields(email = %form.email))]
pub async fn contact(
    State(_state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> impl IntoResponse {
    if form.name.trim().is_empty() || form.subject.trim().is_empty() || form.message.trim().is_empty()
    {
        return reject("name, email, subject and message are required");
    }
    if Email::parse(&form.email).is_err() {
        return reject("please enter a valid email address");
    }

    tracing::info!(
        name = %form.name.trim(),
        email = %form.email.trim(),
        service = form.service.as_deref().unwrap_or("unspecified"),
        subject = %form.subject.trim(),
        "contact message received"
    );

    accept("Message sent successfully! We will get back to you soon.")
}

/// Submit a general quote request.
///
/// POST /api/quotes
#[instrument(skip(_state, form), fields(service = ?form.service, urgency = ?form.urgency))]
pub async fn quote(
    State(_state): State<AppState>,
    Json(form): Json<QuoteForm>,
) -> impl IntoResponse {
    if let Some(problem) = validate_contact(&form.contact) {
        return reject(problem);
    }
    if form.description.trim().is_empty() {
        return reject("a project description is required");
    }

    tracing::info!(
        service = ?form.service,
        urgency = ?form.urgency,
        budget = form.budget.as_deref().unwrap_or("unspecified"),
        email = %form.contact.email,
        "quote request received"
    );

    accept("Quote request sent successfully! We will get back to you soon.")
}

/// Submit an STL print quote request.
///
/// POST /api/quotes/print
#[instrument(skip(_state, form), fields(material = ?form.material, quantity = form.quantity))]
pub async fn print_quote(
    State(_state): State<AppState>,
    Json(form): Json<PrintQuoteForm>,
) -> impl IntoResponse {
    if let Some(problem) = validate_contact(&form.contact) {
        return reject(problem);
    }
    if form.quantity < 1 {
        return reject("quantity must be at least 1");
    }
    if form.file_names.iter().any(|name| !name.to_lowercase().ends_with(".stl")) {
        return reject("only STL files are accepted");
    }

    tracing::info!(
        material = ?form.material,
        color = %form.color,
        quantity = form.quantity,
        files = form.file_names.len(),
        email = %form.contact.email,
        "print quote request received"
    );

    accept("Request sent successfully! We will get back to you with a quote soon.")
}

/// Submit a custom modeling quote request.
///
/// POST /api/quotes/modeling
#[instrument(skip(_state, form), fields(complexity = ?form.complexity))]
pub async fn modeling_quote(
    State(_state): State<AppState>,
    Json(form): Json<ModelingQuoteForm>,
) -> impl IntoResponse {
    if let Some(problem) = validate_contact(&form.contact) {
        return reject(problem);
    }
    if form.description.trim().is_empty() {
        return reject("a project description is required");
    }

    tracing::info!(
        complexity = ?form.complexity,
        email = %form.contact.email,
        "modeling quote request received"
    );

    accept("Request sent successfully! We will get back to you with a quote soon.")
}
