use crate::application::http::{
    captures::router::CaptureApiDoc, help::router::HelpApiDoc, images::router::ImageApiDoc,
    ledger::router::LedgerApiDoc, session::router::SessionApiDoc, speech::router::SpeechApiDoc,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sugarwise API"
    ),
    nest(
        (path = "/session", api = SessionApiDoc),
        (path = "/ledger", api = LedgerApiDoc),
        (path = "/captures", api = CaptureApiDoc),
        (path = "/images", api = ImageApiDoc),
        (path = "/speech", api = SpeechApiDoc),
        (path = "/help", api = HelpApiDoc),
    )
)]
pub struct ApiDoc;
