use std::future::Future;

use crate::domain::{common::entities::app_errors::CoreError, speech::entities::SpeechOutput};

/// Turns advice text into something the user can listen to
#[cfg_attr(test, mockall::automock)]
pub trait SpeechSynthesizer: Send + Sync {
    fn synthesize(
        &self,
        text: String,
    ) -> impl Future<Output = Result<SpeechOutput, CoreError>> + Send;
}
