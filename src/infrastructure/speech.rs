// Speech output adapter
//
// The synthesis device itself is an external collaborator; this adapter
// hands the utterance off and consumes no completion signal.

use crate::application::analysis::SpeechSynthesizer;
use async_trait::async_trait;

#[derive(Debug, Clone, Default)]
pub struct ConsoleAnnouncer;

#[async_trait]
impl SpeechSynthesizer for ConsoleAnnouncer {
    async fn speak(&self, utterance: &str) {
        tracing::info!(%utterance, "audio alert");
    }
}
