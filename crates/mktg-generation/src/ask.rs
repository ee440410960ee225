//! Free-form questions against the ICP knowledge base.

use mktg_context::Retriever;

use crate::error::GenerationError;
use crate::llm::TextGenerator;
use crate::prompts::ask_prompt;

pub const DEFAULT_ASK_K: usize = 5;

/// Answer `question` from the `k` closest knowledge-base chunks.
///
/// # Errors
///
/// Returns [`GenerationError::Context`] if retrieval fails, or a transport
/// error from the model.
pub async fn ask<G, R>(
    generator: &G,
    retriever: &R,
    question: &str,
    k: usize,
) -> Result<String, GenerationError>
where
    G: TextGenerator + ?Sized,
    R: Retriever + ?Sized,
{
    let context = retriever.context(question, k, "\n\n").await?;
    let reply = generator
        .generate(&ask_prompt(&context, question), Some(0.0))
        .await?;
    Ok(reply.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ScriptedGenerator, StubRetriever};

    #[tokio::test]
    async fn answers_from_retrieved_context() {
        let retriever = StubRetriever::with_texts(&["CXOs buy on ROI", "Churn is the top fear"]);
        let generator = ScriptedGenerator::new(["\n  Lead with retention ROI.  \n"]);

        let answer = ask(&generator, &retriever, "How should we position?", DEFAULT_ASK_K)
            .await
            .unwrap();

        assert_eq!(answer, "Lead with retention ROI.");
        let (prompt, temperature) = generator.calls.lock().unwrap()[0].clone();
        assert!(prompt.contains("CXOs buy on ROI\n\nChurn is the top fear"));
        assert_eq!(temperature, Some(0.0));
        assert_eq!(retriever.queries.lock().unwrap()[0].1, 5);
    }

    #[tokio::test]
    async fn retrieval_failure_is_an_error() {
        let generator = ScriptedGenerator::new(["unused"]);
        let err = ask(&generator, &StubRetriever::failing(), "q", 5)
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Context(_)));
        assert_eq!(generator.call_count(), 0);
    }
}
