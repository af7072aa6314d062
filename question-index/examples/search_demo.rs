//! Demo of semantic search over a small survey question corpus.
//!
//! Usage: cargo run -p insights-question-index --example search_demo

use std::sync::Arc;

use anyhow::Result;
use insights_embeddings::HashProvider;
use insights_question_index::QuestionIndex;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for logs
    tracing_subscriber::fmt::init();

    let corpus = serde_json::json!({
        "101": {"question_text": "How satisfied are you with your job?"},
        "102": {"question_text": "What is your annual household income?"},
        "103": {"question_text": "How often do you shop online?"},
        "104": {"question_text": "Do you own or rent your home?"},
        "105": {"question_text": "How likely are you to recommend your employer?"}
    });

    // The hashing provider needs no API key or model download.
    let mut index = QuestionIndex::with_provider(Arc::new(HashProvider::new()));
    let report = index.load_questions(&corpus).await?;
    println!(
        "Loaded {} questions ({} dropped)\n",
        report.loaded, report.dropped
    );

    for query in ["job satisfaction", "online shopping", "housing"] {
        println!("Query: {query}");
        for result in index.search(query, 3).await? {
            println!(
                "  {:+.3}  [{}] {}",
                result.similarity_score, result.question_id, result.question_text
            );
        }
        println!();
    }

    Ok(())
}
