//! Full-stack retrieval test with real embedding and reranker models
//!
//! Exercises the pipeline with FastEmbed and the cross-encoder over local
//! text documents.

use std::sync::Arc;

use docent::config::Config;
use docent::document::PdfLoader;
use docent::embedding::FastEmbedProvider;
use docent::retrieval::{CrossEncoderReranker, IndexBuilder, Retriever};
use tempfile::TempDir;

#[tokio::test]
#[ignore] // Requires model download
async fn test_hybrid_retrieval_with_real_models() {
    let temp = TempDir::new().unwrap();

    let doc_path = temp.path().join("guide.txt");
    std::fs::write(
        &doc_path,
        "Paris is the capital of France and its largest city, known for the \
         Eiffel Tower, the Louvre, and the Seine river. \n\n\
         Berlin is the capital of Germany, famous for the Brandenburg Gate \
         and its vibrant arts scene. \n\n\
         Rome is the capital of Italy, home to the Colosseum and the Vatican. \n\n\
         Madrid is the capital of Spain, celebrated for the Prado museum and \
         its lively plazas.",
    )
    .unwrap();

    let mut config = Config::default();
    config.document.chunk_size = 150;
    config.document.chunk_overlap = 20;

    let provider = Arc::new(
        FastEmbedProvider::new(&config.embedding.model).expect("embedding model available"),
    );
    let reranker = Arc::new(
        CrossEncoderReranker::new(&config.retrieval.reranker_model).expect("reranker available"),
    );

    let builder = IndexBuilder::new(Arc::new(PdfLoader::new()), provider, reranker, config);

    let sources = vec![doc_path.to_string_lossy().to_string()];
    let pipeline = builder.build(&sources).await.unwrap();

    assert!(pipeline.chunk_count() >= 2);

    let results = pipeline
        .retrieve("What is the capital of France?")
        .await
        .unwrap();

    assert!(!results.is_empty());
    assert!(results.len() <= 5);

    // The top result should be the Paris passage
    assert!(results[0].chunk.text.contains("Paris"));
}
