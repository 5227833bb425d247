//! Servidor web Axum para etiquetar sentenças com o HMM e visualizar as
//! frequências de tags e palavras do corpus em gráficos de barras

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use pos_core::{
    corpus::{demo_sentences, get_corpus, Corpus},
    HmmModel,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Estado compartilhado: corpus carregado e modelo treinado, ambos imutáveis
struct AppState {
    corpus: Corpus,
    model: HmmModel,
}

#[derive(Deserialize)]
struct TagRequest {
    sentence: String,
}

#[derive(Serialize)]
struct TagResponse {
    /// Palavras da sentença, na ordem de entrada
    words: Vec<String>,
    /// Uma tag por palavra
    tags: Vec<String>,
    /// Log-probabilidade bruta do caminho vencedor
    log_prob: f64,
    processing_ms: u64,
}

#[derive(Deserialize)]
struct WordFrequencyQuery {
    /// Palavras separadas por vírgula (ex: "o,gato,sofá")
    words: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    // Treinamento único na inicialização; depois o modelo só é lido
    let corpus = get_corpus();
    let model = HmmModel::train(&corpus);
    info!(
        "Modelo treinado: {} sentenças, {} tags",
        corpus.sentences.len(),
        model.tag_count()
    );
    let state = Arc::new(AppState { corpus, model });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(index_handler))
        .route("/tag", post(tag_handler))
        .route("/frequencies", get(frequencies_handler))
        .route("/word-frequencies", get(word_frequencies_handler))
        .route("/demo-sentences", get(demo_sentences_handler))
        .layer(cors)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    info!("Servidor POS iniciado em http://localhost:3000");
    axum::serve(listener, app).await.unwrap();
}

/// Retorna a página principal HTML
async fn index_handler() -> impl IntoResponse {
    Html(include_str!("templates/index.html"))
}

/// Etiqueta uma sentença via HTTP POST
async fn tag_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TagRequest>,
) -> impl IntoResponse {
    let sentence = req.sentence.trim();
    if sentence.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "Sentença vazia"})),
        )
            .into_response();
    }

    let start = Instant::now();
    match state.model.tag_sentence(sentence) {
        Ok(result) => Json(TagResponse {
            words: sentence.split_whitespace().map(str::to_string).collect(),
            tags: result.tags,
            log_prob: result.log_prob,
            processing_ms: start.elapsed().as_millis() as u64,
        })
        .into_response(),
        Err(err) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({"error": err.to_string()})),
        )
            .into_response(),
    }
}

/// Frequências de tag (sentinelas excluídas), da mais comum para a mais rara
async fn frequencies_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let freqs: Vec<serde_json::Value> = state
        .corpus
        .tag_frequencies_sorted()
        .into_iter()
        .map(|(tag, count)| serde_json::json!({"tag": tag, "count": count}))
        .collect();
    Json(freqs)
}

/// Totais de ocorrência das palavras consultadas (ausente do corpus conta zero)
async fn word_frequencies_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WordFrequencyQuery>,
) -> impl IntoResponse {
    let words: Vec<String> = query
        .words
        .split(',')
        .map(|w| w.trim().to_string())
        .filter(|w| !w.is_empty())
        .collect();

    let totals: Vec<serde_json::Value> = state
        .corpus
        .word_totals(&words)
        .into_iter()
        .map(|(word, count)| serde_json::json!({"word": word, "count": count}))
        .collect();
    Json(totals)
}

/// Sentenças de demonstração para a interface
async fn demo_sentences_handler() -> impl IntoResponse {
    Json(demo_sentences())
}
