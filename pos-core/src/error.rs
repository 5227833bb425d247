//! # Taxonomia de Erros
//!
//! O núcleo estatístico tem pouquíssimos modos de falha, e todos eles são
//! sinalizados explicitamente em vez de mascarados com valores padrão:
//!
//! - **Corpus malformado**: erro de formato na entrada de treinamento.
//! - **Sentença vazia**: não há lattice a percorrer; rejeitamos em vez de
//!   devolver silenciosamente uma sequência vazia.
//! - **Tag fora do conjunto treinado**: violação de invariante — o conjunto
//!   de tags é fechado no treinamento e nunca é estendido depois.
//!
//! Palavras desconhecidas em tempo de decodificação **não** são erro: a
//! suavização aditiva garante probabilidade finita para qualquer vocabulário.

use thiserror::Error;

/// Erros na leitura do corpus anotado (formato `palavra/tag`, uma sentença por linha).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CorpusError {
    /// Token sem o delimitador `/` — impossível separar palavra e tag.
    #[error("token malformado na linha {line}: \"{token}\" (esperado o formato palavra/tag)")]
    MalformedToken { line: usize, token: String },
}

/// Erros na decodificação Viterbi.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A sentença de entrada não contém nenhuma palavra.
    #[error("sentença vazia: não há palavras para etiquetar")]
    EmptySentence,

    /// Consulta de transição envolvendo uma tag ausente do conjunto treinado.
    /// Indica inconsistência entre modelo e chamador, nunca ocorre com um
    /// modelo treinado sobre o próprio corpus.
    #[error("tag \"{0}\" não pertence ao conjunto de tags treinado")]
    UnknownTag(String),
}
