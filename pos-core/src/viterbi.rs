//! # Algoritmo de Viterbi — Decodificação Exata da Sequência de Tags
//!
//! Programação dinâmica sobre o lattice (posição × tag): busca exaustiva das
//! $|T|^N$ sequências custaria exponencial, mas o melhor caminho até a posição
//! $m$ com tag $t$ depende apenas do melhor caminho até $m-1$ — o que reduz o
//! problema a $O(N \cdot |T|^2)$ de tempo e $O(N \cdot |T|)$ de espaço.
//!
//! ## Algoritmo
//!
//! ```text
//! Inicialização: V[0][t]  = score(palavra_0, t, "##")
//! Recorrência:   V[m][t]  = max_{t'} ( V[m-1][t'] + score(palavra_m, t, t') )
//!                backptr[m][t] = t' que atingiu o máximo
//! Terminação:    argmax_t ( V[N-1][t] + score("$$", "$$", t) )
//! Backtrace:     segue backptr de trás para frente, N tags no total
//! ```
//!
//! A terminação pontua a transição implícita para a sentinela de fim: a tag
//! da última palavra real é escolhida levando em conta também a fronteira. O
//! termo de emissão do token terminal é constante entre os candidatos e não
//! altera o argmax — usamos a própria tag de fim como token implícito, como
//! na formulação clássica.
//!
//! ## Desempate
//!
//! As tags são percorridas na ordem lexicográfica fixada no treinamento e o
//! máximo usa comparação estrita, então em empate de score vence a primeira
//! tag da ordem. O critério em si é arbitrário; o que importa é que seja
//! determinístico, e há teste cobrindo isso.

use serde::{Deserialize, Serialize};

use crate::corpus::{END_TAG, START_TAG};
use crate::error::DecodeError;
use crate::hmm::HmmModel;

/// Saída da decodificação: uma tag por palavra de entrada, mais o
/// log-probabilidade bruto do caminho vencedor (fronteira final incluída).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViterbiResult {
    /// Sequência de tags mais provável, alinhada com as palavras de entrada.
    pub tags: Vec<String>,
    /// Score acumulado do caminho vencedor, em log-space. Sempre finito.
    pub log_prob: f64,
}

/// Decodifica a sequência de tags de máxima verossimilhança para `words`.
///
/// Sentença vazia é rejeitada explicitamente ([`DecodeError::EmptySentence`]);
/// sentença de uma palavra pula a recorrência e vai direto da inicialização
/// para a terminação. Se o corpus de treinamento não contiver as sentinelas,
/// a primeira consulta de transição falha com [`DecodeError::UnknownTag`].
pub fn decode(model: &HmmModel, words: &[String]) -> Result<ViterbiResult, DecodeError> {
    if words.is_empty() {
        return Err(DecodeError::EmptySentence);
    }

    let tags = model.tags();
    let n_words = words.len();
    let n_tags = tags.len();

    // lattice[m][s] = melhor score acumulado terminando na posição m com a tag s
    let mut lattice = vec![vec![f64::NEG_INFINITY; n_tags]; n_words];
    // backptr[m][s] = índice da tag anterior que atingiu esse máximo
    let mut backptr = vec![vec![0usize; n_tags]; n_words];

    // 1. Inicialização: o contexto anterior à primeira palavra é a sentinela
    for (s, tag) in tags.iter().enumerate() {
        lattice[0][s] = model.score(&words[0], tag, START_TAG)?;
    }

    // 2. Recorrência
    for m in 1..n_words {
        for (s, tag) in tags.iter().enumerate() {
            // A emissão não depende da tag anterior; sai do loop interno
            let emission = model.emission_logprob(&words[m], tag);

            let mut best_score = f64::NEG_INFINITY;
            let mut best_prev = 0usize;
            for (prev_s, prev_tag) in tags.iter().enumerate() {
                let score =
                    lattice[m - 1][prev_s] + model.transition_logprob(prev_tag, tag)? + emission;
                if score > best_score {
                    best_score = score;
                    best_prev = prev_s;
                }
            }

            lattice[m][s] = best_score;
            backptr[m][s] = best_prev;
        }
    }

    // 3. Terminação: pontua a transição implícita para a sentinela de fim
    let mut best_total = f64::NEG_INFINITY;
    let mut best_last = 0usize;
    for (s, tag) in tags.iter().enumerate() {
        let total = lattice[n_words - 1][s] + model.score(END_TAG, END_TAG, tag)?;
        if total > best_total {
            best_total = total;
            best_last = s;
        }
    }

    // 4. Backtrace: reconstrói o caminho da última palavra para a primeira
    let mut path = vec![String::new(); n_words];
    let mut curr = best_last;
    path[n_words - 1] = tags[curr].clone();
    for m in (1..n_words).rev() {
        curr = backptr[m][curr];
        path[m - 1] = tags[curr].clone();
    }

    Ok(ViterbiResult {
        tags: path,
        log_prob: best_total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{get_corpus, Corpus};
    use crate::hmm::HmmModel;

    fn spec_toy_model() -> HmmModel {
        let corpus = Corpus::parse(
            "START/## the/DT dog/NN runs/VB END/$$\nSTART/## a/DT cat/NN sleeps/VB END/$$",
        )
        .unwrap();
        HmmModel::train(&corpus)
    }

    fn words(sentence: &str) -> Vec<String> {
        sentence.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_regression_dt_nn_vb() {
        // Padrão DT→NN→VB inequívoco no treinamento deve dominar o lattice
        let model = spec_toy_model();
        let result = decode(&model, &words("the cat runs")).unwrap();
        assert_eq!(result.tags, vec!["DT", "NN", "VB"]);
        assert!(result.log_prob.is_finite());
    }

    #[test]
    fn test_output_length_matches_input() {
        let model = HmmModel::train(&get_corpus());
        for sentence in [
            "oi",
            "o gato",
            "a menina lê um livro novo .",
            "palavras completamente fora do vocabulário também funcionam aqui .",
        ] {
            let w = words(sentence);
            let result = decode(&model, &w).unwrap();
            assert_eq!(result.tags.len(), w.len());
        }
    }

    #[test]
    fn test_single_word_skips_recurrence() {
        // N=1: inicialização direto para a terminação
        let model = spec_toy_model();
        let result = decode(&model, &words("runs")).unwrap();
        assert_eq!(result.tags, vec!["VB"]);
    }

    #[test]
    fn test_decode_is_deterministic() {
        let model = HmmModel::train(&get_corpus());
        let w = words("o carro velho corre muito .");
        let first = decode(&model, &w).unwrap();
        let second = decode(&model, &w).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_tie_break_prefers_first_tag_in_sorted_order() {
        // Corpus perfeitamente simétrico: X e Y têm as mesmas contagens de
        // emissão e de transição, então os dois caminhos empatam com o MESMO
        // score (mesmas operações de ponto flutuante, na mesma ordem)
        let corpus = Corpus::parse("##/## a/X $$/$$\n##/## a/Y $$/$$").unwrap();
        let model = HmmModel::train(&corpus);

        let total = |tag: &str| {
            model.score("a", tag, START_TAG).unwrap()
                + model.score(END_TAG, END_TAG, tag).unwrap()
        };
        assert_eq!(total("X"), total("Y"));

        // Empate real: com comparação estrita vence a primeira tag na ordem
        // lexicográfica fixada no treinamento ("X" < "Y")
        let result = decode(&model, &words("a")).unwrap();
        assert_eq!(result.tags, vec!["X"]);
        assert_eq!(result.log_prob, total("X"));
    }

    #[test]
    fn test_unseen_word_still_tagged() {
        let model = spec_toy_model();
        // "zebra" nunca apareceu no treinamento: a suavização cobre a emissão
        let result = decode(&model, &words("the zebra runs")).unwrap();
        assert_eq!(result.tags.len(), 3);
        assert!(result.log_prob.is_finite());
        assert_eq!(result.tags[0], "DT");
    }

    #[test]
    fn test_empty_sentence_is_rejected() {
        let model = spec_toy_model();
        assert_eq!(decode(&model, &[]), Err(DecodeError::EmptySentence));
    }

    #[test]
    fn test_missing_sentinels_surface_as_unknown_tag() {
        // Corpus sem as sentinelas: a inicialização consulta "##" e falha
        let corpus = Corpus::parse("o/ART gato/N dorme/V").unwrap();
        let model = HmmModel::train(&corpus);
        assert_eq!(
            decode(&model, &words("o gato")),
            Err(DecodeError::UnknownTag(START_TAG.to_string()))
        );
    }

    #[test]
    fn test_embedded_corpus_tags_plausibly() {
        let model = HmmModel::train(&get_corpus());
        // "sofá" não ocorre no treinamento; o contexto PREP→_→PU decide
        let result = model.tag_sentence("o gato dorme no sofá .").unwrap();
        assert_eq!(result.tags, vec!["ART", "N", "V", "PREP", "N", "PU"]);
    }

    /// Score total de um caminho arbitrário, com as mesmas fronteiras do decoder.
    fn path_score(model: &HmmModel, words: &[String], path: &[&str]) -> f64 {
        let mut total = model.score(&words[0], path[0], START_TAG).unwrap();
        for m in 1..words.len() {
            total += model.score(&words[m], path[m], path[m - 1]).unwrap();
        }
        total + model.score(END_TAG, END_TAG, path[words.len() - 1]).unwrap()
    }

    /// Máximo por força bruta sobre todas as |T|^N atribuições de tags.
    fn brute_force_best(model: &HmmModel, words: &[String]) -> f64 {
        let tags = model.tags();
        let mut assignment = vec![0usize; words.len()];
        let mut best = f64::NEG_INFINITY;

        loop {
            let path: Vec<&str> = assignment.iter().map(|&s| tags[s].as_str()).collect();
            let total = path_score(model, words, &path);
            if total > best {
                best = total;
            }

            // Odômetro sobre as posições
            let mut i = 0;
            loop {
                assignment[i] += 1;
                if assignment[i] < tags.len() {
                    break;
                }
                assignment[i] = 0;
                i += 1;
                if i == words.len() {
                    return best;
                }
            }
        }
    }

    #[test]
    fn test_viterbi_matches_brute_force() {
        // Conjunto mínimo: 2 tags reais + 2 sentinelas, sentenças até N=4
        let corpus = Corpus::parse(
            "##/## a/X b/Y $$/$$\n##/## b/Y a/X $$/$$\n##/## a/X a/X b/Y $$/$$",
        )
        .unwrap();
        let model = HmmModel::train(&corpus);
        assert_eq!(model.tag_count(), 4);

        for sentence in ["a", "a b", "b b a", "a c b a"] {
            let w = words(sentence);
            let result = decode(&model, &w).unwrap();

            let best = brute_force_best(&model, &w);
            let path: Vec<&str> = result.tags.iter().map(String::as_str).collect();

            // O caminho devolvido atinge exatamente o máximo global
            assert!((result.log_prob - best).abs() < 1e-9, "sentença: {sentence}");
            assert!(
                (path_score(&model, &w, &path) - best).abs() < 1e-9,
                "sentença: {sentence}"
            );
        }
    }
}
