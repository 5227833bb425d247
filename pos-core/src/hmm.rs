//! # HMM Bigrama — Estimação de Parâmetros
//!
//! Modelo oculto de Markov de primeira ordem para etiquetagem morfossintática:
//! - **Estados ocultos**: as tags (ART, N, V, ...), incluindo as sentinelas.
//! - **Observações**: as palavras da sentença.
//!
//! O treinamento é puramente contagem + suavização:
//!
//! 1. **Transição** — $P(t_{atual} \mid t_{anterior})$, tabulada de forma
//!    **ansiosa** para a grade completa $|T|^2$ no momento do treinamento:
//!    $$ P(t_c \mid t_p) = \frac{c(t_p, t_c) + 1}{c(t_p) + |T|} $$
//! 2. **Emissão** — $P(palavra \mid tag)$, calculada **sob demanda**, porque o
//!    vocabulário é muito maior e mais esparso que o conjunto de tags:
//!    $$ P(w \mid t) = \frac{c(w, t) + 1}{c(t) + |T|} $$
//!
//! A constante de suavização é a mesma ($|T|$) nas duas famílias, para que
//! transição e emissão sejam estimadas em pé de igualdade. Com o *add-1* de
//! Laplace nenhum evento tem probabilidade zero: todo log é finito, mesmo
//! para bigramas de tags nunca vistos e palavras fora do vocabulário.
//!
//! Tudo é armazenado e combinado em **log-space** ($\ln$), evitando underflow
//! ao acumular probabilidades pequenas em sentenças longas.

use std::collections::HashMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::corpus::{Corpus, TagFrequency, WordTagFrequency};
use crate::error::DecodeError;
use crate::viterbi::{self, ViterbiResult};

/// Modelo HMM treinado: valor imutável que o decodificador recebe.
///
/// Depois de construído por [`HmmModel::train`], nada aqui muda — decodificar
/// é uma função pura de (sentença, modelo) e pode ser repetida ou
/// paralelizada entre sentenças independentes sem sincronização.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HmmModel {
    /// $\ln P(t_{atual} \mid t_{anterior})$: linha indexada pela tag anterior,
    /// coluna pela tag atual. Grade completa sobre o conjunto de tags,
    /// sentinelas incluídas. O aninhamento permite consultar por `&str` sem
    /// alocar no loop interno do Viterbi.
    transition_logprobs: HashMap<String, HashMap<String, f64>>,
    /// Frequência total de cada tag (denominador da suavização de emissão).
    tag_freq: TagFrequency,
    /// Coocorrências palavra → tag → contagem (numerador da emissão).
    word_tag_freq: WordTagFrequency,
    /// Todas as tags do corpus em ordem lexicográfica.
    ///
    /// A ordenação fixa a ordem de iteração do Viterbi e, com ela, o critério
    /// de desempate: em caso de empate de score vence a primeira tag na ordem.
    all_tags: Vec<String>,
}

impl HmmModel {
    /// Treina o modelo a partir do corpus: deriva o conjunto fechado de tags
    /// e tabula a grade completa de transições suavizadas.
    ///
    /// As sentinelas de início/fim entram pelo próprio corpus (são tokens
    /// anotados comuns); nenhum símbolo é injetado por fora.
    pub fn train(corpus: &Corpus) -> Self {
        // Bigramas adjacentes (tag_anterior → tag_atual) dentro de cada sentença
        let mut bigram_counts: HashMap<&str, HashMap<&str, u32>> = HashMap::new();
        for sentence in &corpus.sentences {
            for pair in sentence.windows(2) {
                *bigram_counts
                    .entry(pair[0].1.as_str())
                    .or_default()
                    .entry(pair[1].1.as_str())
                    .or_insert(0) += 1;
            }
        }

        let mut all_tags: Vec<String> = corpus.tag_freq.keys().cloned().collect();
        all_tags.sort(); // ordem determinística entre treino e decodificação

        // Grade |T|² completa, ansiosa: todo par (prev, curr) recebe um valor
        // finito graças ao add-1 — bigramas inéditos inclusive
        let num_tags = all_tags.len() as f64;
        let mut transition_logprobs: HashMap<String, HashMap<String, f64>> =
            HashMap::with_capacity(all_tags.len());
        for prev in &all_tags {
            let prev_count = f64::from(*corpus.tag_freq.get(prev).unwrap_or(&0));
            let row = transition_logprobs.entry(prev.clone()).or_default();
            for curr in &all_tags {
                let count = f64::from(
                    bigram_counts
                        .get(prev.as_str())
                        .and_then(|following| following.get(curr.as_str()))
                        .copied()
                        .unwrap_or(0),
                );
                let prob = (count + 1.0) / (prev_count + num_tags);
                row.insert(curr.clone(), prob.ln());
            }
        }

        Self {
            transition_logprobs,
            tag_freq: corpus.tag_freq.clone(),
            word_tag_freq: corpus.word_tag_freq.clone(),
            all_tags,
        }
    }

    /// Conjunto fechado de tags, em ordem lexicográfica (sentinelas incluídas).
    pub fn tags(&self) -> &[String] {
        &self.all_tags
    }

    /// Tamanho do conjunto de tags ($|T|$, a constante de suavização).
    pub fn tag_count(&self) -> usize {
        self.all_tags.len()
    }

    /// Snapshot somente-leitura das frequências de tag.
    pub fn tag_frequencies(&self) -> &TagFrequency {
        &self.tag_freq
    }

    /// Snapshot somente-leitura das coocorrências palavra/tag.
    pub fn word_tag_frequencies(&self) -> &WordTagFrequency {
        &self.word_tag_freq
    }

    /// $\ln P(palavra \mid tag)$, calculado sob demanda.
    ///
    /// Palavra ou tag ausentes das contagens entram com numerador/denominador
    /// zero; o add-1 garante resultado finito até para vocabulário inédito.
    pub fn emission_logprob(&self, word: &str, tag: &str) -> f64 {
        let labeled = f64::from(
            self.word_tag_freq
                .get(word)
                .and_then(|tags| tags.get(tag))
                .copied()
                .unwrap_or(0),
        );
        let tag_total = f64::from(self.tag_freq.get(tag).copied().unwrap_or(0));
        let prob = (labeled + 1.0) / (tag_total + self.all_tags.len() as f64);
        prob.ln()
    }

    /// $\ln P(t_{atual} \mid t_{anterior})$ da tabela pré-computada.
    ///
    /// Consulta com tag fora do conjunto treinado é violação de invariante e
    /// vira erro explícito em vez de um valor padrão silencioso.
    pub fn transition_logprob(&self, prev_tag: &str, curr_tag: &str) -> Result<f64, DecodeError> {
        // Consulta por &str, sem alocar: o loop interno do Viterbi passa por
        // aqui |T|² vezes por palavra
        let row = self
            .transition_logprobs
            .get(prev_tag)
            .ok_or_else(|| DecodeError::UnknownTag(prev_tag.to_string()))?;
        row.get(curr_tag)
            .copied()
            .ok_or_else(|| DecodeError::UnknownTag(curr_tag.to_string()))
    }

    /// Score local de colocar `tag` sobre `word` vindo de `prev_tag`:
    /// emissão + transição, em log-space. É a unidade que o Viterbi acumula.
    pub fn score(&self, word: &str, tag: &str, prev_tag: &str) -> Result<f64, DecodeError> {
        Ok(self.emission_logprob(word, tag) + self.transition_logprob(prev_tag, tag)?)
    }

    /// Etiqueta uma sentença já separada em palavras.
    pub fn tag_words(&self, words: &[String]) -> Result<ViterbiResult, DecodeError> {
        viterbi::decode(self, words)
    }

    /// Etiqueta uma sentença em texto plano (separação por espaços em branco,
    /// sem qualquer outra tokenização).
    pub fn tag_sentence(&self, sentence: &str) -> Result<ViterbiResult, DecodeError> {
        let words: Vec<String> = sentence.split_whitespace().map(str::to_string).collect();
        viterbi::decode(self, &words)
    }

    /// Etiqueta várias sentenças em paralelo.
    ///
    /// Decodificar não muta estado compartilhado, então as sentenças são
    /// independentes e o rayon pode distribuí-las livremente entre threads.
    pub fn tag_all(&self, sentences: &[&str]) -> Vec<Result<ViterbiResult, DecodeError>> {
        sentences
            .par_iter()
            .map(|sentence| self.tag_sentence(sentence))
            .collect()
    }
}
