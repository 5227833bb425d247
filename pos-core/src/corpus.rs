//! # Corpus Anotado e Contagens de Frequência
//!
//! Modelo do corpus de treinamento: sentenças de pares (palavra, tag) mais as
//! duas tabelas de frequência de que o estimador de parâmetros precisa.
//!
//! ## Formato de entrada
//!
//! Texto plano, **uma sentença por linha**, cada token no formato `palavra/tag`.
//! A tag é o que vem depois da **última** barra, portanto palavras que contêm
//! `/` (ex.: `km/h`) são tratadas corretamente. Nenhuma normalização é
//! aplicada: maiúsculas, acentos e pontuação entram exatamente como estão.
//!
//! ## Sentinelas
//!
//! Cada linha do corpus é emoldurada pelos tokens `##/##` (início) e `$$/$$`
//! (fim). As sentinelas são tokens anotados **comuns**: entram nas contagens
//! como qualquer outra tag, e o conjunto de tags do modelo — incluindo as
//! fronteiras — é derivado inteiramente do corpus, nunca codificado à parte.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CorpusError;

/// Tag sentinela de início de sentença.
pub const START_TAG: &str = "##";

/// Tag sentinela de fim de sentença.
pub const END_TAG: &str = "$$";

/// Frequência total de cada tag no corpus.
///
/// Serve tanto de denominador da suavização quanto de normalizador.
pub type TagFrequency = HashMap<String, u32>;

/// Coocorrências palavra → (tag → contagem). Esparso: entrada ausente é zero.
pub type WordTagFrequency = HashMap<String, HashMap<String, u32>>;

/// Corpus de treinamento carregado, imutável depois da leitura.
///
/// Agrega as sentenças originais e as duas tabelas de contagem construídas em
/// uma única passada. As tabelas são consumidas pelo estimador ([`crate::hmm`])
/// e expostas como snapshots somente-leitura para a camada de visualização.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Corpus {
    /// Sentenças na ordem do arquivo; cada uma é uma sequência de (palavra, tag).
    pub sentences: Vec<Vec<(String, String)>>,
    /// Quantas vezes cada tag ocorre no corpus inteiro.
    pub tag_freq: TagFrequency,
    /// Quantas vezes cada palavra foi anotada com cada tag.
    pub word_tag_freq: WordTagFrequency,
}

impl Corpus {
    /// Lê um corpus no formato `palavra/tag` (uma sentença por linha).
    ///
    /// Uma linha vazia vira uma sentença vazia (condição de fronteira que a
    /// decodificação rejeita explicitamente). Um token sem `/` é erro de
    /// formato e interrompe a leitura — falhar cedo é preferível a produzir
    /// uma palavra ou tag vazia silenciosamente.
    pub fn parse(text: &str) -> Result<Self, CorpusError> {
        let mut sentences: Vec<Vec<(String, String)>> = Vec::new();
        let mut tag_freq: TagFrequency = HashMap::new();
        let mut word_tag_freq: WordTagFrequency = HashMap::new();

        for (line_idx, line) in text.lines().enumerate() {
            let mut sentence: Vec<(String, String)> = Vec::new();

            for token in line.split_whitespace() {
                // A tag é o sufixo após a ÚLTIMA barra ("km/h/N" → ("km/h", "N"))
                let slash = token.rfind('/').ok_or_else(|| CorpusError::MalformedToken {
                    line: line_idx + 1,
                    token: token.to_string(),
                })?;
                let word = &token[..slash];
                let tag = &token[slash + 1..];

                *tag_freq.entry(tag.to_string()).or_insert(0) += 1;
                *word_tag_freq
                    .entry(word.to_string())
                    .or_default()
                    .entry(tag.to_string())
                    .or_insert(0) += 1;

                sentence.push((word.to_string(), tag.to_string()));
            }

            sentences.push(sentence);
        }

        Ok(Self {
            sentences,
            tag_freq,
            word_tag_freq,
        })
    }

    /// Frequências de tag ordenadas da mais comum para a mais rara,
    /// excluindo as sentinelas (que só marcam fronteira de sentença).
    ///
    /// É o snapshot que a interface web usa para o gráfico de barras de tags.
    pub fn tag_frequencies_sorted(&self) -> Vec<(String, u32)> {
        let mut freqs: Vec<(String, u32)> = self
            .tag_freq
            .iter()
            .filter(|(tag, _)| tag.as_str() != START_TAG && tag.as_str() != END_TAG)
            .map(|(tag, count)| (tag.clone(), *count))
            .collect();
        // Desempate pelo nome da tag para saída estável
        freqs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        freqs
    }

    /// Total de ocorrências de cada palavra consultada, somando todas as tags.
    ///
    /// Palavra ausente do corpus conta zero (o gráfico mostra a barra vazia).
    pub fn word_totals(&self, words: &[String]) -> Vec<(String, u32)> {
        words
            .iter()
            .map(|word| {
                let total = self
                    .word_tag_freq
                    .get(word)
                    .map(|tags| tags.values().sum())
                    .unwrap_or(0);
                (word.clone(), total)
            })
            .collect()
    }
}

/// Corpus de demonstração embutido: sentenças em PT-BR anotadas manualmente
/// com um conjunto reduzido de classes gramaticais.
///
/// | Tag  | Classe               | Exemplos              |
/// |------|----------------------|-----------------------|
/// | ART  | Artigo               | o, a, um, uma         |
/// | N    | Substantivo          | gato, casa, professor |
/// | V    | Verbo                | corre, lê, dorme      |
/// | ADJ  | Adjetivo             | preto, grande, novo   |
/// | ADV  | Advérbio             | muito, bem, ontem     |
/// | PREP | Preposição/contração | de, em, no, na        |
/// | PRON | Pronome              | ela, nós, você        |
/// | NUM  | Numeral              | dois, três            |
/// | CONJ | Conjunção            | e                     |
/// | PU   | Pontuação            | . ? !                 |
const EMBEDDED_CORPUS: &str = "\
##/## o/ART cachorro/N corre/V no/PREP parque/N ./PU $$/$$
##/## a/ART menina/N lê/V um/ART livro/N ./PU $$/$$
##/## o/ART gato/N preto/ADJ dorme/V ./PU $$/$$
##/## ela/PRON canta/V muito/ADV bem/ADV ./PU $$/$$
##/## nós/PRON moramos/V em/PREP uma/ART casa/N grande/ADJ ./PU $$/$$
##/## o/ART professor/N explica/V a/ART lição/N ./PU $$/$$
##/## eles/PRON jogam/V bola/N na/PREP praça/N ./PU $$/$$
##/## a/ART criança/N come/V pão/N com/PREP queijo/N ./PU $$/$$
##/## eu/PRON gosto/V de/PREP café/N quente/ADJ ./PU $$/$$
##/## o/ART rio/N corre/V para/PREP o/ART mar/N ./PU $$/$$
##/## dois/NUM pássaros/N cantam/V na/PREP árvore/N ./PU $$/$$
##/## a/ART chuva/N caiu/V forte/ADV ontem/ADV ./PU $$/$$
##/## o/ART menino/N e/CONJ a/ART menina/N estudam/V juntos/ADV ./PU $$/$$
##/## você/PRON viu/V o/ART filme/N novo/ADJ ?/PU $$/$$
##/## a/ART cidade/N acorda/V cedo/ADV ./PU $$/$$
##/## meu/PRON irmão/N comprou/V um/ART carro/N velho/ADJ ./PU $$/$$
##/## o/ART sol/N brilha/V no/PREP céu/N azul/ADJ ./PU $$/$$
##/## ela/PRON escreveu/V uma/ART carta/N longa/ADJ ./PU $$/$$
##/## os/ART alunos/N leram/V três/NUM livros/N ./PU $$/$$
##/## o/ART trem/N chega/V na/PREP estação/N ./PU $$/$$
";

/// Retorna o corpus de demonstração já carregado e contado.
pub fn get_corpus() -> Corpus {
    // O corpus embutido é validado pelos testes deste módulo
    Corpus::parse(EMBEDDED_CORPUS).expect("corpus embutido bem formado")
}

/// Sentenças de demonstração para a interface web.
///
/// Misturam vocabulário visto no treinamento com palavras inéditas
/// (ex.: "sofá", "rápido") para exercitar a suavização em tempo real.
pub fn demo_sentences() -> Vec<&'static str> {
    vec![
        "o gato dorme no sofá .",
        "a menina lê um livro novo .",
        "eles cantam na praça .",
        "o carro velho corre muito .",
        "eu gosto de pão com café .",
        "dois alunos estudam na cidade .",
        "você viu o trem ?",
        "a chuva forte chega cedo .",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_counts_tags_and_words() {
        let corpus = Corpus::parse("##/## o/ART gato/N dorme/V $$/$$\n##/## o/ART cão/N late/V $$/$$")
            .unwrap();

        assert_eq!(corpus.sentences.len(), 2);
        assert_eq!(corpus.sentences[0].len(), 5);
        assert_eq!(corpus.tag_freq["ART"], 2);
        assert_eq!(corpus.tag_freq["N"], 2);
        assert_eq!(corpus.tag_freq[START_TAG], 2);
        assert_eq!(corpus.tag_freq[END_TAG], 2);
        assert_eq!(corpus.word_tag_freq["o"]["ART"], 2);
        assert_eq!(corpus.word_tag_freq["gato"]["N"], 1);
    }

    #[test]
    fn test_parse_word_containing_slash() {
        // A tag é o sufixo após a última barra
        let corpus = Corpus::parse("##/## 80/NUM km/h/N $$/$$").unwrap();
        assert_eq!(corpus.sentences[0][2], ("km/h".to_string(), "N".to_string()));
        assert_eq!(corpus.word_tag_freq["km/h"]["N"], 1);
    }

    #[test]
    fn test_parse_malformed_token_fails_fast() {
        let err = Corpus::parse("##/## o/ART gato $$/$$\n").unwrap_err();
        assert_eq!(
            err,
            CorpusError::MalformedToken {
                line: 1,
                token: "gato".to_string()
            }
        );
    }

    #[test]
    fn test_parse_reports_line_of_bad_token() {
        let err = Corpus::parse("##/## ok/ADV $$/$$\n##/## quebrado $$/$$").unwrap_err();
        assert_eq!(
            err,
            CorpusError::MalformedToken {
                line: 2,
                token: "quebrado".to_string()
            }
        );
    }

    #[test]
    fn test_empty_line_becomes_empty_sentence() {
        let corpus = Corpus::parse("##/## oi/N $$/$$\n\n##/## tchau/N $$/$$").unwrap();
        assert_eq!(corpus.sentences.len(), 3);
        assert!(corpus.sentences[1].is_empty());
    }

    #[test]
    fn test_embedded_corpus_is_well_formed() {
        let corpus = get_corpus();
        assert!(!corpus.sentences.is_empty());

        // Toda sentença emoldurada pelas sentinelas, anotadas como tokens comuns
        for sentence in &corpus.sentences {
            assert_eq!(sentence.first().unwrap().1, START_TAG);
            assert_eq!(sentence.last().unwrap().1, END_TAG);
        }
        assert_eq!(corpus.tag_freq[START_TAG], corpus.sentences.len() as u32);
        assert_eq!(corpus.tag_freq[END_TAG], corpus.sentences.len() as u32);
    }

    #[test]
    fn test_tag_frequencies_sorted_excludes_sentinels() {
        let corpus = get_corpus();
        let freqs = corpus.tag_frequencies_sorted();

        assert!(freqs.iter().all(|(tag, _)| tag != START_TAG && tag != END_TAG));
        // Ordem decrescente de contagem
        for pair in freqs.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
    }

    #[test]
    fn test_word_totals_missing_word_counts_zero() {
        let corpus = get_corpus();
        let totals = corpus.word_totals(&["o".to_string(), "inexistente".to_string()]);

        assert!(totals[0].1 > 0);
        assert_eq!(totals[1], ("inexistente".to_string(), 0));
    }
}
