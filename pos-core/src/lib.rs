//! # pos-core — Etiquetagem Morfossintática com HMM Bigrama
//!
//! Este crate implementa um etiquetador POS (*Part-of-Speech*) clássico:
//! um Modelo Oculto de Markov de primeira ordem treinado sobre um corpus
//! pré-anotado, decodificado com o algoritmo de Viterbi. Ele foi projetado
//! para ser didático: cada etapa estatística está isolada em um módulo.
//!
//! ## Arquitetura do Sistema
//!
//! O dado flui em um único sentido, corpus → contagens → tabelas → decodificação:
//!
//! 1. **Corpus** ([`corpus`]): leitura do formato `palavra/tag` (uma sentença
//!    por linha) e construção das tabelas de frequência de tags e de
//!    coocorrência palavra/tag. Imutável depois de carregado.
//! 2. **Estimação** ([`hmm`]): tabela de transição $P(t_i \mid t_{i-1})$
//!    suavizada (add-1 de Laplace) e tabulada para a grade completa de tags;
//!    emissão $P(palavra \mid tag)$ calculada sob demanda.
//! 3. **Decodificação** ([`viterbi`]): programação dinâmica exata sobre o
//!    lattice (posição × tag), com backpointers e aritmética em log-space.
//!
//! O modelo treinado é um valor imutável: decodificar é uma função pura de
//! (sentença, modelo), repetível e paralelizável entre sentenças.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use pos_core::{Corpus, HmmModel};
//!
//! // 1. Carrega um corpus anotado (sentinelas ## e $$ são tokens comuns)
//! let corpus = Corpus::parse("##/## o/ART gato/N dorme/V $$/$$").unwrap();
//!
//! // 2. Treina o modelo (contagem + suavização, uma passada)
//! let model = HmmModel::train(&corpus);
//!
//! // 3. Decodifica qualquer sentença, vocabulário inédito incluído
//! let result = model.tag_sentence("o gato dorme").unwrap();
//! assert_eq!(result.tags, vec!["ART", "N", "V"]);
//! ```
//!
//! ## Módulos Principais
//!
//! - [`corpus`]: modelo do corpus, contagens e corpus de demonstração embutido.
//! - [`hmm`]: estimação de parâmetros com suavização aditiva.
//! - [`viterbi`]: o decodificador de máxima verossimilhança.
//! - [`error`]: taxonomia de erros (corpus malformado, sentença vazia,
//!   tag fora do conjunto treinado).

pub mod corpus;
pub mod error;
pub mod hmm;
pub mod viterbi;

pub use corpus::{Corpus, TagFrequency, WordTagFrequency, END_TAG, START_TAG};
pub use error::{CorpusError, DecodeError};
pub use hmm::HmmModel;
pub use viterbi::ViterbiResult;
