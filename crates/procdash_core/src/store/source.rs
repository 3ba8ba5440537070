//! Record sources: file-backed and embedded tables.

use super::{DataLoadError, LoadResult};
use std::borrow::Cow;
use std::path::PathBuf;

/// Source of delimited table text for [`RecordStore::load`](super::RecordStore::load).
pub trait RecordSource {
    /// Human-readable name used in errors and logs.
    fn source_name(&self) -> String;
    /// Returns the whole table as UTF-8 text.
    fn read_text(&self) -> LoadResult<String>;
}

/// Semicolon-delimited UTF-8 file on disk.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSource for CsvFileSource {
    fn source_name(&self) -> String {
        self.path.display().to_string()
    }

    fn read_text(&self) -> LoadResult<String> {
        let bytes = std::fs::read(&self.path).map_err(|source| DataLoadError::Io {
            source_name: self.source_name(),
            source,
        })?;
        String::from_utf8(bytes).map_err(|_| DataLoadError::Encoding {
            source_name: self.source_name(),
        })
    }
}

/// Table literal held in memory, in the same delimited format as files.
#[derive(Debug, Clone)]
pub struct InlineSource {
    name: String,
    text: Cow<'static, str>,
}

impl InlineSource {
    pub fn new(name: impl Into<String>, text: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Built-in demo dataset; it has no `Data` column, so dates are synthesized.
    pub fn sample() -> Self {
        Self::new("embedded-sample", SAMPLE_TABLE)
    }
}

impl RecordSource for InlineSource {
    fn source_name(&self) -> String {
        self.name.clone()
    }

    fn read_text(&self) -> LoadResult<String> {
        Ok(self.text.clone().into_owned())
    }
}

const SAMPLE_TABLE: &str = "\
Número;Responsável;Marcador;Descrição;Assunto;Tipo;Ícones
23106.004512/2024-31;Ana Souza;Administrativo - Gestão;Renovação do contrato de limpeza predial;Contratos;Recebido;📎 ⚠️
23106.004620/2024-07;Bruno Lima;Aguardando Resposta da Área Responsável;Solicitação de parecer sobre horas extras;Pessoal;Gerado;⏳
23106.004788/2024-92;Ana Souza;Financeiro;Empenho de diárias para capacitação;Orçamento;Gerado;💰
23106.004801/2024-15;Carla Mendes;Jurídico;Recurso administrativo em processo licitatório;Licitações;Recebido;⚖️ 🔒
23106.004955/2024-60;Bruno Lima;Urgente;Pedido de informação com prazo legal;Acesso à Informação;Recebido;🚨 ⚠️
23106.005010/2024-48;Diego Rocha;Administrativo - Gestão;Inventário anual de bens móveis;Patrimônio;Gerado;
23106.005133/2024-21;Carla Mendes;Aguardando Resposta da Área Responsável;Ajuste no plano de trabalho do convênio;Convênios;Recebido;⏳ 📎
23106.005274/2024-03;;Pessoal;Cadastro de novos servidores;Admissão;Gerado;👥
23106.005390/2024-77;Diego Rocha;Concluído;Aquisição de material de expediente;Compras;Gerado;✅
23106.005412/2024-19;Ana Souza;Triagem;Demanda encaminhada pela ouvidoria;;Recebido;
";
