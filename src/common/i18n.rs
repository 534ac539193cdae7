// src/common/i18n.rs

use std::collections::HashMap;

pub const DEFAULT_LANG: &str = "pt";

// Catálogo de mensagens: chave -> (pt, en)
const MESSAGES: &[(&str, &str, &str)] = &[
    (
        "validation_error",
        "Um ou mais campos são inválidos.",
        "One or more fields are invalid.",
    ),
    (
        "not_found",
        "Registro não encontrado.",
        "Record not found.",
    ),
    (
        "file_not_found",
        "Arquivo não encontrado.",
        "File not found.",
    ),
    (
        "work_order_already_closed",
        "Esta ordem de serviço já foi finalizada.",
        "This work order is already closed.",
    ),
    (
        "invalid_file_name",
        "Nome de arquivo inválido.",
        "Invalid file name.",
    ),
    (
        "store_error",
        "Falha ao acessar o armazenamento. Tente novamente.",
        "Storage operation failed. Please try again.",
    ),
    (
        "invalid_email",
        "O e-mail fornecido é inválido.",
        "The e-mail address is invalid.",
    ),
];

/// Traduções das mensagens de erro da API, indexadas por idioma.
#[derive(Debug, Clone)]
pub struct I18nStore {
    messages: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl I18nStore {
    pub fn new() -> Self {
        let mut pt = HashMap::new();
        let mut en = HashMap::new();
        for (key, pt_msg, en_msg) in MESSAGES {
            pt.insert(*key, *pt_msg);
            en.insert(*key, *en_msg);
        }

        let mut messages = HashMap::new();
        messages.insert("pt", pt);
        messages.insert("en", en);
        Self { messages }
    }

    /// Busca a mensagem no idioma pedido, caindo para o português.
    /// Chaves desconhecidas voltam como estão.
    pub fn get(&self, lang: &str, key: &str) -> String {
        self.messages
            .get(lang)
            .and_then(|m| m.get(key))
            .or_else(|| self.messages.get(DEFAULT_LANG).and_then(|m| m.get(key)))
            .map(|msg| msg.to_string())
            .unwrap_or_else(|| key.to_string())
    }
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}
