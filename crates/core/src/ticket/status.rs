//! Freshdesk status code translation.

use std::collections::HashMap;

use serde_json::Value;

use super::Ticket;

/// Labels attached to a status code.
///
/// `internal` is the name configured in Freshdesk, `display` is what API
/// consumers see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLabels {
    pub internal: String,
    pub display: String,
}

/// Statuses configured on the helpdesk account: (code, internal, display).
///
/// Labels are reproduced verbatim, including stray whitespace.
const FRESHDESK_STATUSES: &[(&str, &str, &str)] = &[
    ("2", "Open", "Open"),
    ("3", "Pending", "Pendente"),
    ("4", "Resolved", "Atribuído "),
    ("5", "Closed", "Fechado"),
    ("6", " Em Homologação", "Em Homologação"),
    ("7", "Aguardando Cliente", "Aguardando Cliente"),
    ("8", "Em tratativa", "Em tratativa"),
    ("10", "Em análise", "Em análise"),
    ("11", "Interno", "Interno"),
    ("12", "Aguardando publicar HML", "Aguardando publicar HML"),
    ("13", "Aguardando publicar em PROD", "Aguardando publicar em PROD"),
    ("14", "MVP", "MVP"),
    ("15", "Validação-Atendimento", "Abertos"),
    ("16", "Aguardando Parceiros", "Aguardando Parceiros"),
    ("17", "Pausado", "Pausado"),
    ("18", "Validação-CS", "Abertos"),
];

/// Immutable mapping from stringified status code to its labels.
#[derive(Debug, Clone)]
pub struct StatusTable {
    entries: HashMap<String, StatusLabels>,
}

impl StatusTable {
    pub fn new<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, StatusLabels)>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Table for the statuses configured on the Freshdesk account.
    pub fn freshdesk() -> Self {
        Self::new(FRESHDESK_STATUSES.iter().map(|(code, internal, display)| {
            (
                code.to_string(),
                StatusLabels {
                    internal: internal.to_string(),
                    display: display.to_string(),
                },
            )
        }))
    }

    pub fn get(&self, code: &Value) -> Option<&StatusLabels> {
        self.entries.get(&status_key(code))
    }

    /// Display label for a status code.
    ///
    /// Never fails: unknown codes yield `Unknown (ID: <code>)`.
    pub fn label(&self, code: &Value) -> String {
        let key = status_key(code);
        match self.entries.get(&key) {
            Some(labels) => labels.display.clone(),
            None => format!("Unknown (ID: {})", key),
        }
    }

    /// Set `status_name` on every ticket from its `status` field.
    ///
    /// Keeps length and order.
    pub fn decorate(&self, mut tickets: Vec<Ticket>) -> Vec<Ticket> {
        for ticket in &mut tickets {
            let name = self.label(ticket.status());
            ticket.set_status_name(name);
        }
        tickets
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for StatusTable {
    fn default() -> Self {
        Self::freshdesk()
    }
}

/// Lookup key for a status value: strings verbatim, anything else as JSON.
fn status_key(code: &Value) -> String {
    match code {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
