use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Estatuto,
    Reglamento,
    Acta,
    Informe,
    Contrato,
    Otro,
}

impl DocumentType {
    pub const ALL: [DocumentType; 6] = [
        DocumentType::Estatuto,
        DocumentType::Reglamento,
        DocumentType::Acta,
        DocumentType::Informe,
        DocumentType::Contrato,
        DocumentType::Otro,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Estatuto => "estatuto",
            DocumentType::Reglamento => "reglamento",
            DocumentType::Acta => "acta",
            DocumentType::Informe => "informe",
            DocumentType::Contrato => "contrato",
            DocumentType::Otro => "otro",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::Estatuto => "Estatuto",
            DocumentType::Reglamento => "Reglamento",
            DocumentType::Acta => "Acta",
            DocumentType::Informe => "Informe",
            DocumentType::Contrato => "Contrato",
            DocumentType::Otro => "Otro",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Document {
    pub id: i64,
    pub name: String,
    pub entry_date: String,
    pub responsible: String,
    pub document_type: String,
    #[serde(default)]
    pub description: Option<String>,
    pub file_name: String,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub mime_type: Option<String>,
}

/// `GET /api/documents/` response.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct DocumentList {
    pub documents: Vec<Document>,
    #[serde(default)]
    pub total: usize,
}

/// Metadata sent as multipart fields next to the file.
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentForm {
    pub name: String,
    pub entry_date: String,
    pub responsible: String,
    pub document_type: DocumentType,
    pub description: String,
}

impl DocumentForm {
    pub fn fields(&self) -> Vec<(String, String)> {
        vec![
            ("name".to_string(), self.name.clone()),
            ("entry_date".to_string(), self.entry_date.clone()),
            ("responsible".to_string(), self.responsible.clone()),
            (
                "document_type".to_string(),
                self.document_type.as_str().to_string(),
            ),
            ("description".to_string(), self.description.clone()),
        ]
    }
}

/// Human readable size: `Bytes`, `KB`, `MB`, `GB` with two decimals.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let exp = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exp = exp.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exp as i32);
    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[exp])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_sizes() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(50 * 1024 * 1024), "50 MB");
    }

    #[test]
    fn document_type_round_trips_through_select_value() {
        for t in DocumentType::ALL {
            assert_eq!(DocumentType::parse(t.as_str()), Some(t));
        }
        assert_eq!(DocumentType::parse("memo"), None);
    }
}
